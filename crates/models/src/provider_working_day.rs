use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_provider, working_day};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_working_day")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider_id: i32,
    pub working_day_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Provider, WorkingDay }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Provider => Entity::belongs_to(service_provider::Entity)
                .from(Column::ProviderId)
                .to(service_provider::Column::Id)
                .into(),
            Relation::WorkingDay => Entity::belongs_to(working_day::Entity)
                .from(Column::WorkingDayId)
                .to(working_day::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn link<C: ConnectionTrait>(db: &C, provider_id: i32, working_day_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        provider_id: Set(provider_id),
        working_day_id: Set(working_day_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
