use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, product, service_provider};

/// A product as offered by one provider. Service requests point here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider_id: i32,
    pub product_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Provider, Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Provider => Entity::belongs_to(service_provider::Entity)
                .from(Column::ProviderId)
                .to(service_provider::Column::Id)
                .into(),
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, provider_id: i32, product_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        provider_id: Set(provider_id),
        product_id: Set(product_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
