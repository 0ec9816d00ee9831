use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{advertisement, errors::ModelError, product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisement_service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub advertisement_id: i32,
    pub product_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Advertisement, Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Advertisement => Entity::belongs_to(advertisement::Entity)
                .from(Column::AdvertisementId)
                .to(advertisement::Column::Id)
                .into(),
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn link<C: ConnectionTrait>(db: &C, advertisement_id: i32, product_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        advertisement_id: Set(advertisement_id),
        product_id: Set(product_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
