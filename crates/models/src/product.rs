use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, product_category};

/// A service that can be offered, e.g. "Plumbing" under "Home Repairs".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(product_category::Entity)
                .from(Column::CategoryId)
                .to(product_category::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::invalid("Name", "This field may not be blank."));
    }
    if name.chars().count() > 100 {
        return Err(ModelError::invalid("Name", "Ensure this field has no more than 100 characters."));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, category_id: i32, name: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    if product_category::Entity::find_by_id(category_id).one(db).await?.is_none() {
        return Err(ModelError::invalid("CategoryID", format!("Invalid pk \"{category_id}\" - object does not exist.")));
    }
    let am = ActiveModel {
        category_id: Set(category_id),
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
