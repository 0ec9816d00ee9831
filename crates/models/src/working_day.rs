use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const DAYS_OF_WEEK: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "working_day")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub day: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn is_valid_day(day: &str) -> bool {
    DAYS_OF_WEEK.contains(&day)
}

/// Rows for the given day names, in id (Monday-first) order.
pub async fn find_by_days(db: &DatabaseConnection, days: &[String]) -> Result<Vec<Model>, ModelError> {
    if days.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::Day.is_in(days.iter().cloned()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
