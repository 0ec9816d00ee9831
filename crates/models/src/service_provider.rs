use sea_orm::{entity::prelude::*, ColumnTrait, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, gender, product, town, user};

pub const AGE_BRACKETS: [&str; 4] = ["18+", "All", "10+", "16+"];

/// Provider profile; at most one per user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_provider")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub product_id: i32,
    pub location_id: Option<i32>,
    pub gender_id: Option<i32>,
    pub age_bracket: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Product, Town, Gender }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Product => Entity::belongs_to(product::Entity).from(Column::ProductId).to(product::Column::Id).into(),
            Relation::Town => Entity::belongs_to(town::Entity).from(Column::LocationId).to(town::Column::Id).into(),
            Relation::Gender => Entity::belongs_to(gender::Entity).from(Column::GenderId).to(gender::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_age_bracket(bracket: &str) -> Result<(), ModelError> {
    if !AGE_BRACKETS.contains(&bracket) {
        return Err(ModelError::invalid("AgeBracket", format!("\"{bracket}\" is not a valid choice.")));
    }
    Ok(())
}

/// Fields of a new profile; references are expected to be checked already.
#[derive(Debug, Clone)]
pub struct NewProvider {
    pub user_id: i32,
    pub product_id: i32,
    pub location_id: Option<i32>,
    pub gender_id: Option<i32>,
    pub age_bracket: Option<String>,
}

/// Generic over the connection so profile, working days and offered services
/// can be written inside one transaction.
pub async fn create<C: ConnectionTrait>(db: &C, new: NewProvider) -> Result<Model, ModelError> {
    if let Some(b) = new.age_bracket.as_deref() {
        validate_age_bracket(b)?;
    }
    let am = ActiveModel {
        user_id: Set(new.user_id),
        product_id: Set(new.product_id),
        location_id: Set(new.location_id),
        gender_id: Set(new.gender_id),
        age_bracket: Set(new.age_bracket),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}
