use sea_orm::{entity::prelude::*, DatabaseConnection, Set, TransactionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{advertisement_service, errors::ModelError, town, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub location_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: Option<Date>,
    pub expiry_date: Date,
    pub message_count: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Town }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Town => Entity::belongs_to(town::Entity).from(Column::LocationId).to(town::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub user_id: i32,
    pub location_id: i32,
    pub title: String,
    pub description: String,
    pub start_date: Option<Date>,
    pub expiry_date: Date,
    /// Advertised products; may be empty.
    pub product_ids: Vec<i32>,
}

/// Store an advert and its product links atomically.
pub async fn create(db: &DatabaseConnection, new: NewAdvertisement) -> Result<Model, ModelError> {
    if new.title.trim().is_empty() {
        return Err(ModelError::invalid("ADTitle", "This field may not be blank."));
    }
    if let Some(start) = new.start_date {
        if start > new.expiry_date {
            return Err(ModelError::invalid("ExpiryDate", "Expiry date must not precede the start date."));
        }
    }
    let txn = db.begin().await?;
    let am = ActiveModel {
        user_id: Set(new.user_id),
        location_id: Set(new.location_id),
        title: Set(new.title),
        description: Set(new.description),
        start_date: Set(new.start_date),
        expiry_date: Set(new.expiry_date),
        message_count: Set(0),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let ad = am.insert(&txn).await?;
    for product_id in new.product_ids {
        advertisement_service::link(&txn, ad.id, product_id).await?;
    }
    txn.commit().await?;
    Ok(ad)
}
