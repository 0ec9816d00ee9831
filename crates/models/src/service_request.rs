use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, provider_service, town, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider_service_id: i32,
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    #[sea_orm(column_type = "Text")]
    pub request_text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ProviderService, User, Town }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProviderService => Entity::belongs_to(provider_service::Entity)
                .from(Column::ProviderServiceId)
                .to(provider_service::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Town => Entity::belongs_to(town::Entity).from(Column::LocationId).to(town::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validated fields of a request about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRequest {
    pub provider_service_id: i32,
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub request_text: String,
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ModelError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ModelError::invalid("Latitude", "Ensure this value is between -90 and 90."));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ModelError::invalid("Longitude", "Ensure this value is between -180 and 180."));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewServiceRequest) -> Result<Model, ModelError> {
    validate_coordinates(new.latitude, new.longitude)?;
    if new.request_text.trim().is_empty() {
        return Err(ModelError::invalid("RequestText", "This field may not be blank."));
    }
    let am = ActiveModel {
        provider_service_id: Set(new.provider_service_id),
        user_id: Set(new.user_id),
        location_id: Set(new.location_id),
        latitude: Set(new.latitude),
        longitude: Set(new.longitude),
        request_text: Set(new.request_text),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
