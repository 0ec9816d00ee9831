use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_request};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_response")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_request_id: i32,
    #[sea_orm(column_type = "Text")]
    pub response_text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceRequest }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRequest => Entity::belongs_to(service_request::Entity)
                .from(Column::ServiceRequestId)
                .to(service_request::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, service_request_id: i32, response_text: &str) -> Result<Model, ModelError> {
    if response_text.trim().is_empty() {
        return Err(ModelError::invalid("ResponseText", "This field may not be blank."));
    }
    let am = ActiveModel {
        service_request_id: Set(service_request_id),
        response_text: Set(response_text.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
