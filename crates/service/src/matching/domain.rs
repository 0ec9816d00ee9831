use serde::Serialize;
use serde_json::Value;

use crate::validation::{FieldErrors, Fields};
use crate::views::{LocationView, ServiceSummary};

/// Validated body of `POST /services/requests`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequestInput {
    pub provider_service_id: i32,
    pub location_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub request_text: String,
}

impl CreateRequestInput {
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(body)?;
        let provider_service_id = f.required_int("ProviderServiceID");
        let location_id = f.optional_int("LocationID");
        let latitude = f.required_float("Latitude");
        let longitude = f.required_float("Longitude");
        let request_text = f.required_text("RequestText", false);
        if let Some(lat) = latitude {
            if !(-90.0..=90.0).contains(&lat) {
                f.reject("Latitude", "Ensure this value is between -90 and 90.");
            }
        }
        if let Some(lon) = longitude {
            if !(-180.0..=180.0).contains(&lon) {
                f.reject("Longitude", "Ensure this value is between -180 and 180.");
            }
        }
        f.finish()?;
        match (provider_service_id, latitude, longitude, request_text) {
            (Some(provider_service_id), Some(latitude), Some(longitude), Some(request_text)) => {
                Ok(Self { provider_service_id, location_id, latitude, longitude, request_text })
            }
            _ => Err(FieldErrors::single("non_field_errors", "Invalid data.")),
        }
    }
}

/// Validated body of `POST /services/responses`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResponseInput {
    pub service_request_id: i32,
    pub response_text: String,
}

impl CreateResponseInput {
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(body)?;
        let service_request_id = f.required_int("ServiceRequestID");
        let response_text = f.required_text("ResponseText", false);
        f.finish()?;
        match (service_request_id, response_text) {
            (Some(service_request_id), Some(response_text)) => Ok(Self { service_request_id, response_text }),
            _ => Err(FieldErrors::single("non_field_errors", "Invalid data.")),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestView {
    pub id: i32,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(rename = "ProviderServiceID")]
    pub provider_service_id: i32,
    #[serde(rename = "Service")]
    pub service: Option<ServiceSummary>,
    #[serde(rename = "Location")]
    pub location: Option<LocationView>,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "RequestText")]
    pub request_text: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseView {
    pub id: i32,
    #[serde(rename = "ServiceRequestID")]
    pub service_request_id: i32,
    #[serde(rename = "ResponseText")]
    pub response_text: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<models::service_response::Model> for ResponseView {
    fn from(m: models::service_response::Model) -> Self {
        Self {
            id: m.id,
            service_request_id: m.service_request_id,
            response_text: m.response_text,
            timestamp: m.created_at.to_rfc3339(),
        }
    }
}
