//! Nested read-only representations shared by several resources.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<&models::user::Model> for UserSummary {
    fn from(m: &models::user::Model) -> Self {
        Self { id: m.id, name: m.name.clone() }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationView {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<&models::town::Model> for LocationView {
    fn from(m: &models::town::Model) -> Self {
        Self { id: m.id, name: m.name.clone() }
    }
}

/// A product without its category.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceSummary {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<&models::product::Model> for ServiceSummary {
    fn from(m: &models::product::Model) -> Self {
        Self { id: m.id, name: m.name.clone() }
    }
}
