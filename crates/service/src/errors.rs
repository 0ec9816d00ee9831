use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::FieldErrors;
use models::errors::{is_unique_violation, ModelError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<FieldErrors> for ServiceError {
    fn from(e: FieldErrors) -> Self { Self::Validation(e) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        if is_unique_violation(&e) {
            Self::Conflict(e.to_string())
        } else {
            Self::Db(e.to_string())
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation { field, message } => Self::Validation(FieldErrors::single(&field, message)),
            ModelError::NotFound(what) => Self::not_found(&what),
            ModelError::Conflict(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_kind() {
        let v = ServiceError::from(ModelError::invalid("Name", "bad"));
        assert!(matches!(v, ServiceError::Validation(ref f) if f.contains("Name")));
        assert!(matches!(ServiceError::from(ModelError::Conflict("dup".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("boom".into())), ServiceError::Db(_)));
        assert!(matches!(ServiceError::from(DbErr::Custom("boom".into())), ServiceError::Db(_)));
    }
}
