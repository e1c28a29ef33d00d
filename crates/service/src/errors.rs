use common::types::FieldError;
use thiserror::Error;

/// Business errors for the entity services.
///
/// Every variant carries enough payload for the API boundary to build the
/// wire envelope without inspecting strings: an HTTP-style status via
/// [`ServiceError::status`] and field-scoped entries via
/// [`ServiceError::field_errors`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Uniqueness key already used by another live row.
    #[error("Duplicate {field} value")]
    Duplicate { field: &'static str },
    #[error("{message}")]
    Validation { field: Option<&'static str>, message: String },
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound(entity)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { field: None, message: message.into() }
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field: Some(field), message: message.into() }
    }

    /// HTTP-style status code for external mapping.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Duplicate { .. } | ServiceError::Validation { .. } => 400,
            ServiceError::Db(_) | ServiceError::Storage(_) => 500,
        }
    }

    /// Message safe to put on the wire. Store/storage internals never leak.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Db(_) | ServiceError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Field-scoped entries for the error envelope; empty when the failure
    /// is not tied to a particular input field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ServiceError::Duplicate { field } => {
                vec![FieldError::new(*field, self.to_string())]
            }
            ServiceError::Validation { field: Some(field), .. } => {
                vec![FieldError::new(*field, self.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => {
                ServiceError::Validation { field: None, message: msg }
            }
            models::errors::ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        ServiceError::Db(err.to_string())
    }
}
