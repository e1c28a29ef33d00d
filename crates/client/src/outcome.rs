use common::types::{ErrorResponse, FieldError};

use crate::error::HttpResponseError;

/// What a form-driven UI should do after a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Token missing, invalid or expired. Go back through login.
    Reauthenticate,
    /// The entity disappeared under the user, usually a stale listing.
    NotFound,
    /// Validation failures to render next to their inputs.
    FormErrors(Vec<FieldError>),
    /// Anything else, shown as a flash message.
    Generic(String),
}

impl FailureAction {
    pub fn classify(err: &HttpResponseError) -> Self {
        match err.status.as_u16() {
            401 => FailureAction::Reauthenticate,
            404 => FailureAction::NotFound,
            400 => match serde_json::from_str::<ErrorResponse>(&err.body) {
                Ok(envelope) if !envelope.errors.is_empty() => {
                    FailureAction::FormErrors(envelope.errors)
                }
                Ok(envelope) => FailureAction::Generic(envelope.message),
                Err(_) => FailureAction::Generic(err.body.clone()),
            },
            _ => {
                let message = serde_json::from_str::<ErrorResponse>(&err.body)
                    .map(|envelope| envelope.message)
                    .unwrap_or_else(|_| format!("Request failed with status {}", err.status));
                FailureAction::Generic(message)
            }
        }
    }
}
