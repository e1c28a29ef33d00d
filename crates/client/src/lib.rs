//! HTTP client side of the university API: a generic paginated CRUD
//! client plus failure classification for form-driven UIs.

pub mod crud;
pub mod error;
pub mod forms;
pub mod outcome;

pub use crud::CrudClient;
pub use error::{ClientError, HttpResponseError};
pub use outcome::FailureAction;
