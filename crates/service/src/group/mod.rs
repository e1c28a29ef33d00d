pub mod repository;
pub mod service;

pub use repository::{GroupRepository, SeaOrmGroupRepository};
pub use service::GroupService;
