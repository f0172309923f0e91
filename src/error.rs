use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors returned by store mutations, snapshot persistence and the actor shell.
///
/// Every variant is recoverable. A mutation that fails has not touched the store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShopError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Appointment must be scheduled in the future: {scheduled_for}")]
    PastDate { scheduled_for: NaiveDateTime },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Snapshot error: {0}")]
    Persistence(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl ShopError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ShopError::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ShopError::NotFound { entity, id: id.into() }
    }
}

pub type Result<T, E = ShopError> = std::result::Result<T, E>;
