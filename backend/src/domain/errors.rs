//! Domain error taxonomy.
//!
//! Services return these; the REST layer translates each variant to an HTTP
//! status code. Storage failures bubble up through the `Internal` variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Request was well-formed but the payload fails a business rule
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist (for this user)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Missing or invalid credentials/session token
    #[error("unauthorized")]
    Unauthorized,

    /// The request conflicts with existing state (duplicate name, in-use entity)
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
