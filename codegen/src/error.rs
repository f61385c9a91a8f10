use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot form a Rust identifier from {0:?}")]
    InvalidIdentifier(String),

    #[error("cannot form a Rust type from {0:?}")]
    InvalidType(String),
}
