//! Error types for `plaza-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("principal role must not be empty")]
  EmptyRole,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
