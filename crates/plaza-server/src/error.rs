//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  /// A configured user cannot be turned into a principal.
  #[error("invalid user {username:?}: {source}")]
  InvalidUser {
    username: String,
    #[source]
    source:   plaza_core::Error,
  },

  #[error("duplicate user {0:?}")]
  DuplicateUser(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"plaza\""),
        );
        res
      }
      Error::InvalidUser { .. } | Error::DuplicateUser(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
      }
    }
  }
}
