//! The [`Caller`] extractor: the principal the session layer attached to
//! the request.

use axum::{extract::FromRequestParts, http::request::Parts};
use plaza_core::principal::Principal;

use crate::error::ApiError;

/// The authenticated principal making the request.
///
/// The outer layer resolves the session and inserts a [`Principal`] into the
/// request extensions; a request without one is rejected with
/// [`ApiError::Unauthenticated`].
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

impl<St> FromRequestParts<St> for Caller
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<Principal>()
      .cloned()
      .map(Caller)
      .ok_or(ApiError::Unauthenticated)
  }
}
