//! JSON REST API for Plaza notifications.
//!
//! Exposes an axum [`Router`] backed by any
//! [`plaza_core::store::NotificationStore`]. Session resolution, TLS, and
//! transport concerns are the caller's responsibility: the mounting layer must
//! insert a [`plaza_core::principal::Principal`] into each request's
//! extensions (see [`caller::Caller`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", plaza_api::api_router(store.clone()))
//! ```

pub mod caller;
pub mod error;
pub mod notifications;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use plaza_core::{NotificationVisibilityResolver, store::NotificationStore};

pub use caller::Caller;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: NotificationStore + 'static,
{
  Router::new()
    .route(
      "/notifications",
      get(notifications::list::<S>).post(notifications::publish::<S>),
    )
    .route("/notifications/unread-count", get(notifications::unread_count::<S>))
    .route("/notifications/read-all", post(notifications::mark_all_read::<S>))
    .route("/notifications/{id}/read", post(notifications::mark_read::<S>))
    .with_state(NotificationVisibilityResolver::new(store))
}
