//! Handlers for `/notifications` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/notifications` | Unread notifications visible to the caller, newest first |
//! | `GET`  | `/notifications/unread-count` | Size of that listing |
//! | `POST` | `/notifications` | Body: [`NewNotification`]; 201 on success |
//! | `POST` | `/notifications/{id}/read` | Mark one notification read |
//! | `POST` | `/notifications/read-all` | Mark everything visible to the caller read |
//!
//! Every handler answers with a tagged outcome (`{"success": ...}`); store
//! failures are reported inside the body, not through the status code.

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
};
use plaza_core::{
  NotificationVisibilityResolver,
  notification::NewNotification,
  outcome::{CountOutcome, ListOutcome, MarkAllOutcome, Outcome, PublishOutcome},
  store::NotificationStore,
};
use uuid::Uuid;

use crate::{caller::Caller, error::ApiError};

/// `GET /notifications`
pub async fn list<S>(
  State(resolver): State<NotificationVisibilityResolver<S>>,
  Caller(principal): Caller,
) -> Json<ListOutcome>
where
  S: NotificationStore,
{
  Json(resolver.list_visible_notifications(&principal).await)
}

/// `GET /notifications/unread-count`
pub async fn unread_count<S>(
  State(resolver): State<NotificationVisibilityResolver<S>>,
  Caller(principal): Caller,
) -> Json<CountOutcome>
where
  S: NotificationStore,
{
  Json(resolver.unread_count(&principal).await)
}

/// `POST /notifications/{id}/read`
///
/// The caller must be authenticated, but their visibility scope is not
/// checked against the notification.
pub async fn mark_read<S>(
  State(resolver): State<NotificationVisibilityResolver<S>>,
  Caller(_principal): Caller,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Outcome>, ApiError>
where
  S: NotificationStore,
{
  let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  Ok(Json(resolver.mark_notification_as_read(id).await))
}

/// `POST /notifications/read-all`
pub async fn mark_all_read<S>(
  State(resolver): State<NotificationVisibilityResolver<S>>,
  Caller(principal): Caller,
) -> Json<MarkAllOutcome>
where
  S: NotificationStore,
{
  Json(resolver.mark_all_as_read(&principal).await)
}

/// `POST /notifications`: 201 with the stored notification on success. A
/// body that does not decode is a 400.
pub async fn publish<S>(
  State(resolver): State<NotificationVisibilityResolver<S>>,
  Caller(principal): Caller,
  body: Result<Json<NewNotification>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishOutcome>), ApiError>
where
  S: NotificationStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  tracing::debug!(role = %principal.role, kind = %body.kind, "publishing notification");
  let outcome = resolver.publish(body).await;
  let status = if outcome.is_success() {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };
  Ok((status, Json(outcome)))
}
