//! The `NotificationStore` trait: the document-query / document-update
//! collaborator the resolver talks to.
//!
//! The trait is implemented by storage backends (e.g. `plaza-store-sqlite`).
//! Higher layers (`plaza-api`, `plaza-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  filter::{Direction, Field, Filter},
  notification::{NewNotification, Notification, NotificationPatch},
};

/// Abstraction over a document store holding notifications.
///
/// Every method takes the collection name; the only collection in use is
/// [`NOTIFICATIONS`](crate::notification::NOTIFICATIONS). Backends should
/// reject any other name.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait NotificationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every document matching all of `filters`, sorted on `order_by`.
  /// No limit is applied.
  fn query_documents<'a>(
    &'a self,
    collection: &'a str,
    filters: &'a [Filter],
    order_by: Field,
    direction: Direction,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + 'a;

  /// Apply `patch` to the document `id`. Unknown ids are an error.
  fn update_document<'a>(
    &'a self,
    collection: &'a str,
    id: Uuid,
    patch: NotificationPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Persist a new document. The store assigns `id` and `created_at` and
  /// always starts it unread.
  fn create_document<'a>(
    &'a self,
    collection: &'a str,
    input: NewNotification,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + 'a;

  /// Fetch a single document. Returns `None` if not found.
  fn get_document<'a>(
    &'a self,
    collection: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Notification>, Self::Error>> + Send + 'a;
}
