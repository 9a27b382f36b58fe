//! [`NotificationVisibilityResolver`]: decides which unread notifications a
//! principal sees and owns the `unread → read` transition.
//!
//! Every public operation catches store failures at its own boundary: the
//! source error is logged and the caller receives a tagged [`Outcome`] with a
//! generic message. Nothing here returns `Err`.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{
  filter::{Direction, Field},
  notification::{NOTIFICATIONS, NewNotification, Notification, NotificationPatch},
  outcome::{
    Acknowledged, CREATE_FAILED, CountOutcome, FETCH_FAILED, ListOutcome,
    Listing, MarkAllOutcome, MarkedAll, Outcome, PublishOutcome, Published,
    UPDATE_FAILED, UnreadCount,
  },
  principal::Principal,
  store::NotificationStore,
  visibility::{Scope, scope_for, visibility_filters},
};

/// Routes notifications to principals over any [`NotificationStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct NotificationVisibilityResolver<S> {
  store: Arc<S>,
}

impl<S> Clone for NotificationVisibilityResolver<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: NotificationStore> NotificationVisibilityResolver<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Every unread notification visible to `principal`, newest first.
  pub async fn list_visible_notifications(
    &self,
    principal: &Principal,
  ) -> ListOutcome {
    match self.query_visible(principal).await {
      Ok(data) => Outcome::Success(Listing { data }),
      Err(e) => {
        error!(role = %principal.role, error = %e, "failed to fetch notifications");
        Outcome::failure(FETCH_FAILED)
      }
    }
  }

  /// Mark one notification as read.
  ///
  /// The caller's visibility scope is not checked: any principal may
  /// acknowledge any notification. Marking an already-read notification
  /// succeeds again without change.
  pub async fn mark_notification_as_read(&self, id: Uuid) -> Outcome {
    match self
      .store
      .update_document(NOTIFICATIONS, id, NotificationPatch::mark_read())
      .await
    {
      Ok(()) => Outcome::Success(Acknowledged),
      Err(e) => {
        error!(notification_id = %id, error = %e, "failed to update notification");
        Outcome::failure(UPDATE_FAILED)
      }
    }
  }

  /// Number of notifications [`Self::list_visible_notifications`] would
  /// return for `principal`.
  pub async fn unread_count(&self, principal: &Principal) -> CountOutcome {
    match self.query_visible(principal).await {
      Ok(data) => Outcome::Success(UnreadCount { count: data.len() }),
      Err(e) => {
        error!(role = %principal.role, error = %e, "failed to count notifications");
        Outcome::failure(FETCH_FAILED)
      }
    }
  }

  /// Mark every notification currently visible to `principal` as read, one
  /// update per notification.
  ///
  /// A failed update does not stop the remaining ones; updates that did
  /// succeed stay applied and the outcome reports the failure.
  pub async fn mark_all_as_read(&self, principal: &Principal) -> MarkAllOutcome {
    let visible = match self.query_visible(principal).await {
      Ok(data) => data,
      Err(e) => {
        error!(role = %principal.role, error = %e, "failed to fetch notifications");
        return Outcome::failure(FETCH_FAILED);
      }
    };

    let mut marked = 0;
    let mut failed = 0;
    for n in &visible {
      if self.mark_notification_as_read(n.id).await.is_success() {
        marked += 1;
      } else {
        failed += 1;
      }
    }

    if failed > 0 {
      warn!(role = %principal.role, marked, failed, "mark-all left notifications unread");
      return Outcome::failure(UPDATE_FAILED);
    }
    Outcome::Success(MarkedAll { marked })
  }

  /// Producer entry point: persist a new, unread notification.
  pub async fn publish(&self, input: NewNotification) -> PublishOutcome {
    let kind = input.kind.clone();
    match self.store.create_document(NOTIFICATIONS, input).await {
      Ok(data) => {
        debug!(notification_id = %data.id, %kind, "published notification");
        Outcome::Success(Published { data })
      }
      Err(e) => {
        error!(%kind, error = %e, "failed to create notification");
        Outcome::failure(CREATE_FAILED)
      }
    }
  }

  async fn query_visible(
    &self,
    principal: &Principal,
  ) -> Result<Vec<Notification>, S::Error> {
    if scope_for(&principal.role) == Scope::UnrecognizedRole {
      warn!(
        role = %principal.role,
        "role has no visibility rule; only the unread filter applies"
      );
    }

    let filters = visibility_filters(principal);
    debug!(role = %principal.role, ?filters, "querying visible notifications");

    self
      .store
      .query_documents(NOTIFICATIONS, &filters, Field::CreatedAt, Direction::Desc)
      .await
  }
}
