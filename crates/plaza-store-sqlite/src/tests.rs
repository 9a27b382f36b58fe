//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use plaza_core::{
  NotificationVisibilityResolver,
  filter::{Direction, Field, Filter},
  notification::{NOTIFICATIONS, NewNotification, Notification, NotificationPatch, Priority},
  principal::{Principal, Role},
  store::NotificationStore,
  visibility::visibility_filters,
};
use serde_json::json;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new(recipient: &str, unit: &str) -> NewNotification {
  NewNotification::new("test", recipient, unit, format!("{recipient}@{unit}"))
}

fn base() -> DateTime<Utc> {
  DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
    .unwrap()
    .with_timezone(&Utc)
}

/// Insert a notification with an explicit `created_at` offset (seconds from
/// a fixed base) so ordering is deterministic.
async fn insert_at(s: &SqliteStore, recipient: &str, unit: &str, offset: i64) -> Notification {
  let at = base() + Duration::seconds(offset);
  let n = new(recipient, unit).into_notification(Uuid::new_v4(), at);
  s.insert(&n).await.unwrap();
  n
}

async fn all_desc(s: &SqliteStore, filters: &[Filter]) -> Vec<Notification> {
  s.query_documents(NOTIFICATIONS, filters, Field::CreatedAt, Direction::Desc)
    .await
    .unwrap()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_starts_unread() {
  let s = store().await;
  let input = new("waiter", "restaurant")
    .with_message("Table 3 needs water")
    .with_priority(Priority::High)
    .with_metadata(&json!({ "tableNumber": "3" }))
    .unwrap();

  let created = s.create_document(NOTIFICATIONS, input).await.unwrap();
  assert!(!created.is_read);
  assert_eq!(created.priority, Priority::High);

  let fetched = s.get_document(NOTIFICATIONS, created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get_document(NOTIFICATIONS, Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn expiry_round_trips() {
  let s = store().await;
  let expires = Utc::now() + Duration::hours(4);
  let created = s
    .create_document(NOTIFICATIONS, new("bar", "bar").expiring_at(expires))
    .await
    .unwrap();
  let fetched = s.get_document(NOTIFICATIONS, created.id).await.unwrap().unwrap();
  assert_eq!(fetched.expires_at, Some(expires));
}

#[tokio::test]
async fn other_collections_are_rejected() {
  let s = store().await;
  let err = s
    .query_documents("orders", &[], Field::CreatedAt, Direction::Desc)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownCollection(c) if c == "orders"));
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_orders_by_created_at() {
  let s = store().await;
  let b = insert_at(&s, "all", "cafe", 10).await;
  let c = insert_at(&s, "all", "cafe", 20).await;
  let a = insert_at(&s, "all", "cafe", 0).await;

  let desc: Vec<_> = all_desc(&s, &[]).await.into_iter().map(|n| n.id).collect();
  assert_eq!(desc, vec![c.id, b.id, a.id]);

  let asc: Vec<_> = s
    .query_documents(NOTIFICATIONS, &[], Field::CreatedAt, Direction::Asc)
    .await
    .unwrap()
    .into_iter()
    .map(|n| n.id)
    .collect();
  assert_eq!(asc, vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn query_applies_eq_and_in_filters() {
  let s = store().await;
  insert_at(&s, "waiter", "restaurant", 0).await;
  insert_at(&s, "kitchen", "restaurant", 1).await;
  insert_at(&s, "all", "bar", 2).await;

  let got = all_desc(
    &s,
    &[
      Filter::equals(Field::IsRead, false),
      Filter::is_in(Field::Recipient, ["waiter", "all"]),
    ],
  )
  .await;
  let recipients: Vec<_> = got.iter().map(|n| n.recipient.as_str()).collect();
  assert_eq!(recipients, vec!["all", "waiter"]);

  let bar = all_desc(&s, &[Filter::equals(Field::BusinessUnit, "bar")]).await;
  assert_eq!(bar.len(), 1);
}

#[tokio::test]
async fn sql_filters_agree_with_in_memory_semantics() {
  let s = store().await;
  for (i, (recipient, unit)) in [
    ("waiter", "restaurant"),
    ("kitchen", "cafe"),
    ("all", "bar"),
    ("restaurant_manager", "hotel"),
    ("all", "takeaway"),
  ]
  .iter()
  .enumerate()
  {
    insert_at(&s, recipient, unit, i as i64).await;
  }

  let everything = all_desc(&s, &[]).await;
  for role in [
    Role::SuperAdmin,
    Role::Waiter,
    Role::Kitchen,
    Role::BarManager,
    Role::CafeManager,
    Role::Unrecognized("housekeeping".into()),
  ] {
    let filters = visibility_filters(&Principal::with_role(role.clone()));
    let from_sql = all_desc(&s, &filters).await;
    let in_memory: Vec<_> = everything
      .iter()
      .filter(|n| plaza_core::filter::matches_all(&filters, n))
      .cloned()
      .collect();
    assert_eq!(from_sql, in_memory, "role {role}");
  }
}

#[tokio::test]
async fn mistyped_filters_agree_with_in_memory_semantics() {
  let s = store().await;
  insert_at(&s, "1", "bar", 0).await;
  let everything = all_desc(&s, &[]).await;

  for filters in [
    vec![Filter::equals(Field::IsRead, "0")],
    vec![Filter::equals(Field::Recipient, true)],
    vec![Filter::is_in(Field::Recipient, [true, false])],
  ] {
    let from_sql = all_desc(&s, &filters).await;
    let in_memory: Vec<_> = everything
      .iter()
      .filter(|n| plaza_core::filter::matches_all(&filters, n))
      .cloned()
      .collect();
    assert!(in_memory.is_empty());
    assert_eq!(from_sql, in_memory, "{filters:?}");
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_marks_read_and_is_repeatable() {
  let s = store().await;
  let n = insert_at(&s, "waiter", "restaurant", 0).await;

  s.update_document(NOTIFICATIONS, n.id, NotificationPatch::mark_read())
    .await
    .unwrap();
  s.update_document(NOTIFICATIONS, n.id, NotificationPatch::mark_read())
    .await
    .unwrap();

  let fetched = s.get_document(NOTIFICATIONS, n.id).await.unwrap().unwrap();
  assert!(fetched.is_read);
  assert!(all_desc(&s, &[Filter::equals(Field::IsRead, false)]).await.is_empty());
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s
    .update_document(NOTIFICATIONS, id, NotificationPatch::mark_read())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotificationNotFound(got) if got == id));
}

// ─── Through the resolver ────────────────────────────────────────────────────

#[tokio::test]
async fn resolver_over_sqlite() {
  let s = store().await;
  for (i, unit) in ["bar", "cafe", "takeaway", "hotel"].iter().enumerate() {
    insert_at(&s, "all", unit, i as i64).await;
  }
  let resolver = NotificationVisibilityResolver::new(Arc::new(s));

  let cafe = Principal::new("cafe_manager", Some("cafe".into())).unwrap();
  let listed = resolver
    .list_visible_notifications(&cafe)
    .await
    .into_success()
    .unwrap()
    .data;
  let units: Vec<_> = listed.iter().map(|n| n.business_unit.as_str()).collect();
  assert_eq!(units, vec!["takeaway", "cafe"]);

  let marked = resolver.mark_all_as_read(&cafe).await.into_success().unwrap();
  assert_eq!(marked.marked, 2);

  let owner = Principal::with_role(Role::Owner);
  let remaining = resolver.unread_count(&owner).await.into_success().unwrap();
  assert_eq!(remaining.count, 2);

  let missing = resolver.mark_notification_as_read(Uuid::new_v4()).await;
  assert_eq!(missing.error(), Some("Failed to update notification"));
}
