//! HTTP server for Plaza notifications.
//!
//! Resolves each request's session into a
//! [`Principal`](plaza_core::principal::Principal) via HTTP Basic auth and
//! mounts the `plaza-api` router under `/api`.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use plaza_core::store::NotificationStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, authenticate};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PLAZA_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub users:      Vec<UserConfig>,
}

/// One staff account.
#[derive(Deserialize, Clone)]
pub struct UserConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  /// Role string, e.g. `"waiter"` or `"bar_manager"`.
  pub role:          String,
  pub business_unit: Option<String>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the server router is built from.
#[derive(Clone)]
pub struct AppState<S: NotificationStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server [`Router`]: an unauthenticated `/health` probe and the
/// authenticated JSON API under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: NotificationStore + 'static,
{
  let api = plaza_api::api_router(state.store.clone())
    .layer(middleware::from_fn_with_state(state.auth.clone(), authenticate));

  Router::new()
    .route("/health", get(health))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use chrono::{Duration, Utc};
  use plaza_core::notification::NewNotification;
  use plaza_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::Value;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let now = Utc::now();
    for (i, unit) in ["bar", "cafe", "hotel"].iter().enumerate() {
      let n = NewNotification::new("test", "restaurant_manager", *unit, *unit)
        .into_notification(Uuid::new_v4(), now + Duration::seconds(i as i64));
      store.insert(&n).await.unwrap();
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"secret", &salt)
      .unwrap()
      .to_string();

    let config = ServerConfig {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from(":memory:"),
      users:      vec![UserConfig {
        username:      "ravi".to_string(),
        password_hash: hash,
        role:          "bar_manager".to_string(),
        business_unit: Some("bar".to_string()),
      }],
    };

    AppState {
      store:  Arc::new(store),
      auth:   Arc::new(AuthConfig::from_users(&config.users).unwrap()),
      config: Arc::new(config),
    }
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn send_get(
    state: AppState<SqliteStore>,
    uri: &str,
    auth: Option<&str>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(a) = auth {
      builder = builder.header(header::AUTHORIZATION, a);
    }
    router(state).oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
  }

  #[tokio::test]
  async fn health_needs_no_credentials() {
    let resp = send_get(make_state().await, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_without_credentials_is_401_with_challenge() {
    let resp = send_get(make_state().await, "/api/notifications", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn api_with_wrong_password_is_401() {
    let auth = auth_header("ravi", "nope");
    let resp = send_get(make_state().await, "/api/notifications", Some(&auth)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn authenticated_bar_manager_sees_bar_only() {
    let auth = auth_header("ravi", "secret");
    let resp = send_get(make_state().await, "/api/notifications", Some(&auth)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["business_unit"], "bar");
  }
}
