//! HTTP Basic session resolution: credentials in, [`Principal`] out.

use std::{collections::HashMap, fmt, sync::Arc};

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use plaza_core::{
  principal::Principal,
  visibility::{Scope, scope_for},
};

use crate::{UserConfig, error::Error};

/// A configured account: its argon2 hash and the principal it resolves to.
#[derive(Clone)]
struct Account {
  password_hash: String,
  principal:     Principal,
}

impl fmt::Debug for Account {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Account")
      .field("password_hash", &"<redacted>")
      .field("principal", &self.principal)
      .finish()
  }
}

/// Accounts accepted by this server instance, keyed by username.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
  accounts: HashMap<String, Account>,
}

impl AuthConfig {
  /// Validate configured users up front so a bad role surfaces at startup
  /// rather than on first login.
  pub fn from_users(users: &[UserConfig]) -> Result<Self, Error> {
    let mut accounts = HashMap::with_capacity(users.len());
    for user in users {
      let principal = Principal::new(&user.role, user.business_unit.clone())
        .map_err(|source| Error::InvalidUser {
          username: user.username.clone(),
          source,
        })?;
      if scope_for(&principal.role) == Scope::UnrecognizedRole {
        tracing::warn!(
          username = %user.username,
          role = %principal.role,
          "unrecognized role; this user will see every unread notification"
        );
      }
      let account = Account {
        password_hash: user.password_hash.clone(),
        principal,
      };
      if accounts.insert(user.username.clone(), account).is_some() {
        return Err(Error::DuplicateUser(user.username.clone()));
      }
    }
    Ok(Self { accounts })
  }

  pub fn len(&self) -> usize { self.accounts.len() }

  pub fn is_empty(&self) -> bool { self.accounts.is_empty() }
}

/// Resolve the principal for a request from its `Authorization` header.
pub fn resolve_principal(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Principal, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let account = config.accounts.get(username).ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&account.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(account.principal.clone())
}

/// Middleware: attach the caller's [`Principal`] to the request, or reject
/// it with `401`.
pub async fn authenticate(
  State(auth): State<Arc<AuthConfig>>,
  mut req: Request,
  next: Next,
) -> Result<Response, Error> {
  let principal = resolve_principal(req.headers(), &auth).inspect_err(|_| {
    tracing::debug!(uri = %req.uri(), "rejected unauthenticated request");
  })?;
  req.extensions_mut().insert(principal);
  Ok(next.run(req).await)
}
