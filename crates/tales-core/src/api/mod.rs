//! Backend contract: wire types, errors, and the `Backend` capability.
//!
//! Controllers never talk HTTP themselves. They emit request values and
//! consume `ApiResult`s; a `Backend` implementation (the reqwest
//! [`BackendClient`] in production, fakes in tests) sits in between.

mod client;
mod error;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

pub use client::BackendClient;
pub use error::{ApiError, ApiErrorKind};

/// Result of a backend call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Item listing path.
pub const ITEMS_PATH: &str = "/api/items";
/// Registration path.
pub const REGISTER_PATH: &str = "/api/auth/register";
/// Login path.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// Dev-only user listing path.
pub const USERS_PATH: &str = "/api/users";
/// Header carrying the admin secret for [`USERS_PATH`].
pub const ADMIN_SECRET_HEADER: &str = "X-Admin-Secret";

/// A backend-owned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Which auth endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Register,
    Login,
}

impl AuthAction {
    pub fn path(self) -> &'static str {
        match self {
            AuthAction::Register => REGISTER_PATH,
            AuthAction::Login => LOGIN_PATH,
        }
    }

    /// Message shown when the server gives no detail.
    pub fn failure_message(self) -> &'static str {
        match self {
            AuthAction::Register => "Registration failed",
            AuthAction::Login => "Login failed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthAction::Register => "Register",
            AuthAction::Login => "Login",
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request body for register and login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifies one submitted auth request. The sequence number is unique per
/// controller, so a late answer to an older request never matches a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTicket {
    pub action: AuthAction,
    pub seq: u64,
}

/// An auth call the session controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub action: AuthAction,
    pub seq: u64,
    pub credentials: Credentials,
}

impl AuthRequest {
    pub fn ticket(&self) -> AuthTicket {
        AuthTicket {
            action: self.action,
            seq: self.seq,
        }
    }
}

/// Successful auth response. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Entry of the dev-only user listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserList {
    pub users: Vec<UserSummary>,
}

/// HTTP capability used by the controllers' drivers.
pub trait Backend {
    /// `GET /api/items`
    fn list_items(&self) -> impl Future<Output = ApiResult<Vec<Item>>> + Send;

    /// `GET /api/items/{id}`
    fn get_item(&self, id: i64) -> impl Future<Output = ApiResult<Item>> + Send;

    /// `POST /api/auth/register` or `POST /api/auth/login`
    fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = ApiResult<AuthResponse>> + Send;

    /// `GET /api/users` with the admin secret header.
    fn list_users(
        &self,
        admin_secret: &str,
    ) -> impl Future<Output = ApiResult<Vec<UserSummary>>> + Send;
}
