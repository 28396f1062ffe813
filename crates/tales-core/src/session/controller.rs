//! Session controller: input buffers, token lifecycle, display mode.
//!
//! The controller is synchronous. `register`/`login` validate locally and hand
//! back an [`AuthRequest`] for the caller to execute; the result comes back
//! through [`SessionController::complete`]. Only one request may be pending at
//! a time.

use anyhow::Result;

use super::FontMode;
use super::store::SessionStore;
use crate::api::{ApiResult, AuthAction, AuthRequest, AuthResponse, AuthTicket, Credentials};

/// Shown when the phone buffer is not exactly ten digits.
pub const PHONE_FORMAT_ERROR: &str = "Phone must be a 10-digit number";
/// Shown when the password buffer is empty.
pub const PASSWORD_REQUIRED_ERROR: &str = "Password is required";

/// Returns true if `phone` is exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Checks the buffers in submit order (phone first, then password).
///
/// # Errors
/// Returns the user-facing message of the first failing check.
pub fn validate_credentials(phone: &str, password: &str) -> Result<(), &'static str> {
    if !is_valid_phone(phone) {
        return Err(PHONE_FORMAT_ERROR);
    }
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED_ERROR);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
}

/// Owns the session and the store that persists its token.
#[derive(Debug)]
pub struct SessionController<S> {
    phone: String,
    password: String,
    token: Option<String>,
    mode: FontMode,
    error: Option<String>,
    pending: Option<AuthTicket>,
    next_seq: u64,
    store: S,
}

impl<S: SessionStore> SessionController<S> {
    /// Restores the token from `store`. Never touches the network.
    pub fn initialize(store: S) -> Self {
        let token = store.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to restore session token: {e:#}");
            None
        });
        tracing::debug!(restored = token.is_some(), "session initialized");

        Self {
            phone: String::new(),
            password: String::new(),
            token,
            mode: FontMode::default(),
            error: None,
            pending: None,
            next_seq: 1,
            store,
        }
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    /// Mutable phone buffer, for editors that insert/delete in place.
    pub fn phone_mut(&mut self) -> &mut String {
        &mut self.phone
    }

    /// Mutable password buffer, for editors that insert/delete in place.
    pub fn password_mut(&mut self) -> &mut String {
        &mut self.password
    }

    pub fn register(&mut self) -> Option<AuthRequest> {
        self.submit(AuthAction::Register)
    }

    pub fn login(&mut self) -> Option<AuthRequest> {
        self.submit(AuthAction::Login)
    }

    /// Runs the shared register/login pipeline.
    ///
    /// Returns the request to send, or `None` when validation failed (the
    /// error is set) or another request is still pending (nothing changes).
    pub fn submit(&mut self, action: AuthAction) -> Option<AuthRequest> {
        if let Some(pending) = self.pending {
            tracing::debug!(
                pending = %pending.action,
                %action,
                "auth request in flight; submit ignored"
            );
            return None;
        }

        self.error = None;
        if let Err(message) = validate_credentials(&self.phone, &self.password) {
            self.error = Some(message.to_string());
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(AuthTicket { action, seq });
        Some(AuthRequest {
            action,
            seq,
            credentials: Credentials {
                phone: self.phone.clone(),
                password: self.password.clone(),
            },
        })
    }

    /// Applies the outcome of the pending request.
    ///
    /// Returns `Ok(false)` (and changes nothing) if `ticket` is not the pending
    /// request, e.g. a late response after logout. A response without a usable
    /// token counts as a failed attempt.
    ///
    /// # Errors
    /// Returns the store error if the new token could not be saved. The
    /// session is still authenticated in memory.
    pub fn complete(
        &mut self,
        ticket: AuthTicket,
        result: ApiResult<AuthResponse>,
    ) -> Result<bool> {
        if self.pending != Some(ticket) {
            tracing::debug!(
                action = %ticket.action,
                seq = ticket.seq,
                "discarding stale auth response"
            );
            return Ok(false);
        }
        self.pending = None;
        let action = ticket.action;

        match result {
            Ok(response) if response.token.trim().is_empty() => {
                tracing::warn!(%action, "auth response carried an empty token");
                self.error = Some(action.failure_message().to_string());
            }
            Ok(response) => {
                let saved = self.store.save(&response.token);
                self.token = Some(response.token);
                self.error = None;
                tracing::info!(%action, "session authenticated");
                saved?;
            }
            Err(err) => {
                self.error = Some(err.user_message(action.failure_message()).to_string());
            }
        }
        Ok(true)
    }

    /// Drops the token and clears the credential buffers. Keeps `mode`.
    ///
    /// # Errors
    /// Returns the store error if the stored token could not be removed. The
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<()> {
        self.pending = None;
        self.phone.clear();
        self.password.clear();

        if self.token.take().is_none() {
            return Ok(());
        }
        tracing::info!("session logged out");
        self.store.clear()
    }

    pub fn set_mode(&mut self, mode: FontMode) {
        self.mode = mode;
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn mode(&self) -> FontMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending(&self) -> Option<AuthAction> {
        self.pending.map(|ticket| ticket.action)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
