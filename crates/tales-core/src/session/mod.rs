//! Session handling: the controller, its token store, and display modes.

mod controller;
mod store;

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub use controller::{
    PASSWORD_REQUIRED_ERROR, PHONE_FORMAT_ERROR, SessionController, SessionStatus, is_valid_phone,
    validate_credentials,
};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::api::{AuthAction, Backend};

/// Reading preference for the story view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontMode {
    #[default]
    Normal,
    Dyslexia,
    Adhd,
}

impl FontMode {
    pub fn all() -> &'static [FontMode] {
        &[FontMode::Normal, FontMode::Dyslexia, FontMode::Adhd]
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            FontMode::Normal => "Normal",
            FontMode::Dyslexia => "Dyslexia",
            FontMode::Adhd => "ADHD",
        }
    }

    /// Identifier used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FontMode::Normal => "normal",
            FontMode::Dyslexia => "dyslexia",
            FontMode::Adhd => "adhd",
        }
    }

    /// Next mode in toggle order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            FontMode::Normal => FontMode::Dyslexia,
            FontMode::Dyslexia => FontMode::Adhd,
            FontMode::Adhd => FontMode::Normal,
        }
    }

    /// Previous mode in toggle order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            FontMode::Normal => FontMode::Adhd,
            FontMode::Dyslexia => FontMode::Normal,
            FontMode::Adhd => FontMode::Dyslexia,
        }
    }
}

impl fmt::Display for FontMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontMode::Normal),
            "dyslexia" => Ok(FontMode::Dyslexia),
            "adhd" => Ok(FontMode::Adhd),
            other => bail!("Unknown font mode '{other}' (expected normal, dyslexia or adhd)"),
        }
    }
}

/// Submits `action` and applies the backend's answer.
///
/// Returns false when no request was sent (validation failed or another
/// request is pending). Used by the non-interactive CLI; the TUI splits the
/// two halves across its event loop instead.
///
/// # Errors
/// Returns the store error if a received token could not be saved.
pub async fn run_auth<S, B>(
    controller: &mut SessionController<S>,
    backend: &B,
    action: AuthAction,
) -> Result<bool>
where
    S: SessionStore,
    B: Backend,
{
    let Some(request) = controller.submit(action) else {
        return Ok(false);
    };
    let result = backend.authenticate(&request).await;
    controller.complete(request.ticket(), result)
}
