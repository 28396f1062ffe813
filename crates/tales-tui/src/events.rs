//! Events consumed by the reducer.

use crossterm::event::Event;
use tales_core::api::{ApiResult, AuthResponse, AuthTicket, Item};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the spinner and triggers a render.
    Tick,
    /// Current terminal size, sent at the start of every loop iteration.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// Result of [`crate::effects::UiEffect::FetchItems`].
    ItemsLoaded { result: ApiResult<Vec<Item>> },
    /// Result of [`crate::effects::UiEffect::Authenticate`].
    AuthCompleted {
        ticket: AuthTicket,
        result: ApiResult<AuthResponse>,
    },
}
