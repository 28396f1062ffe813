//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform one backend call and
//! return the `UiEvent` carrying its result. The runtime spawns them and
//! forwards the event to the inbox. They never touch state.

use tales_core::api::{AuthRequest, Backend};

use crate::events::UiEvent;

pub async fn fetch_items<B: Backend>(backend: B) -> UiEvent {
    let result = backend.list_items().await;
    UiEvent::ItemsLoaded { result }
}

pub async fn authenticate<B: Backend>(backend: B, request: AuthRequest) -> UiEvent {
    let ticket = request.ticket();
    let result = backend.authenticate(&request).await;
    UiEvent::AuthCompleted { ticket, result }
}
