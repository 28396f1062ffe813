//! Session screen: sign-in form, font toggle and story.

mod render;
mod state;
mod update;

pub use render::{render_session, toolbar_line};
pub use state::{Focus, SessionState};
pub use update::{handle_auth_completed, handle_key, handle_paste};
