//! Item list screen.

mod render;
mod state;
mod update;

pub use render::{CARD_HEIGHT, render_items};
pub use state::ItemsState;
pub use update::{handle_key, handle_loaded, mount};
