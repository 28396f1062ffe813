//! Item screen reducer.

use crossterm::event::{KeyCode, KeyEvent};
use tales_core::api::{ApiResult, Item};

use super::ItemsState;
use crate::effects::UiEffect;

/// Requests the fetch the first time the screen is shown.
pub fn mount(state: &mut ItemsState) -> Vec<UiEffect> {
    if state.viewer.mount() {
        vec![UiEffect::FetchItems]
    } else {
        vec![]
    }
}

pub fn handle_loaded(state: &mut ItemsState, result: ApiResult<Vec<Item>>) {
    state.viewer.apply(result);
    state.scroll = 0;
}

pub fn handle_key(state: &mut ItemsState, key: KeyEvent, page: usize) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_up(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_down(1);
            vec![]
        }
        KeyCode::PageUp => {
            state.scroll_up(page.max(1));
            vec![]
        }
        KeyCode::PageDown => {
            state.scroll_down(page.max(1));
            vec![]
        }
        KeyCode::Home => {
            state.scroll = 0;
            vec![]
        }
        _ => vec![],
    }
}
