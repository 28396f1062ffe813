//! Item viewer controller.
//!
//! One fetch per viewer: `mount` hands out the request exactly once and
//! `apply` settles the state. There is no retry.

use crate::api::{ApiError, ApiResult, Backend, Item};

/// Shown for any failed item fetch. The underlying error only goes to the log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch items";
/// Body text for items without a description.
pub const NO_DESCRIPTION: &str = "No description available";
/// Shown while the fetch is outstanding.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsStatus {
    Loading,
    Loaded(Vec<Item>),
    Failed(String),
}

/// What the renderer should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsView<'a> {
    Placeholder(&'a str),
    Error(&'a str),
    Cards(Vec<ItemCard<'a>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard<'a> {
    pub id: i64,
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> ItemCard<'a> {
    pub fn from_item(item: &'a Item) -> Self {
        let body = item
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION);
        Self {
            id: item.id,
            title: &item.name,
            body,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemViewer {
    status: ItemsStatus,
    requested: bool,
}

impl Default for ItemViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemViewer {
    pub fn new() -> Self {
        Self {
            status: ItemsStatus::Loading,
            requested: false,
        }
    }

    /// Returns true the first time only; the caller then performs the fetch.
    pub fn mount(&mut self) -> bool {
        if self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    /// Settles the viewer with the fetch result. Ignored once settled.
    pub fn apply(&mut self, result: ApiResult<Vec<Item>>) {
        if !matches!(self.status, ItemsStatus::Loading) {
            tracing::debug!("item viewer already settled; result ignored");
            return;
        }

        self.status = match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "items loaded");
                ItemsStatus::Loaded(items)
            }
            Err(err) => {
                log_fetch_error(&err);
                ItemsStatus::Failed(FETCH_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn status(&self) -> &ItemsStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ItemsStatus::Loading)
    }

    pub fn items(&self) -> &[Item] {
        match &self.status {
            ItemsStatus::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn view(&self) -> ItemsView<'_> {
        match &self.status {
            ItemsStatus::Loading => ItemsView::Placeholder(LOADING_PLACEHOLDER),
            ItemsStatus::Failed(message) => ItemsView::Error(message),
            ItemsStatus::Loaded(items) => {
                ItemsView::Cards(items.iter().map(ItemCard::from_item).collect())
            }
        }
    }
}

fn log_fetch_error(err: &ApiError) {
    tracing::error!(kind = %err.kind, "Error fetching items: {err}");
}

/// Mounts `viewer` and, if this is the first mount, fetches through `backend`.
pub async fn load_items<B: Backend>(viewer: &mut ItemViewer, backend: &B) {
    if viewer.mount() {
        let result = backend.list_items().await;
        viewer.apply(result);
    }
}
