//! `tales items` handlers.

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow, bail};
use tales_core::api::{Backend, BackendClient, Item};
use tales_core::config::Config;
use tales_core::items::{ItemCard, ItemViewer, ItemsView, load_items};

use crate::modes;

const SHOW_FAILED_MESSAGE: &str = "Failed to fetch item";

/// Runs the item viewer once and prints its cards.
pub async fn list(config: &Config, json: bool) -> Result<()> {
    let client = BackendClient::from_config(config)?;
    let mut viewer = ItemViewer::new();
    load_items(&mut viewer, &client).await;

    let cards = match viewer.view() {
        ItemsView::Cards(cards) => cards,
        ItemsView::Error(message) => bail!("{message}"),
        ItemsView::Placeholder(_) => bail!("Item list did not load"),
    };

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, viewer.items()).context("write items")?;
        writeln!(out)?;
        return Ok(());
    }

    if cards.is_empty() {
        writeln!(out, "No items.")?;
    }
    for card in &cards {
        write_card(&mut out, card)?;
    }
    Ok(())
}

pub async fn show(config: &Config, id: i64, json: bool) -> Result<()> {
    let client = BackendClient::from_config(config)?;
    let item: Item = client.get_item(id).await.map_err(|e| {
        tracing::error!(id, "Error fetching item: {e}");
        anyhow!("{}", e.user_message(SHOW_FAILED_MESSAGE))
    })?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &item).context("write item")?;
        writeln!(out)?;
    } else {
        write_card(&mut out, &ItemCard::from_item(&item))?;
    }
    Ok(())
}

pub async fn browse(config: &Config) -> Result<()> {
    modes::run_item_viewer(config).await
}

fn write_card(out: &mut impl Write, card: &ItemCard<'_>) -> io::Result<()> {
    writeln!(out, "#{} {}", card.id, card.title)?;
    writeln!(out, "    {}", card.body)
}
