//! `tales users`: dev-only listing of registered phones.

use anyhow::{Result, anyhow, bail};
use tales_core::api::{Backend, BackendClient};
use tales_core::config::Config;

pub async fn list(config: &Config, secret: Option<String>) -> Result<()> {
    let Some(secret) = secret.or_else(|| config.admin_secret.clone()) else {
        bail!("No admin secret. Pass --secret or set admin_secret in the config file.");
    };

    let client = BackendClient::from_config(config)?;
    let users = client
        .list_users(&secret)
        .await
        .map_err(|e| anyhow!("{}", e.user_message("Failed to list users")))?;

    if users.is_empty() {
        println!("No users.");
    }
    for user in users {
        println!("{}", user.phone);
    }
    Ok(())
}
