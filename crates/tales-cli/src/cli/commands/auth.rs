//! `tales login|register|logout|status` handlers.
//!
//! These drive the same session controller as the TUI, one request at a time.
//! Unlike the TUI, a token that cannot be saved or removed fails the command.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use tales_core::api::{AuthAction, Backend, BackendClient};
use tales_core::config::Config;
use tales_core::session::{FileSessionStore, SessionController, SessionStore, run_auth};

pub async fn login(config: &Config, phone: &str, password: Option<String>) -> Result<()> {
    authenticate(config, AuthAction::Login, phone, password).await
}

pub async fn register(config: &Config, phone: &str, password: Option<String>) -> Result<()> {
    authenticate(config, AuthAction::Register, phone, password).await
}

async fn authenticate(
    config: &Config,
    action: AuthAction,
    phone: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    let client = BackendClient::from_config(config)?;
    let mut controller = SessionController::initialize(FileSessionStore::default_location());
    controller.set_phone(phone);
    controller.set_password(password);

    let message = sign_in(&mut controller, &client, action).await?;
    println!("{message}");
    Ok(())
}

/// Runs one auth attempt and returns the confirmation to print.
async fn sign_in<S, B>(
    controller: &mut SessionController<S>,
    backend: &B,
    action: AuthAction,
) -> Result<&'static str>
where
    S: SessionStore,
    B: Backend,
{
    run_auth(controller, backend, action)
        .await
        .context("save session token")?;

    if let Some(error) = controller.error() {
        bail!("{error}");
    }
    if !controller.is_authenticated() {
        bail!("{}", action.failure_message());
    }

    Ok(match action {
        AuthAction::Login => "Logged in.",
        AuthAction::Register => "Registered and logged in.",
    })
}

/// Reads one line from stdin, prompting only when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush().ok();
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout() -> Result<()> {
    let mut controller = SessionController::initialize(FileSessionStore::default_location());
    println!("{}", sign_out(&mut controller)?);
    Ok(())
}

fn sign_out<S: SessionStore>(controller: &mut SessionController<S>) -> Result<&'static str> {
    let was_authenticated = controller.is_authenticated();
    controller.logout().context("remove session token")?;

    Ok(if was_authenticated {
        "Logged out."
    } else {
        "Not logged in."
    })
}

pub fn status() {
    let store = FileSessionStore::default_location();
    let path = store.path().to_path_buf();
    let controller = SessionController::initialize(store);

    if controller.is_authenticated() {
        println!("Logged in (token at {}).", path.display());
    } else {
        println!("Not logged in.");
    }
}
