//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use tales_core::session::FontMode;
use tales_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "tales")]
#[command(version)]
#[command(about = "Terminal client for the items and Horror Tales backends")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Credentials shared by `login` and `register`.
#[derive(clap::Args, Debug)]
struct AuthArgs {
    /// Phone number (exactly 10 digits)
    #[arg(long)]
    phone: String,

    /// Password (read from stdin when omitted)
    #[arg(long, env = "TALES_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive story view (default)
    Story,

    /// Browse items from the backend
    Items {
        #[command(subcommand)]
        command: ItemsCommands,
    },

    /// Log in and store the session token
    Login(AuthArgs),

    /// Create an account and store the session token
    Register(AuthArgs),

    /// Remove the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Print the story (requires a stored session)
    Read {
        /// Font mode: normal, dyslexia or adhd
        #[arg(long, default_value_t = FontMode::Normal)]
        mode: FontMode,
    },

    /// List registered users (dev-only endpoint)
    Users {
        /// Admin secret (falls back to `admin_secret` in config)
        #[arg(long, env = "TALES_ADMIN_SECRET", hide_env_values = true)]
        secret: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ItemsCommands {
    /// Fetch and print all items
    List {
        /// Print raw JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Fetch and print a single item
    Show {
        /// The ID of the item to show
        #[arg(value_name = "ITEM_ID")]
        id: i64,

        /// Print raw JSON instead of a card
        #[arg(long)]
        json: bool,
    },
    /// Open the interactive item list
    Browse,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; a read-only home must not block the command.
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the story view
    let Some(command) = cli.command else {
        return commands::story::run(&config).await;
    };

    tracing::debug!(base_url = %config.base_url, "dispatching command");

    match command {
        Commands::Story => commands::story::run(&config).await,

        Commands::Items { command } => match command {
            ItemsCommands::List { json } => commands::items::list(&config, json).await,
            ItemsCommands::Show { id, json } => commands::items::show(&config, id, json).await,
            ItemsCommands::Browse => commands::items::browse(&config).await,
        },

        Commands::Login(args) => {
            commands::auth::login(&config, &args.phone, args.password).await
        }
        Commands::Register(args) => {
            commands::auth::register(&config, &args.phone, args.password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Status => {
            commands::auth::status();
            Ok(())
        }

        Commands::Read { mode } => commands::story::read(mode),

        Commands::Users { secret } => commands::users::list(&config, secret).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
