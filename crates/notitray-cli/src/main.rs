//! Notitray CLI
//!
//! Talks to the notifications API through a [`Coordinator`] and prints the
//! resulting tray state. Every command runs its operations in order and then
//! renders the store, either as a short summary or as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notitray_client::HttpApi;
use notitray_core::config::{Config, Directories};
use notitray_core::{Coordinator, ListQuery, NotificationId, NotificationState, Store};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Notification tray client
#[derive(Parser)]
#[command(name = "notitray")]
#[command(about = "Notitray - unread notifications from the command line")]
#[command(version)]
#[command(after_help = "\
Examples:
  notitray counts                 Show unread counts per tab
  notitray list --page 2          Show the second page of the selected app
  notitray list --app grades      List grade notifications
  notitray seen                   Mark the selected app as seen
  notitray read 42                Mark notification 42 as read
  notitray read-all               Mark every notification of the app as read
  notitray sync --json            Fetch counts and the first page, print JSON
  notitray config --init          Write a default config file
")]
struct Cli {
    /// Config file (defaults to ~/.config/notitray/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print the full state as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch unread counts per tab
    Counts,

    /// Fetch a page of notifications
    List {
        /// App to list (defaults to the configured app)
        #[arg(long)]
        app: Option<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Items per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Mark every notification of an app as seen
    Seen {
        /// App name (defaults to the configured app)
        app: Option<String>,
    },

    /// Mark a single notification as read
    Read {
        /// Notification ID
        id: NotificationId,

        /// App the notification belongs to
        #[arg(long)]
        app: Option<String>,
    },

    /// Mark every notification of an app as read
    #[command(name = "read-all")]
    ReadAll {
        /// App name (defaults to the configured app)
        app: Option<String>,
    },

    /// Fetch counts and the first page of the configured app
    Sync,

    /// Show or create the config file
    Config {
        /// Write the effective config to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Default `EnvFilter` directive when `RUST_LOG` is unset
fn default_log_directive(verbose: bool) -> String {
    let level = if verbose || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };
    format!("notitray={level}")
}

fn setup_logging(verbose: bool, dirs: &Directories) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)));

    if cfg!(debug_assertions) && std::fs::create_dir_all(&dirs.cache).is_ok() {
        let file_appender = tracing_appender::rolling::never(&dirs.cache, "notitray.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .with(filter)
            .init();

        debug!("Logging to {}", dirs.cache.join("notitray.log").display());
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
        None
    }
}

/// Load the config file and apply command line overrides
fn load_config(cli: &Cli, dirs: &Directories) -> Result<(Config, PathBuf)> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| dirs.config_file.clone());
    let mut config =
        Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
    }
    config.validate().context("Invalid configuration")?;
    Ok((config, path))
}

fn print_counts(state: &NotificationState) {
    if state.tabs_count.is_empty() {
        println!("No counts loaded");
        return;
    }
    for (tab, count) in state.tabs_count.iter() {
        println!("{tab:<16} {count}");
    }
    if state.show_notification_tray {
        println!("\nTray: visible");
    } else {
        println!("\nTray: hidden");
    }
}

fn print_list(state: &NotificationState) {
    let pagination = &state.pagination;
    println!(
        "{} - page {}/{} ({} total)",
        state.app_name, pagination.current_page, pagination.num_pages, pagination.count
    );
    for notification in state.selected_notifications() {
        let marker = if notification.is_read() { ' ' } else { '*' };
        let created = notification
            .created
            .map(|c| c.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{marker} {:>8}  {created:<16}  {}",
            notification.id, notification.notification_type
        );
    }
    if let Some(next) = pagination.next_page {
        println!("\nMore: notitray list --app {} --page {next}", state.app_name);
    }
}

fn print_state(
    state: &NotificationState,
    json: bool,
    summary: fn(&NotificationState),
) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(state).context("Failed to serialize state")?;
        println!("{out}");
    } else {
        summary(state);
    }
    Ok(())
}

fn connect(config: &Config) -> Result<Coordinator<HttpApi>> {
    let api = HttpApi::from_config(&config.api)
        .with_context(|| format!("Invalid API base URL: {}", config.api.base_url))?;
    let store = Store::with_default_app(&config.list.default_app);
    Ok(Coordinator::with_store(api, store))
}

fn show_config(config: &Config, path: &Path, init: bool) -> Result<()> {
    if init {
        config
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
    }
    let out = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dirs = Directories::new_or_temp();
    let _guard = setup_logging(cli.verbose, &dirs);

    let (config, config_path) = load_config(&cli, &dirs)?;
    let default_app = config.list.default_app.as_str();

    match cli.command {
        Commands::Config { init } => show_config(&config, &config_path, init)?,
        Commands::Counts => {
            let coordinator = connect(&config)?;
            coordinator.fetch_counts().await?;
            print_state(&coordinator.snapshot(), cli.json, print_counts)?;
        }
        Commands::List {
            app,
            page,
            page_size,
        } => {
            let coordinator = connect(&config)?;
            let mut query = ListQuery::new(page, page_size.unwrap_or(config.list.page_size));
            if let Some(app) = app {
                query = query.for_app(app);
            }
            coordinator.fetch_list(query).await?;
            print_state(&coordinator.snapshot(), cli.json, print_list)?;
        }
        Commands::Seen { app } => {
            let app = app.as_deref().unwrap_or(default_app);
            connect(&config)?.mark_seen(app).await?;
            println!("Marked {app} as seen");
        }
        Commands::Read { id, app } => {
            let app = app.as_deref().unwrap_or(default_app);
            connect(&config)?.mark_one_read(app, id).await?;
            println!("Marked notification {id} as read");
        }
        Commands::ReadAll { app } => {
            let app = app.as_deref().unwrap_or(default_app);
            connect(&config)?.mark_all_read(app).await?;
            println!("Marked all {app} notifications as read");
        }
        Commands::Sync => {
            let coordinator = connect(&config)?;
            coordinator.fetch_counts().await?;
            coordinator
                .fetch_list(ListQuery::new(1, config.list.page_size))
                .await?;
            print_state(&coordinator.snapshot(), cli.json, |state| {
                print_counts(state);
                println!();
                print_list(state);
            })?;
        }
    }

    Ok(())
}
