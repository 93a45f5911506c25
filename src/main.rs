//! modelprefs - choose AI models for code completion and chat

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use modelprefs::api::{
    CachedApi, GraphqlClient, Model, ModelCategory, ModelPreferences, PreferencesApi,
    UpdatePreferencesInput,
};
use modelprefs::app::{App, Dispatcher};
use modelprefs::config::Config;
use modelprefs::notify::Notification;
use modelprefs::panel::SYSTEM_DEFAULT_LABEL;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Choose the AI models used for code completion and chat
#[derive(Debug, Parser)]
#[command(name = "modelprefs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GraphQL endpoint (overrides the config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Bearer token (overrides the config file and environment)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Path to config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the stored preferences
    Show,
    /// List available models
    Models {
        /// Only list one category (completion or chat)
        #[arg(long)]
        category: Option<ModelCategory>,
    },
    /// Store new preferences; an omitted or empty flag means system default
    Set {
        /// Code completion model
        #[arg(long, value_name = "NAME")]
        completion: Option<String>,
        /// Chat model
        #[arg(long, value_name = "NAME")]
        chat: Option<String>,
    },
    /// Reset both preferences to the system default
    Reset,
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {e}\n");
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = load_config(&cli)?;
    let client = GraphqlClient::new(
        config.endpoint.clone(),
        config.token.clone(),
        config.request_timeout(),
    );
    tracing::info!(endpoint = client.endpoint(), "Starting modelprefs");

    match cli.command {
        None => {
            let dispatcher = Dispatcher::new(CachedApi::new(client));
            modelprefs::tui::run(App::new(config), &dispatcher)
        }
        Some(Commands::Show) => {
            let prefs = client
                .user_model_preferences()
                .context("Failed to load model preferences")?;
            print!("{}", format_preferences(prefs.as_ref()));
            Ok(())
        }
        Some(Commands::Models { category }) => {
            let categories = category.map_or_else(|| ModelCategory::ALL.to_vec(), |c| vec![c]);
            let mut out = String::new();
            for category in categories {
                let models = client
                    .available_models(category)
                    .with_context(|| format!("Failed to load {category} models"))?;
                out.push_str(&format_catalog(category, &models));
            }
            print!("{out}");
            Ok(())
        }
        Some(Commands::Set { completion, chat }) => {
            let input = set_input(completion, chat);
            for category in ModelCategory::ALL.iter().copied() {
                let choice = match category {
                    ModelCategory::Completion => input.completion_model.as_deref(),
                    ModelCategory::Chat => input.chat_model.as_deref(),
                };
                if let Some(name) = choice {
                    let models = client
                        .available_models(category)
                        .with_context(|| format!("Failed to load {category} models"))?;
                    validate_choice(category, name, &models)?;
                }
            }
            let prefs = client
                .update_user_model_preferences(&input)
                .context(Notification::UPDATE_FAILED.description)?;
            println!("{}", Notification::UPDATED.description);
            print!("{}", format_preferences(Some(&prefs)));
            Ok(())
        }
        Some(Commands::Reset) => {
            client
                .reset_user_model_preferences()
                .context(Notification::RESET_FAILED.description)?;
            println!("{}", Notification::RESET.description);
            Ok(())
        }
    }
}

/// Log to `<tmp>/modelprefs.log` - tail with: tail -f /tmp/modelprefs.log
/// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug);
/// `RUST_LOG` directives refine it.
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    if debug_level == 0 {
        return;
    }

    let level = match debug_level {
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    let log_path = modelprefs::paths::log_path();
    // Clear the log file on startup
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }
    let (Some(dir), Some(file_name)) = (log_path.parent(), log_path.file_name()) else {
        return;
    };

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
}

/// File, then environment, then flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    config.apply_overrides(cli.endpoint.clone(), cli.token.clone());
    Ok(config)
}

fn display_choice(choice: Option<&str>) -> &str {
    choice.unwrap_or(SYSTEM_DEFAULT_LABEL)
}

fn format_preferences(prefs: Option<&ModelPreferences>) -> String {
    let Some(prefs) = prefs else {
        return format!("No preferences stored; using {SYSTEM_DEFAULT_LABEL} for both.\n");
    };
    let mut out = String::new();
    for &category in ModelCategory::ALL {
        let label = format!("{}:", category.label());
        let _ = writeln!(
            out,
            "{label:<17}{}",
            display_choice(prefs.model_for(category))
        );
    }
    let _ = writeln!(
        out,
        "{:<17}{}",
        "Last updated:",
        prefs.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

fn format_catalog(category: ModelCategory, models: &[Model]) -> String {
    let mut out = format!("{}\n", category.label());
    if models.is_empty() {
        out.push_str("  (no models available)\n");
    }
    for model in models {
        let tier = model
            .performance_tier
            .as_ref()
            .map(|tier| format!(" [{tier}]"))
            .unwrap_or_default();
        let _ = writeln!(out, "  {}{tier}", model.display_label());
    }
    out
}

/// An empty name means the system default, sent as null
fn set_input(completion: Option<String>, chat: Option<String>) -> UpdatePreferencesInput {
    UpdatePreferencesInput {
        completion_model: completion.filter(|name| !name.is_empty()),
        chat_model: chat.filter(|name| !name.is_empty()),
    }
}

fn validate_choice(category: ModelCategory, name: &str, models: &[Model]) -> Result<()> {
    if models.iter().any(|m| m.model_name == name) {
        return Ok(());
    }
    let known: Vec<&str> = models.iter().map(|m| m.model_name.as_str()).collect();
    bail!(
        "unknown {category} model '{name}' (available: {})",
        if known.is_empty() {
            "none".to_string()
        } else {
            known.join(", ")
        }
    )
}
