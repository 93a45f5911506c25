//! modelprefs - AI model preferences over GraphQL
//!
//! Lets a user choose which AI model backs code completion and which backs
//! chat, either from a ratatui settings panel or from headless subcommands.
//! Choices are stored server-side; an empty choice means "System Default".

pub mod api;
pub mod app;
pub mod config;
pub mod notify;
pub mod panel;
pub mod paths;
pub mod tui;

pub use app::App;
pub use config::Config;
pub use panel::ModelPreferencesPanel;
