//! Spotify Listening Dashboard Library
//!
//! This library serves a small, password-gated dashboard over listening
//! statistics that an upstream exporter has already written to Azure Blob
//! Storage. It reads the exported JSON objects, reshapes them for display and
//! renders them either as HTML pages or as terminal tables.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and page rendering
//! - `cli` - Command-line interface implementations
//! - `config` - Settings loaded from the environment and `.env` files
//! - `error` - Error taxonomy shared by every layer
//! - `readers` - Typed readers on top of the blob reader
//! - `server` - Router, session middleware and listener
//! - `session` - Per-session login gate
//! - `storage` - Blob storage client
//! - `types` - Data structures and type definitions
//! - `utils` - De-duplication, export reshaping and URL helpers
//!
//! # Example
//!
//! ```
//! use spotdash::{config, readers, types::Term};
//!
//! #[tokio::main]
//! async fn main() -> spotdash::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::load_settings();
//!     let tracks = readers::load_top_tracks(&settings, Term::Short).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod readers;
pub mod server;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;

pub use error::{DashboardError, Result};

/// A convenient Result type alias for top-level plumbing.
///
/// Used where failures of different origins meet (startup, binding the
/// listener, loading `.env` files) and only need to be reported. Library
/// operations return [`Result`] with a [`DashboardError`] instead.
///
/// # Example
///
/// ```
/// use spotdash::Res;
///
/// async fn start() -> Res<()> {
///     Ok(())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Reading {} from storage", key);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Dashboard listening on {}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command line uses this macro. Request handlers must report
/// failures with [`warning!`] and keep serving.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}", addr);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Login attempt rejected for session {}", id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
