//! # CLI Module
//!
//! Command-line access to the same exported data the web pages show.
//!
//! ## Commands
//!
//! - [`serve`] - starts the dashboard web server, optionally opening it in
//!   the browser
//! - [`tracks`] - de-duplicated top tracks for one sampling window
//! - [`artists`] - top artists for one sampling window
//! - [`export`] - the export table and the latest generated playlist
//! - [`refresh`] - opens the exporter's refresh link in the browser
//!
//! The CLI runs as the operator of the deployment, so it does not go through
//! the session gate. Storage failures are fatal and end the process with
//! status 1.
//!
//! ## Usage
//!
//! ```bash
//! spotdash serve --open
//! spotdash tracks --term short
//! spotdash export --term "Medium Term"
//! spotdash refresh --term long
//! ```

mod artists;
mod export;
mod refresh;
mod serve;
mod tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use artists::artists;
pub use export::export;
pub use refresh::refresh;
pub use serve::serve;
pub use tracks::tracks;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
