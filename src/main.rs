use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotdash::{cli, config, types::Term, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the dashboard web server
    Serve(ServeOptions),

    /// Show de-duplicated top tracks
    Tracks(TermOptions),

    /// Show top artists
    Artists(TermOptions),

    /// Show the export table and the latest generated playlist
    Export(TermOptions),

    #[clap(about = "Open the exporter link that refreshes the stored data")]
    Refresh(RefreshOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the dashboard in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TermOptions {
    /// Sampling window: long, medium or short
    #[clap(long, default_value = "long")]
    term: Term,
}

#[derive(Parser, Debug, Clone)]
pub struct RefreshOptions {
    /// Also recreate the playlist for this sampling window
    #[clap(long)]
    term: Option<Term>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();
    let settings = config::load_settings();

    match cli.command {
        Command::Serve(opt) => cli::serve(settings, opt.open).await,
        Command::Tracks(opt) => cli::tracks(&settings, opt.term).await,
        Command::Artists(opt) => cli::artists(&settings, opt.term).await,
        Command::Export(opt) => cli::export(&settings, opt.term).await,
        Command::Refresh(opt) => cli::refresh(&settings, opt.term),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
