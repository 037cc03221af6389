//! # Postboard Main Entry Point
//!
//! Loads posts and users, then reads one command per line from stdin and
//! re-renders the page after every change.

use anyhow::Result;
use postboard::cmd_args::CommandLineArgs;
use postboard::config;
use postboard::events::{TerminalEventSource, COMMAND_USAGE};
use postboard::io::{Dialog, HtmlFilePageSink, PageSink, StdinLines, StdoutPageSink, TerminalDialog};
use postboard::{AppController, EventSource, HttpGateway, PostGateway};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing();

    let api_base = config::get_api_base(cmd_args.base_url());
    let gateway = HttpGateway::new(&api_base)?;

    let lines = StdinLines::spawn();
    let events = TerminalEventSource::new(lines.clone());
    let dialog = TerminalDialog::new(lines);

    if atty::is(atty::Stream::Stdin) {
        eprintln!("📋 Postboard - {api_base}");
        eprintln!("{COMMAND_USAGE}\n");
    }

    match cmd_args.output() {
        Some(path) => {
            let sink = HtmlFilePageSink::new(config::expand_path(path));
            eprintln!("Writing page to {}", sink.path().display());
            run_app(gateway, events, dialog, sink).await
        }
        None => run_app(gateway, events, dialog, StdoutPageSink::new()).await,
    }
}

async fn run_app<G, E, D, S>(gateway: G, events: E, dialog: D, sink: S) -> Result<()>
where
    G: PostGateway,
    E: EventSource,
    D: Dialog,
    S: PageSink,
{
    let mut app = AppController::new(gateway, events, dialog, sink);
    app.run().await
}

/// Initialize tracing to stderr; stdout may be carrying pages
fn init_tracing() {
    let log_level = config::get_log_level();
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| {
        EnvFilter::new(config::DEFAULT_LOG_LEVEL)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Tracing initialized with filter '{log_level}'");
}
