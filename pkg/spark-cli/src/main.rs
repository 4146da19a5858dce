#![warn(clippy::pedantic)]

//! Command line tool for creating, inspecting and spending Spark notes

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.json_logs);

    cli.run()
}

/// Logs go to stderr so stdout only ever carries command output
fn setup_logging(json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt).init();
    }
}
