use clap::Parser;
use std::io::Write;
use schemaform::cli::Cli;
use schemaform::commands::{self, Outcome};
use schemaform::config::Settings;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;

    // Initialize tracing; stdout is reserved for command output
    let level = settings.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let outcome = commands::run(&cli, &settings, &mut stdout)?;

    if outcome == Outcome::Invalid {
        stdout.flush()?;
        std::process::exit(outcome.exit_code());
    }
    Ok(())
}
