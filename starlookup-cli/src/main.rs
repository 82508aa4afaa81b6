mod config;
mod serve;

use std::process::ExitCode;

use clap::{
    builder::styling,
    CommandFactory,
    Parser,
};
use color_eyre::eyre::Error;
use tracing_subscriber::EnvFilter;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

const AFTER_HELP: &str = "\
Examples:
  starlookup -t postgres -d star-database -u database-user-name --pass database-user-password -p 8008
  starlookup -t sqlite -d star-database.sqlite -p 8008";

/// Star lookup server
///
/// Serves single stars from a HYG-style catalog table at `/star/{id}`.
#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), styles = STYLES, after_help = AFTER_HELP)]
pub struct Args {
    #[command(flatten)]
    options: crate::serve::ServeOptions,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match args.options.config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}\n");
            Args::command().print_help()?;
            return Ok(ExitCode::from(2));
        }
    };

    crate::serve::run(&config).await?;

    Ok(ExitCode::SUCCESS)
}
