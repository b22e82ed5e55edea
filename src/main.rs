use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use podgen::{pipeline, Config};

#[derive(Parser, Debug)]
#[command(name = "podgen", about = "Builds a podcast episode catalog from an RSS feed")]
struct Args {
    /// Path to the configuration file
    #[arg(long, value_name = "FILE", default_value = "podgen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the feed and rebuild the catalog document
    Build,
    /// Re-derive and normalize the existing catalog in place
    Cleanup,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    match args.command {
        Command::Build => pipeline::run_build(&config).await?,
        Command::Cleanup => pipeline::run_cleanup(&config)?,
    }

    Ok(())
}
