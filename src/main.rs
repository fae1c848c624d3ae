use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("primer_clip=debug,info")
    } else {
        EnvFilter::new("primer_clip=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Clip(args) => {
            cli::clip::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Patterns(args) => {
            cli::patterns::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
