use clap::Parser;
use miette::Result;
use strata::cli::{Cli, Commands};
use strata::output::Printer;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => strata::cli::build::run(args, &printer)?,
        Commands::Validate(args) => strata::cli::validate::run(args, &printer)?,
        Commands::Init(args) => strata::cli::init::run(args, &printer)?,
        Commands::Completions(args) => strata::cli::completions::run(args)?,
    }

    Ok(())
}
