mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use crate::cli::{Cli, Commands};
use crate::config::PartialAppConfig;
use crate::error::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("protmod CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = PartialAppConfig::load(cli.config.as_deref())?.merge_with_cli(&cli)?;
    debug!("Resolved configuration: {:?}", &config);

    let registry = commands::build_registry(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::List(args) => commands::list::run(args, &registry, &config, &mut out)?,
        Commands::Show(args) => commands::show::run(args, &registry, &config, &mut out)?,
        Commands::Ids(args) => commands::ids::run(args, &registry, &mut out)?,
        Commands::Search(args) => commands::search::run(args, &registry, &mut out)?,
        Commands::Export(args) => {
            let rows = commands::export::run(args, &registry)?;
            writeln!(
                out,
                "Exported {} modification(s) to {}",
                rows,
                args.output.display()
            )?;
        }
    }
    out.flush()?;

    Ok(())
}
