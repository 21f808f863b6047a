mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod output;
mod utils;

use crate::cli::{Cli, Commands, GlobalOptions};
use crate::commands::AppContext;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let options = &cli.options;
    logging::setup_logging(options.verbose, options.quiet, options.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("Skinprint CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = dispatch(cli);
    match &result {
        Ok(()) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    result
}

fn context(options: &GlobalOptions) -> Result<AppContext> {
    let data_manager = DataManager::new()?;
    let app_config = config::build_config(options, &data_manager)?;
    AppContext::from_config(&app_config)
}

fn dispatch(cli: Cli) -> Result<()> {
    let options = &cli.options;
    match cli.command {
        Commands::Data(args) => commands::data::run(args),
        Commands::Check(args) => commands::check::run(args, &context(options)?),
        Commands::Ingredients(args) => commands::ingredients::run(args, &context(options)?),
        Commands::Products(args) => commands::products::run(args, &context(options)?),
        Commands::Analyze(args) => commands::analyze::run(args, &context(options)?),
        Commands::Routine(args) => commands::routine::run(args, &mut context(options)?),
        Commands::Prefs(args) => commands::prefs::run(args, &mut context(options)?),
        Commands::Checkin(args) => commands::checkin::run(args, &mut context(options)?),
        Commands::Scan(args) => commands::scan::run(args, &mut context(options)?),
        Commands::Matrix(args) => commands::matrix::run(args, &context(options)?),
        Commands::Circles(args) => commands::circles::run(args, &context(options)?),
        Commands::Fingerprint(args) => commands::fingerprint::run(args, &context(options)?),
        Commands::Onboard(args) => commands::onboard::run(args, &mut context(options)?),
    }
}
