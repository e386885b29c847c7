mod classifier;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod reports;
mod settings;
mod vendor;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ReportCommands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file, skip_invalid } => cli::import::run(&file, skip_invalid),
        Commands::Report { command } => match command {
            ReportCommands::Top { limit } => cli::report::top(limit),
            ReportCommands::Monthly { year } => cli::report::monthly(year),
            ReportCommands::Yearly => cli::report::yearly(),
            ReportCommands::Vendors { limit } => cli::report::vendors(limit),
            ReportCommands::Types => cli::report::types(),
            ReportCommands::Sizes => cli::report::sizes(),
            ReportCommands::All => cli::report::all(),
            ReportCommands::Years => cli::report::years(),
            ReportCommands::Group { name } => cli::report::group(&name),
        },
        Commands::Export { output } => cli::export::run(output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
