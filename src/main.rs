mod classifier;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod ledger;
mod models;
mod parser;
mod reports;
mod session;
mod settings;
mod store;

use std::io::stderr;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use cli::{Cli, Commands};
use settings::load_settings;

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{level}', defaulting to 'warn'");
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries command output; logs go to stderr.
    let terminal_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn main() {
    let cli = Cli::parse();

    let level = cli.log_level.clone().unwrap_or_else(|| load_settings().log_level);
    setup_logging(parse_log_level(&level));

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Login { email } => cli::auth::login(&email),
        Commands::Logout => cli::auth::logout(),
        Commands::Dashboard { filter } => cli::dashboard::run(&filter),
        Commands::Add {
            amount,
            description,
            category,
            kind,
            date,
        } => cli::transactions::add(
            &amount,
            description.as_deref(),
            category.as_deref(),
            kind.as_deref(),
            date.as_deref(),
        ),
        Commands::List { filter } => cli::transactions::list(&filter),
        Commands::Delete { id } => cli::transactions::delete(id),
        Commands::Import { file, preview } => cli::import::run(&file, preview),
        Commands::Categories => cli::categories::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
