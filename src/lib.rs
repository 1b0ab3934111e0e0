pub mod cli;
pub mod config;
pub mod intake;
pub mod models;
pub mod report;
pub mod severity;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Intake(#[from] intake::IntakeError),

    #[error("Cannot read input ({0}): {1}")]
    Input(String, String),

    #[error("Cannot render report: {0}")]
    Output(String),
}

pub fn run() -> Result<(), AppError> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let args = cli::Cli::parse();
    let json = cli::execute(&args)?;
    println!("{json}");
    Ok(())
}
