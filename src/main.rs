// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! multiOTP agent - Main entry point

use clap::Parser;
use multiotp_agent::{
    cli::{apply_cli_overrides, execute, Cli, Outcome},
    config::Config,
    logging::init_logger,
    multiotp::MultiOtp,
};
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => apply_cli_overrides(config, &cli),
        Err(e) => return report(&cli, Outcome::failure(cli.command.name(), &e)),
    };

    if let Err(e) = init_logger(cli.verbose, cli.quiet, &config.logging.level) {
        eprintln!("{}", e);
    }

    match config.source {
        Some(ref path) => info!("Loaded configuration from: {}", path.display()),
        None => info!("Using built-in configuration defaults"),
    }
    debug!("Final configuration: {:#?}", config);

    let otp = MultiOtp::new(config.binary_path());

    let outcome = match execute(&otp, &cli.command, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{} failed: {}", cli.command.name(), e);
            Outcome::failure(cli.command.name(), &e)
        }
    };

    report(&cli, outcome)
}

/// Print the outcome and map it to the process exit code
fn report(cli: &Cli, outcome: Outcome) -> ExitCode {
    match outcome.render(cli.json) {
        Ok(text) if outcome.success || cli.json => println!("{}", text),
        Ok(text) => eprintln!("{}", text),
        Err(e) => eprintln!("{}", e),
    }

    if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
