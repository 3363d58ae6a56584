//! Selclip - cut annotated clips out of field recordings.
//!
//! A recording and its tab-separated annotation table are read from an
//! object store. Every annotated event is trimmed out of the recording,
//! encoded as a 16-bit WAV and uploaded under a key built from the event's
//! labels.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod store;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{
    Config, CredentialsConfig, config_file_path, load_config_file, save_config, validate_config,
};
use std::path::Path;
use tracing::debug;

pub use error::{Error, Result};

/// Main entry point for the selclip CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config_path = match cli.config {
        Some(path) => path,
        None => config_file_path()?,
    };
    debug!("Using configuration file {}", config_path.display());

    match cli.command {
        Command::Extract(args) => {
            let config = load_config_file(&config_path)?;
            validate_config(&config)?;

            let result = clipper::command::execute(&args, &config);
            if let Err(e) = &result
                && args.output_mode.is_structured()
            {
                output::emit_json_error(e);
            }
            result
        }
        Command::Config { action } => handle_config_command(action, &config_path),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // The AWS SDK is chatty at debug level; keep it at warn unless -vv.
    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info,aws=warn",
            1 => "debug,aws=warn",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout carries clip keys and JSON envelopes
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(action: ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config {
                    credentials: CredentialsConfig {
                        access_key: Some(String::new()),
                        secret_access_key: Some(String::new()),
                    },
                    ..Config::default()
                };
                save_config(&config, path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  Fill in [credentials] access_key and secret_access_key");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(path)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
