//! edx — Batch Line Editor
//!
//! Reads a stream of commands from standard input and writes `print`
//! output, byte for byte, to standard output. See the workspace
//! documentation for the wire format.
//!
//! # Usage
//! ```bash
//! edx < script.ed
//! ```

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edx_config::{Config, ConfigLoader};

/// edx CLI arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose (info-level) logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path (in addition to stderr)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logging(&args, &config) {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting edx");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = BufWriter::new(io::stdout().lock());

    let code = match edx::run(&config, &mut reader, &mut writer) {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "fatal error");
            ExitCode::FAILURE
        }
    };

    info!("edx exiting");
    code
}

/// Loads configuration from `--config`, or the platform default location.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new().context("failed to resolve default config path")?,
    };
    loader.load().context("failed to load config file")
}

/// Sets up level-filtered logging to stderr, optionally duplicated to a
/// daily-rolling file. Standard output is never touched: it is reserved for
/// `print` command output.
fn setup_logging(args: &Args, config: &Config) -> anyhow::Result<()> {
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        config.logging.level.parse().unwrap_or(Level::WARN)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let subscriber = tracing_subscriber::registry().with(filter);

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    let log_path = args.log_file.clone().or_else(|| config.logging.file.clone());

    if let Some(log_path) = log_path {
        let dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let file_name = log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("edx.log"));
        let file_appender = tracing_appender::rolling::daily(dir, file_name);
        let file_layer = fmt::layer().json().with_writer(file_appender);
        subscriber.with(stderr_layer).with(file_layer).init();
    } else {
        subscriber.with(stderr_layer).init();
    }

    Ok(())
}
