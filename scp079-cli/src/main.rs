//! `scp079`: one JSON request in, one JSON envelope out.
//!
//! The request comes from `--payload` or standard input. Standard output
//! carries exactly one JSON document; logs, `--help` and `--version` go
//! to standard error. Bad input, bad arguments and a broken config file
//! are all reported in-band and the process still exits 0.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use scp079_core::{Engine, EngineConfig, EngineError, Envelope};

#[derive(Parser, Debug)]
#[command(name = "scp079", version)]
#[command(about = "Deterministic in-character responses for the SCP-079 persona", long_about = None)]
struct Cli {
    /// Request JSON. Read from standard input when absent.
    #[arg(short, long)]
    payload: Option<String>,

    /// Path to an scp079.toml configuration file.
    #[arg(short, long, env = "SCP079_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the envelope.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Enable debug logging on standard error.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Standard output is reserved for the envelope.
            eprint!("{}", err.render());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let engine = Engine::default();
            let failure = engine.error_response(&EngineError::Config(err.to_string()));
            return finish(&engine.render_envelope(&Envelope::Failure(failure), false));
        }
    };

    let (config, config_error) = match cli.config.as_deref().map(load_config).transpose() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (EngineConfig::default(), Some(err)),
    };
    init_tracing(&config.general.log_level, cli.verbose);
    if let Some(err) = config_error {
        warn!("config not loaded, using defaults: {err:#}");
    }

    let engine = Engine::new(config);
    let output = match read_payload(cli.payload) {
        Ok(raw) => {
            debug!(bytes = raw.len(), "payload read");
            engine.render(&raw, cli.pretty)
        }
        Err(err) => {
            warn!(error = %err, "payload not read");
            let failure = engine.error_response(&EngineError::Io(err));
            engine.render_envelope(&Envelope::Failure(failure), cli.pretty)
        }
    };
    finish(&output)
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    EngineConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

fn read_payload(arg: Option<String>) -> io::Result<String> {
    if let Some(payload) = arg {
        return Ok(payload);
    }
    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    Ok(raw)
}

fn init_tracing(default_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    // A subscriber may already be installed when embedded; that is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit(document: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{document}").context("writing envelope to stdout")?;
    stdout.flush().context("flushing stdout")?;
    Ok(())
}

fn finish(document: &str) -> ExitCode {
    match emit(document) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("scp079: {err:#}");
            ExitCode::FAILURE
        }
    }
}
