//! Branta CLI: zero-knowledge envelopes and request signatures
//!
//! Usage:
//!   branta seal [--passphrase <P>] [VALUE]
//!   branta open --passphrase <P> [ENVELOPE]
//!   branta inspect [ENVELOPE]
//!   branta sign --url <URL> --secret <S> [--method POST] [--body <JSON>] [--timestamp <SECS>]
//!   branta passphrase
//!
//! VALUE / ENVELOPE are read from stdin when omitted.
//!
//! Environment:
//!   BRANTA_PASSPHRASE   - default for --passphrase
//!   BRANTA_HMAC_SECRET  - default for --secret
//!   BRANTA_LOG_FORMAT   - "json" for structured logging, "pretty" for dev
//!   RUST_LOG            - log filter (default: warn)

use std::io::{self, Read};
use std::process::ExitCode;

use branta_zk::{
    envelope, sign_serialized, Clock, FixedClock, Passphrase, SystemClock, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
use clap::{Parser, Subcommand};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "branta", version, about = "Zero-knowledge payment envelopes and HMAC request signing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seal a value; prints the base64 envelope
    Seal {
        /// Passphrase; a random one is generated (and printed to stderr) if omitted
        #[arg(long, short, env = "BRANTA_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
        value: Option<String>,
    },
    /// Open an envelope; prints the plaintext
    Open {
        #[arg(long, short, env = "BRANTA_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
        envelope: Option<String>,
    },
    /// Show envelope layout (no decryption)
    Inspect { envelope: Option<String> },
    /// Sign a request; prints the two HMAC headers
    Sign {
        #[arg(long, short, default_value = "POST")]
        method: String,
        /// Full request URL, origin included
        #[arg(long, short)]
        url: String,
        /// JSON body exactly as it will be sent
        #[arg(long, short, default_value = "null")]
        body: String,
        #[arg(long, short, env = "BRANTA_HMAC_SECRET", hide_env_values = true)]
        secret: String,
        /// Unix seconds; defaults to now
        #[arg(long, short)]
        timestamp: Option<u64>,
    },
    /// Generate a random passphrase
    Passphrase,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Seal { passphrase, value } => cmd_seal(passphrase, value),
        Command::Open {
            passphrase,
            envelope,
        } => cmd_open(&passphrase, envelope),
        Command::Inspect { envelope } => cmd_inspect(envelope),
        Command::Sign {
            method,
            url,
            body,
            secret,
            timestamp,
        } => cmd_sign(&method, &url, &body, &secret, timestamp),
        Command::Passphrase => {
            println!("{}", Passphrase::generate().as_str());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let log_format = std::env::var("BRANTA_LOG_FORMAT").unwrap_or_else(|_| "pretty".into());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// Argument if given, else stdin with the trailing newline stripped.
fn arg_or_stdin(arg: Option<String>) -> io::Result<String> {
    match arg {
        Some(v) => Ok(v),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn cmd_seal(passphrase: Option<String>, value: Option<String>) -> CliResult {
    let value = arg_or_stdin(value)?;
    let passphrase = match passphrase {
        Some(p) => Passphrase::from(p),
        None => {
            let p = Passphrase::generate();
            eprintln!("Generated passphrase (save this, it cannot be recovered):");
            eprintln!("  {}", p.as_str());
            p
        }
    };

    let sealed = envelope::seal(&value, passphrase.as_str())?;
    println!("{}", sealed);
    Ok(())
}

fn cmd_open(passphrase: &str, input: Option<String>) -> CliResult {
    let text = arg_or_stdin(input)?;
    let value = envelope::open(text.trim(), passphrase)?;
    println!("{}", value);
    Ok(())
}

fn cmd_inspect(input: Option<String>) -> CliResult {
    let text = arg_or_stdin(input)?;
    let info = envelope::inspect(text.trim())?;
    println!("{}", info);
    Ok(())
}

fn cmd_sign(method: &str, url: &str, body: &str, secret: &str, timestamp: Option<u64>) -> CliResult {
    serde_json::from_str::<serde_json::Value>(body).map_err(|e| format!("--body is not JSON: {}", e))?;

    let clock: Box<dyn Clock> = match timestamp {
        Some(ts) => Box::new(FixedClock(ts)),
        None => Box::new(SystemClock),
    };
    let sig = sign_serialized(method, url, body, secret, &*clock)?;

    println!("{}: {}", SIGNATURE_HEADER, sig.signature);
    println!("{}: {}", TIMESTAMP_HEADER, sig.timestamp);
    Ok(())
}
