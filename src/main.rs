//! trustkey CLI.
//!
//! Derives cache keys for request arguments given as JSON on stdin.
//!
//! Exit codes: 0 key derived, 1 unreadable input, 2 not cacheable.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use trustkey::{digest, logging, ArgValue, KeyDeriver, Limits};

/// Exit code for arguments that cannot be keyed.
const EXIT_NOT_CACHEABLE: u8 = 2;

#[derive(Parser)]
#[command(name = "trustkey")]
#[command(about = "Canonical cache keys for trust-score request arguments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy)]
struct LimitArgs {
    /// Maximum nesting depth of arrays/objects; stdin input deeper than
    /// 128 levels is already refused by the JSON reader (exit 1)
    #[arg(long)]
    max_depth: Option<u64>,

    /// Maximum number of values in the argument
    #[arg(long)]
    max_nodes: Option<u64>,
}

impl LimitArgs {
    fn limits(self) -> Limits {
        let defaults = Limits::default();
        Limits {
            max_nesting_depth: self.max_depth.unwrap_or(defaults.max_nesting_depth),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
            ..defaults
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cache key of the JSON document on stdin
    Derive {
        /// Bind the key to an operation name
        #[arg(long)]
        scope: Option<String>,

        /// Print the SHA-256 hex digest of the key instead of the key
        #[arg(long)]
        digest: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Report whether the JSON document on stdin is cacheable
    Check {
        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Derive {
            scope,
            digest,
            limits,
        }) => cmd_derive(scope.as_deref(), digest, limits.limits()),
        Some(Commands::Check { limits }) => cmd_check(limits.limits()),
        Some(Commands::Version) => {
            println!("trustkey v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("trustkey v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn read_args() -> Result<ArgValue> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("read stdin")?;
    let value: serde_json::Value =
        serde_json::from_str(&input).context("parse request arguments as JSON")?;
    Ok(ArgValue::from(value))
}

fn cmd_derive(scope: Option<&str>, as_digest: bool, limits: Limits) -> Result<ExitCode> {
    let args = read_args()?;
    let deriver = KeyDeriver::new(limits);

    let key = match scope {
        Some(scope) => deriver.derive_scoped_key(scope, &args),
        None => deriver.derive_key(&args),
    };

    match key {
        Some(key) if as_digest => println!("{}", digest::sha256_hex(&key)),
        Some(key) => println!("{}", key),
        None => {
            eprintln!("not cacheable");
            return Ok(ExitCode::from(EXIT_NOT_CACHEABLE));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(limits: Limits) -> Result<ExitCode> {
    let args = read_args()?;

    match KeyDeriver::new(limits).canonicalize(&args) {
        Ok(_) => {
            println!("{}", json!({ "ok": true }));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!(
                "{}",
                json!({ "err": { "code": err.code(), "name": err.name(), "detail": err.to_string() } })
            );
            Ok(ExitCode::from(EXIT_NOT_CACHEABLE))
        }
    }
}
