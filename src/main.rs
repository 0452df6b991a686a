//! pq_tx_demo - sign and verify one transaction with a fresh Dilithium wallet

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::Level;

use pq_tx_auth::demo::{self, DemoConfig};
use pq_tx_auth::{Encoding, SecurityLevel};

/// Fatal error (key generation, signing, rejected input)
const EXIT_FATAL: i32 = 1;
/// `--strict` only: signature did not verify or tampering went unnoticed
const EXIT_VERIFY_FAILED: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "pq_tx_demo", version, author)]
#[command(about = "Post-quantum (Dilithium) transaction signing demo")]
struct Cli {
    /// Sender address
    #[arg(long, default_value = "quantum_wallet_1")]
    from: String,

    /// Recipient address
    #[arg(long, default_value = "quantum_wallet_2")]
    to: String,

    #[arg(long, default_value_t = 1000)]
    amount: u64,

    /// Memo attached to the transaction
    #[arg(long, default_value = "quantum-secured transfer")]
    memo: String,

    /// Dilithium parameter set
    #[arg(long, value_enum, default_value_t = SecurityLevel::Mode3)]
    mode: SecurityLevel,

    /// Byte encoding that gets signed
    #[arg(long, value_enum, default_value_t = Encoding::Canonical)]
    encoding: Encoding,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Reject ':' in addresses and exit non-zero when verification fails
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            from: self.from.clone(),
            to: self.to.clone(),
            amount: self.amount,
            memo: self.memo.clone(),
            level: self.mode,
            encoding: self.encoding,
            reject_ambiguous: self.strict,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_cli(cli: &Cli) -> Result<i32> {
    let config = cli.demo_config();
    let report = demo::run(&config)
        .with_context(|| format!("{} demo failed", config.level))?;

    if cli.json {
        println!("{}", report.to_json().context("Failed to encode report")?);
    } else {
        println!("{report}");
    }

    if cli.strict && !report.passed() {
        return Ok(EXIT_VERIFY_FAILED);
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run_cli(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(EXIT_FATAL);
        }
    }
}
