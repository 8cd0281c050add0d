//! GnuCash Converter - CLI tool for turning bank exports into ledger CSV.

use clap::Parser;
use gnucash_converter::amount::DecimalSeparator;
use gnucash_converter::{convert, ConvertOptions, Dialect, Result, UnknownFlagPolicy};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gnucash_convert")]
#[command(about = "Convert bank exports (Rabobank CSV/TXT, ING) into GnuCash ledger CSV", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Bank format (csv, txt, ing)
    #[arg(short, long)]
    bank: String,

    /// Balance before the first transaction
    #[arg(long = "initial-balance", allow_hyphen_values = true)]
    initial_balance: Decimal,

    /// Expected balance after the last transaction (informational)
    #[arg(long = "final-balance", allow_hyphen_values = true)]
    final_balance: Option<Decimal>,

    /// Decimal separator of the local number format
    #[arg(long = "locale-separator", default_value_t = '.')]
    locale_separator: char,

    /// Fail on credit/debit flags outside the known set instead of passing them through
    #[arg(long)]
    reject_unknown_flags: bool,

    /// Print transactions instead of writing a ledger CSV
    #[arg(long)]
    print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr).compact())
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let dialect = cli.bank.parse::<Dialect>()?;

    let mut options = ConvertOptions::new(dialect, cli.initial_balance);
    options.final_balance = cli.final_balance;
    options.locale_separator = DecimalSeparator::try_from(cli.locale_separator)?;
    options.unknown_flag = if cli.reject_unknown_flags {
        UnknownFlagPolicy::Reject
    } else {
        UnknownFlagPolicy::PassThrough
    };
    options.inspect = cli.print;

    // Handles are dropped on every return path
    match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => {
            convert(File::open(input)?, BufWriter::new(File::create(output)?), &options)?
        }
        (Some(input), None) => convert(File::open(input)?, io::stdout().lock(), &options)?,
        (None, Some(output)) => {
            convert(io::stdin().lock(), BufWriter::new(File::create(output)?), &options)?
        }
        (None, None) => convert(io::stdin().lock(), io::stdout().lock(), &options)?,
    };

    Ok(())
}
