use std::{
    io::{self, Read as _},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use num_bigint::BigUint;
use rand::{rngs::StdRng, SeedableRng};
use shamir_recover::{collect, interpolate, parse_base, Dealer, ShareDocument};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Default radix of the values written by `split`.
const DEFAULT_BASE: &str = "10";

#[derive(Parser)]
#[command(name = "shamir-recover", version)]
struct Args {
    /// Turn debugging information on.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// The command to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
#[command(rename_all = "kebab-case")]
enum Command {
    /// Recover the secret from a JSON share document.
    Recover {
        /// The share document, read from stdin when omitted.
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        /// Fail if any Lagrange term had to be truncated.
        #[arg(long)]
        strict: bool,
    },
    /// Split a secret and print the share document.
    Split {
        /// The secret, in decimal.
        #[arg(short, long, value_name = "INT")]
        secret: BigUint,
        /// The degree of the sharing polynomial plus one.
        #[arg(short, long, value_name = "INT")]
        threshold: u32,
        /// The number of shares to deal.
        #[arg(short = 'n', long, value_name = "INT")]
        shares: u32,
        /// The radix the share values are written in.
        #[arg(short, long, value_name = "INT", default_value = DEFAULT_BASE)]
        base: String,
        /// Seed for a reproducible polynomial.
        #[arg(long, value_name = "INT")]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Args::parse();

    // Set the tracing subscriber.
    set_tracing_subscriber(cli.verbose);

    match cli.command {
        Command::Recover { input, strict } => {
            let document = match &input {
                Some(path) => ShareDocument::import(path)
                    .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .wrap_err("Failed to read stdin")?;
                    ShareDocument::from_json(&buf).wrap_err("Failed to parse share document")?
                }
            };

            let shares = collect(&document).wrap_err("Failed to decode shares")?;
            let reconstruction = interpolate(&shares).wrap_err("Failed to interpolate")?;
            let secret = if strict {
                reconstruction
                    .into_exact()
                    .wrap_err("Refusing a truncated reconstruction")?
            } else {
                reconstruction.secret
            };
            println!("{secret}");
        }

        Command::Split {
            secret,
            threshold,
            shares,
            base,
            seed,
        } => {
            let base = parse_base(&base)?;
            let dealer = Dealer::create(threshold, shares)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let (set, _) = dealer.split(&secret, &mut rng)?;
            let document = ShareDocument::encode(&set, base, Some(threshold.into()))?;
            println!("{}", document.to_json_pretty()?);
        }
    }

    Ok(())
}

fn set_tracing_subscriber(verbosity: u8) {
    let log_level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set the tracing subscriber: {e}");
    }
}
