use clap::{Parser, Subcommand};

use crate::domain::{IterationExponent, ShareCount, Threshold};

fn parse_number(s: &str) -> Result<u8, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}

/// Validates that the required parts are at least 2
/// A threshold of 1 would let any single share recover the seed
fn validate_required_parts(s: &str) -> Result<Threshold, String> {
    let value = parse_number(s)?;
    if value < 2 {
        return Err(format!("required parts must be at least 2 (got {value})"));
    }
    Threshold::new(value).map_err(|e| e.to_string())
}

fn validate_overall_parts(s: &str) -> Result<ShareCount, String> {
    ShareCount::new(parse_number(s)?).map_err(|e| e.to_string())
}

fn validate_iteration_exponent(s: &str) -> Result<IterationExponent, String> {
    IterationExponent::new(parse_number(s)?).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "seedsplit")]
#[command(about = "Split a BIP-39 seed phrase into passphrase-protected Shamir share mnemonics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a seed phrase into share mnemonics
    Split {
        /// Seed phrase to split (read from stdin when omitted)
        #[arg(short, long)]
        mnemonic: Option<String>,

        /// Minimum number of shares needed to recover the seed (must be >= 2)
        #[arg(
            long,
            alias = "required_parts",
            default_value = "2",
            value_parser = validate_required_parts
        )]
        required_parts: Threshold,

        /// Number of shares to create
        #[arg(
            long,
            alias = "overall_parts",
            default_value = "3",
            value_parser = validate_overall_parts
        )]
        overall_parts: ShareCount,

        /// Passphrase protecting the shares (read from stdin when omitted)
        #[arg(short, long)]
        passphrase: Option<String>,

        /// Passphrase hardening: each step doubles the PBKDF2 work
        #[arg(long, default_value = "1", value_parser = validate_iteration_exponent)]
        iteration_exponent: IterationExponent,

        /// Create extendable shares
        #[arg(long)]
        extendable: bool,
    },
    /// Recover a seed phrase from share mnemonics
    Recover {
        /// Comma-separated share mnemonics (read from stdin, one per line, when omitted)
        #[arg(long, alias = "mnemonic_parts")]
        mnemonic_parts: Option<String>,

        /// Passphrase the shares were created with (read from stdin when omitted)
        #[arg(short, long)]
        passphrase: Option<String>,
    },
}
