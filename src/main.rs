use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use seedsplit::cli::{Cli, Commands};
use seedsplit::commands::{parse_share_list, recover_mnemonic, split_mnemonic};
use seedsplit::domain::{Passphrase, SplitConfig};

/// Read one secret line from stdin (hidden input when TTY available)
fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("{prompt}");
        let line = Zeroizing::new(
            rpassword::read_password().with_context(|| format!("Failed to read: {prompt}"))?,
        );
        Ok(Zeroizing::new(line.trim().to_string()))
    } else {
        // Non-interactive mode (piped input) - read directly from stdin
        let mut line = Zeroizing::new(String::new());
        io::stdin()
            .lock()
            .read_line(&mut line)
            .with_context(|| format!("Failed to read: {prompt}"))?;
        Ok(Zeroizing::new(line.trim().to_string()))
    }
}

/// Read shares from stdin, one per line, until an empty line
fn read_shares() -> Result<Vec<String>> {
    let mut shares = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter share mnemonics (one per line, empty line to finish):");
        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );
            if share.trim().is_empty() {
                break;
            }
            shares.extend(parse_share_list(&share));
        }
    } else {
        for line in io::stdin().lock().lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            if line.trim().is_empty() {
                break;
            }
            shares.extend(parse_share_list(&line));
        }
    }

    if shares.is_empty() {
        bail!("No shares provided");
    }
    Ok(shares)
}

fn passphrase_or_prompt(passphrase: Option<String>) -> Result<Passphrase> {
    let passphrase = match passphrase {
        Some(passphrase) => Zeroizing::new(passphrase),
        None => read_secret("Enter passphrase:")?,
    };
    Ok(Passphrase::required(passphrase.as_bytes())?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            mnemonic,
            required_parts,
            overall_parts,
            passphrase,
            iteration_exponent,
            extendable,
        } => {
            let mnemonic = match mnemonic {
                Some(mnemonic) => Zeroizing::new(mnemonic),
                None => read_secret("Enter seed phrase (12 to 24 words):")?,
            };
            let passphrase = passphrase_or_prompt(passphrase)?;

            let config = SplitConfig::new(required_parts, overall_parts)?
                .with_iteration_exponent(iteration_exponent)
                .with_extendable(extendable);

            let shares = split_mnemonic(&mnemonic, &config, &passphrase)
                .context("Failed to split seed phrase")?;
            for (idx, share) in shares.iter().enumerate() {
                println!("\nSeed part [{idx}]:");
                println!("{share}");
            }
            println!("\nSuccessfully split seed!");
        }
        Commands::Recover {
            mnemonic_parts,
            passphrase,
        } => {
            let shares = match mnemonic_parts {
                Some(parts) => {
                    let parts = Zeroizing::new(parts);
                    parse_share_list(&parts)
                }
                None => read_shares()?,
            };
            let passphrase = passphrase_or_prompt(passphrase)?;

            let mnemonic =
                recover_mnemonic(&shares, &passphrase).context("Failed to recover seed phrase")?;
            println!("Master seed phrase:");
            println!("{mnemonic}");
            println!("Successfully recovered master seed!");
        }
    }

    Ok(())
}
