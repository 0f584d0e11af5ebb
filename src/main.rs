// src/main.rs

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use cxx_freestanding_headers::{resolve_and_install, INSTALL_SUBDIR};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "cxx-freestanding-headers")]
#[command(author, version, about = "Extract and install the C++ freestanding header set", long_about = None)]
struct Cli {
    /// Installation prefix; headers land in <PREFIX>/include/c++
    #[arg(allow_hyphen_values = true)]
    prefix: PathBuf,
    /// Root of the libstdc++ source tree to search
    #[arg(allow_hyphen_values = true)]
    source_root: PathBuf,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", err.render());
            return Ok(ExitCode::from(1));
        }
    };

    info!(
        "Resolving freestanding headers under {}",
        cli.source_root.display()
    );
    let count = resolve_and_install(&cli.prefix, &cli.source_root)?;
    println!(
        "Installed {} headers to {}",
        count,
        cli.prefix.join(INSTALL_SUBDIR).display()
    );

    Ok(ExitCode::SUCCESS)
}
