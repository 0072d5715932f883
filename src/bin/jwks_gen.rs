// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use registry_slt::jwks;
use std::path::PathBuf;
use tracing::info;

/// Generate a JWKS document for an OIDC discovery endpoint from a signing certificate
#[derive(Parser, Debug)]
#[command(name = "jwks-gen", version)]
struct Args {
    /// PEM encoded X.509 certificate carrying the RSA signing key
    cert: PathBuf,

    /// Write the JWKS here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let pem_data = std::fs::read(&args.cert)
        .with_context(|| format!("Failed to read certificate {}", args.cert.display()))?;
    let jwks = jwks::generate(&pem_data)
        .with_context(|| format!("Failed to build JWKS from {}", args.cert.display()))?;
    let document = serde_json::to_string(&jwks).context("Failed to encode JWKS")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote JWKS to {}", path.display());
        }
        None => println!("{}", document),
    }

    Ok(())
}
