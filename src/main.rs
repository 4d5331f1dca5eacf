use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use ar_fee_engine::adapters::FeeSnapshot;
use ar_fee_engine::config::{init_tracing, AppConfig};
use ar_fee_engine::domain::fees::{ComputeOptions, CreditorBand, FeeCalculator};

/// Compute an authorized representative's fee breakdown from a snapshot file.
#[derive(Debug, Parser)]
#[command(name = "ar-fees", version, about)]
struct Cli {
    /// Snapshot file (.json, .yaml or .yml) holding structure and attendance
    snapshot: PathBuf,

    /// Creditor band to apply, e.g. "101-1000"; overrides the snapshot
    #[arg(long)]
    band: Option<CreditorBand>,

    /// Double a paid committee meeting's fee when both seats attended
    #[arg(long)]
    charge_per_ar: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_validated().context("loading configuration")?;
    init_tracing(&config.logging)?;
    tracing::debug!(snapshot = %cli.snapshot.display(), "ar-fees v{}", env!("CARGO_PKG_VERSION"));

    let snapshot = FeeSnapshot::load(&cli.snapshot)
        .await
        .with_context(|| format!("loading snapshot {}", cli.snapshot.display()))?;

    let options = if cli.charge_per_ar {
        ComputeOptions::charge_per_ar()
    } else {
        snapshot
            .options
            .unwrap_or_else(|| config.fees.default_options())
    };
    let band = cli.band.or(snapshot.band);

    let breakdown = FeeCalculator::compute(&snapshot.structure, &snapshot.attendance, band, options)?;
    for warning in &breakdown.warnings {
        tracing::warn!("{}", warning);
    }

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
