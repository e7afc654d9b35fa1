use std::time::Instant;

use anyhow::Context;
use log::info;

use cps_trends::ReportConfig;
use cps_trends::report::{self, render_summary, write_report};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        anyhow::bail!("usage: cps-trends <input.csv|input.parquet> [output_dir]");
    };
    let mut config = ReportConfig::from_env().with_input(input);
    if let Some(output_dir) = args.next() {
        config = config.with_output_dir(output_dir);
    }

    let start = Instant::now();
    let report = report::run(&config)
        .with_context(|| format!("Failed to build report from {}", config.input_path.display()))?;
    let written = write_report(&report, &config).with_context(|| {
        format!(
            "Failed to write report tables to {}",
            config.output_dir.display()
        )
    })?;

    println!("{}", render_summary(&report));
    info!(
        "Wrote {} files to {} in {:?}",
        written.len(),
        config.output_dir.display(),
        start.elapsed()
    );
    Ok(())
}
