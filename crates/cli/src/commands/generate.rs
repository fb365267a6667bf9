use anyhow::{Context, Result};
use chrono::Utc;
use ctempl_core::generate::{GenerateOptions, GenerationReport};
use serde::Serialize;

use crate::commands::open_generator;

/// JSON shape printed by `generate --json`.
#[derive(Serialize)]
pub struct GenerateSummary {
    pub generated_at: String,
    #[serde(flatten)]
    pub report: GenerationReport,
}

/// Generate C files for `modules` (or the configured/discovered set) in `dir`.
pub fn generate_command(dir: &str, modules: &[String], force: bool, json: bool) -> Result<()> {
    let generator = open_generator(dir)?;
    let report = generator
        .generate(modules, &GenerateOptions { skip_up_to_date: !force })
        .context("Failed to generate C files")?;

    if json {
        let summary = GenerateSummary { generated_at: Utc::now().to_rfc3339(), report };
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize generation report to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Generated C files:");
    println!("  Directory: {}", report.directory);
    println!("  Written: {} of {}", report.written_count(), report.modules.len());
    if report.modules.is_empty() {
        println!("  (no modules)");
        return Ok(());
    }
    for entry in &report.modules {
        println!(
            "  - {} [{}] {} ({} bytes)",
            entry.module,
            entry.outcome.as_str(),
            entry.output_path,
            entry.bytes
        );
    }

    Ok(())
}
