use anyhow::{Context, Result};
use ctempl_core::fixture::verify_with;

use crate::commands::open_generator;

/// Generate `module`, compare it against the fixture `truth` with the
/// directory path normalized, and remove the generated file.
pub fn verify_command(dir: &str, module: &str, truth: &str) -> Result<()> {
    let generator = open_generator(dir)?;
    let report = verify_with(&generator, module, truth)
        .with_context(|| format!("Fixture check failed for module `{module}`"))?;

    println!("Fixture check passed:");
    println!("  Module: {}", report.module);
    println!("  Fixture: {}", report.truth_path);
    println!("  Lines compared: {}", report.lines);

    Ok(())
}
