use anyhow::{Context, Result};
use serde::Serialize;

use crate::commands::open_generator;

/// One row of `list-modules` output.
#[derive(Debug, Serialize)]
pub struct ModuleStatus {
    pub module: String,
    pub template_path: String,
    pub template_exists: bool,
    pub output_path: String,
    pub output_exists: bool,
    pub up_to_date: bool,
}

/// Resolve modules for `dir` and report the state of each template/output pair.
pub fn collect_module_statuses(dir: &str) -> Result<Vec<ModuleStatus>> {
    let generator = open_generator(dir)?;
    let modules = generator.resolve_modules(&[]).context("Failed to resolve modules")?;
    let layout = generator.layout();
    let config = generator.config();

    Ok(modules
        .into_iter()
        .map(|module| {
            let template = layout.template_path(&module, config);
            let output = layout.output_path(&module, config);
            ModuleStatus {
                up_to_date: generator.is_up_to_date(&module),
                template_exists: template.is_file(),
                template_path: template.display().to_string(),
                output_exists: output.is_file(),
                output_path: output.display().to_string(),
                module,
            }
        })
        .collect())
}

/// List the modules `generate` would process by default.
pub fn list_modules_command(dir: &str, json: bool) -> Result<()> {
    let statuses = collect_module_statuses(dir)?;

    if json {
        let serialized = serde_json::to_string_pretty(&statuses)
            .context("Failed to serialize modules to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Modules ({}):", statuses.len());
    if statuses.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for status in statuses {
        let state = match (status.template_exists, status.output_exists, status.up_to_date) {
            (false, _, _) => "missing template",
            (true, false, _) => "not generated",
            (true, true, true) => "up to date",
            (true, true, false) => "stale",
        };
        println!("  - {} [{}] {}", status.module, state, status.template_path);
    }

    Ok(())
}
