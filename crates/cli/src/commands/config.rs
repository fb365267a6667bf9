use std::fs;

use anyhow::{anyhow, Context, Result};
use ctempl_core::config::{load_template_config, ConfigFormat, TemplateConfig};
use ctempl_core::layout::{DirectoryLayout, CONFIG_FILE_NAMES};
use ctempl_core::Generator;
use serde::Serialize;

use crate::canonicalize_or_current;
use crate::commands::print_path_status;

/// JSON shape printed by `info --json`.
#[derive(Serialize)]
pub struct DirectoryInfo {
    pub directory: String,
    pub config_file: Option<String>,
    pub config: TemplateConfig,
    pub modules: Vec<String>,
}

/// Parse a `--format` value.
pub fn parse_config_format(format: &str) -> Result<ConfigFormat> {
    match format {
        "json" => Ok(ConfigFormat::Json),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        other => Err(anyhow!("Unsupported config format `{other}` (expected json or yaml)")),
    }
}

/// Write a default config into `dir`, seeding `modules` with the templates found there.
pub fn init_config_command(dir: &str, format: &str, force: bool) -> Result<()> {
    let format = parse_config_format(format)?;
    let dir_path = canonicalize_or_current(dir)?;
    if !dir_path.is_dir() {
        return Err(anyhow!("Template directory does not exist: {}", dir_path.display()));
    }

    let file_name = match format {
        ConfigFormat::Json => CONFIG_FILE_NAMES[0],
        ConfigFormat::Yaml => CONFIG_FILE_NAMES[1],
    };
    let config_path = dir_path.join(file_name);
    if config_path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    let mut config = TemplateConfig::default();
    let discovered = Generator::new(&dir_path, config.clone())
        .resolve_modules(&[])
        .context("Failed to discover templates")?;
    if !discovered.is_empty() {
        config.modules = Some(discovered);
    }

    let body = config.to_string_in(format).context("Failed to serialize config")?;
    fs::write(&config_path, body)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    println!("Initialized ctempl config:");
    println!("  Path: {}", config_path.display());
    match &config.modules {
        Some(modules) => println!("  Modules: {}", modules.join(", ")),
        None => println!("  Modules: (none found; discovered at generate time)"),
    }

    Ok(())
}

/// Show the resolved configuration and layout of a template directory.
pub fn info_command(dir: &str, json: bool) -> Result<()> {
    let dir_path = canonicalize_or_current(dir)?;
    let layout = DirectoryLayout::new(&dir_path);
    let (config, source) = load_template_config(&layout)
        .with_context(|| format!("Failed to load config in {}", dir_path.display()))?;
    let generator = Generator::new(&dir_path, config.clone());
    let modules = if dir_path.is_dir() {
        generator.resolve_modules(&[]).context("Failed to resolve modules")?
    } else {
        Vec::new()
    };

    if json {
        let info = DirectoryInfo {
            directory: dir_path.display().to_string(),
            config_file: source.as_ref().map(|p| p.display().to_string()),
            config,
            modules,
        };
        let serialized = serde_json::to_string_pretty(&info)
            .context("Failed to serialize directory info to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("ctempl v{}", ctempl_core::version());
    println!("Template Directory Info");
    println!("=======================");
    print_path_status("Directory", &dir_path);
    match &source {
        Some(path) => print_path_status("Config file", path),
        None => println!("- Config file: (defaults)"),
    }
    println!("Template suffix: {}", config.template_suffix);
    println!("Output extension: {}", config.output_extension);
    println!("Line directives: {}", if config.line_directives { "on" } else { "off" });
    println!();
    println!("Modules ({}):", modules.len());
    for module in &modules {
        println!("  - {module}");
    }

    Ok(())
}
