//! Module generation: `<module>_template.c` -> `<module>.c`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{load_template_config, TemplateConfig};
use crate::error::{TemplateError, TemplateResult};
use crate::layout::{absolute_dir, posix_display, DirectoryLayout};
use crate::template::expand_template;

/// Options for a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Leave an output alone when it is newer than its template. Off by
    /// default, so every requested module is rewritten.
    pub skip_up_to_date: bool,
}

/// What happened to a module during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleOutcome {
    Written,
    UpToDate,
}

impl ModuleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleOutcome::Written => "written",
            ModuleOutcome::UpToDate => "up-to-date",
        }
    }
}

/// Per-module entry of a [`GenerationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module: String,
    pub template_path: String,
    pub output_path: String,
    pub outcome: ModuleOutcome,
    /// Size of the output file in bytes.
    pub bytes: u64,
    /// SHA-256 of the output content, hex encoded.
    pub sha256: String,
}

/// Result of [`Generator::generate`], one entry per module in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub directory: String,
    pub modules: Vec<ModuleReport>,
}

impl GenerationReport {
    pub fn written_count(&self) -> usize {
        self.modules.iter().filter(|m| m.outcome == ModuleOutcome::Written).count()
    }
}

/// Generator bound to one template directory and its config.
#[derive(Debug, Clone)]
pub struct Generator {
    layout: DirectoryLayout,
    config: TemplateConfig,
}

impl Generator {
    pub fn new(dir: impl AsRef<Path>, config: TemplateConfig) -> Self {
        Self { layout: DirectoryLayout::new(dir), config }
    }

    /// Load the directory's config (if any) and bind a generator to it.
    ///
    /// `dir` is made absolute first, so `#line` paths and fixture
    /// normalization never depend on how the caller spelled it.
    pub fn from_dir(dir: impl AsRef<Path>) -> TemplateResult<Self> {
        let layout = DirectoryLayout::new(absolute_dir(dir.as_ref())?);
        ensure_directory(&layout.root)?;
        let (config, source) = load_template_config(&layout)?;
        if let Some(path) = source {
            debug!("loaded config from {}", path.display());
        }
        Ok(Self { layout, config })
    }

    pub fn layout(&self) -> &DirectoryLayout {
        &self.layout
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Modules to generate: `requested` if non-empty, else the configured
    /// list, else every `*<template_suffix>` file in the directory (sorted).
    pub fn resolve_modules(&self, requested: &[String]) -> TemplateResult<Vec<String>> {
        let modules = if !requested.is_empty() {
            requested.to_vec()
        } else if let Some(configured) = self.config.modules.as_ref().filter(|m| !m.is_empty()) {
            configured.clone()
        } else {
            self.discover_modules()?
        };
        for module in &modules {
            validate_module_name(module)?;
        }
        Ok(modules)
    }

    fn discover_modules(&self) -> TemplateResult<Vec<String>> {
        ensure_directory(&self.layout.root)?;
        let root = &self.layout.root;
        let suffix = self.config.template_suffix.as_str();
        let mut modules = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| TemplateError::io(root, e))? {
            let entry = entry.map_err(|e| TemplateError::io(root, e))?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(module) = file_name.strip_suffix(suffix) {
                if !module.is_empty() && entry.path().is_file() {
                    modules.push(module.to_string());
                }
            }
        }
        modules.sort();
        Ok(modules)
    }

    /// Whether the output for `module` is newer than its template.
    pub fn is_up_to_date(&self, module: &str) -> bool {
        let template = self.layout.template_path(module, &self.config);
        let output = self.layout.output_path(module, &self.config);
        match (modified(&template), modified(&output)) {
            (Some(t), Some(o)) => t < o,
            _ => false,
        }
    }

    /// Expand one module's template without writing anything.
    pub fn render_module(&self, module: &str) -> TemplateResult<String> {
        validate_module_name(module)?;
        let template_path = self.layout.template_path(module, &self.config);
        if !template_path.is_file() {
            return Err(TemplateError::TemplateNotFound {
                module: module.to_string(),
                path: template_path,
            });
        }
        let src = fs::read_to_string(&template_path)
            .map_err(|e| TemplateError::io(&template_path, e))?;
        let location = posix_display(&template_path);
        let location = self.config.line_directives.then_some(location.as_str());
        expand_template(&src, location)
    }

    /// Generate the given modules (or the resolved default set when empty).
    pub fn generate(
        &self,
        modules: &[String],
        options: &GenerateOptions,
    ) -> TemplateResult<GenerationReport> {
        ensure_directory(&self.layout.root)?;
        let modules = self.resolve_modules(modules)?;
        let mut report = GenerationReport {
            directory: self.layout.root.display().to_string(),
            modules: Vec::with_capacity(modules.len()),
        };

        for module in modules {
            let template_path = self.layout.template_path(&module, &self.config);
            let output_path = self.layout.output_path(&module, &self.config);

            let (outcome, content) = if options.skip_up_to_date && self.is_up_to_date(&module) {
                debug!("{module}: {} is up to date", output_path.display());
                let content =
                    fs::read(&output_path).map_err(|e| TemplateError::io(&output_path, e))?;
                (ModuleOutcome::UpToDate, content)
            } else {
                let content = self.render_module(&module)?.into_bytes();
                fs::write(&output_path, &content)
                    .map_err(|e| TemplateError::io(&output_path, e))?;
                info!("{module}: wrote {} ({} bytes)", output_path.display(), content.len());
                (ModuleOutcome::Written, content)
            };

            report.modules.push(ModuleReport {
                module,
                template_path: template_path.display().to_string(),
                output_path: output_path.display().to_string(),
                outcome,
                bytes: content.len() as u64,
                sha256: sha256_hex(&content),
            });
        }

        Ok(report)
    }
}

/// Generate one C file per module in `dir`, honoring the directory's config.
///
/// Existing outputs are overwritten unless `options.skip_up_to_date` is set.
/// An empty `modules` slice means "the configured or discovered modules".
pub fn make_c_files(
    dir: impl AsRef<Path>,
    modules: &[String],
    options: &GenerateOptions,
) -> TemplateResult<GenerationReport> {
    Generator::from_dir(dir)?.generate(modules, options)
}

/// Module names end up in file names, so keep them to a single path component.
pub fn validate_module_name(module: &str) -> TemplateResult<()> {
    let invalid = module.is_empty()
        || module == "."
        || module == ".."
        || module.contains(['/', '\\', '\0']);
    if invalid {
        return Err(TemplateError::InvalidModuleName(module.to_string()));
    }
    Ok(())
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

fn ensure_directory(dir: &Path) -> TemplateResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(TemplateError::DirectoryNotFound(PathBuf::from(dir)))
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
