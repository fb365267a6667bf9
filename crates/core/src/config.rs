use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};
use crate::layout::DirectoryLayout;

/// Serializable per-directory generator configuration.
///
/// This lives (optionally) at `ctempl.json`, `ctempl.yaml` or `ctempl.yml`
/// in the template directory. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Modules generated when the caller names none. Without this, modules are
    /// discovered from the template files present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
    /// Template file name suffix appended to the module name.
    pub template_suffix: String,
    /// Extension of the generated file.
    pub output_extension: String,
    /// Emit `#line` directives pointing back at the template.
    pub line_directives: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            modules: None,
            template_suffix: "_template.c".to_string(),
            output_extension: "c".to_string(),
            line_directives: true,
        }
    }
}

/// On-disk format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

impl TemplateConfig {
    /// Parse a config body in the given format.
    pub fn parse(body: &str, format: ConfigFormat, path: &Path) -> TemplateResult<Self> {
        let parsed = match format {
            ConfigFormat::Json => serde_json::from_str(body).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(body).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| TemplateError::Config { path: path.to_path_buf(), message })
    }

    /// Serialize in the given format.
    pub fn to_string_in(&self, format: ConfigFormat) -> TemplateResult<String> {
        let rendered = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| TemplateError::Config { path: PathBuf::new(), message })
    }
}

/// Load the first config file found in the layout, or defaults if none exists.
///
/// Returns the path the config was read from, if any.
pub fn load_template_config(
    layout: &DirectoryLayout,
) -> TemplateResult<(TemplateConfig, Option<PathBuf>)> {
    for path in layout.config_candidates() {
        if !path.is_file() {
            continue;
        }
        let Some(format) = ConfigFormat::from_path(&path) else {
            continue;
        };
        let body = fs::read_to_string(&path).map_err(|e| TemplateError::io(&path, e))?;
        let config = TemplateConfig::parse(&body, format, &path)?;
        return Ok((config, Some(path)));
    }
    Ok((TemplateConfig::default(), None))
}
