use std::path::{self, Component, Path, PathBuf};

use crate::config::TemplateConfig;
use crate::error::{TemplateError, TemplateResult};

/// Config file names probed in a template directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["ctempl.json", "ctempl.yaml", "ctempl.yml"];

/// Logical layout of a template directory.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
#[derive(Debug, Clone)]
pub struct DirectoryLayout {
    /// Directory holding templates and receiving generated files.
    pub root: PathBuf,
}

impl DirectoryLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// `<root>/<module><template_suffix>`
    pub fn template_path(&self, module: &str, config: &TemplateConfig) -> PathBuf {
        self.root.join(format!("{module}{}", config.template_suffix))
    }

    /// `<root>/<module>.<output_extension>`
    pub fn output_path(&self, module: &str, config: &TemplateConfig) -> PathBuf {
        self.root.join(format!("{module}.{}", config.output_extension))
    }

    /// Path of a fixture (e.g. `truth.c`) inside the directory.
    pub fn fixture_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Candidate config file paths, in lookup order.
    pub fn config_candidates(&self) -> Vec<PathBuf> {
        CONFIG_FILE_NAMES.iter().map(|name| self.root.join(name)).collect()
    }
}

/// Render a path with `/` separators, as written into `#line` directives.
pub fn posix_display(path: &Path) -> String {
    let display = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '\\' {
        display.replace('\\', "/")
    } else {
        display.into_owned()
    }
}

/// Make `dir` absolute against the current directory, dropping `.` components.
///
/// Symlinks are left unresolved so reported paths keep the caller's spelling.
pub fn absolute_dir(dir: &Path) -> TemplateResult<PathBuf> {
    let absolute = path::absolute(dir).map_err(|e| TemplateError::io(dir, e))?;
    Ok(absolute.components().filter(|c| !matches!(c, Component::CurDir)).collect())
}
