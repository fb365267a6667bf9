use std::path::Path;

use anyhow::{Context, Result};
use ctempl_core::Generator;

use crate::canonicalize_or_current;

/// Resolve `dir` and bind a generator to it (loads the directory's config).
pub fn open_generator(dir: &str) -> Result<Generator> {
    let dir_path = canonicalize_or_current(dir)?;
    Generator::from_dir(&dir_path)
        .with_context(|| format!("Failed to open template directory {}", dir_path.display()))
}

/// Print a labelled path with whether it exists.
pub fn print_path_status(label: &str, path: &Path) {
    let exists = path.exists();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}
