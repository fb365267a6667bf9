//! Fixture checks: generate a module and compare it against a checked-in
//! expected file with the directory path normalized out.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};
use crate::generate::{validate_module_name, GenerateOptions, Generator};
use crate::layout::posix_display;

/// Token that stands in for the template directory inside fixtures.
pub const DIRPATH_PLACEHOLDER: &str = "{DIRPATH}";

/// Default fixture file name.
pub const DEFAULT_TRUTH_FILE: &str = "truth.c";

/// Scoped ownership of a generated file.
///
/// Claiming removes any stale copy; dropping removes the file again, so the
/// directory is left clean on every exit path.
#[derive(Debug)]
pub struct GeneratedFile {
    path: PathBuf,
}

impl GeneratedFile {
    pub fn claim(path: impl Into<PathBuf>) -> TemplateResult<Self> {
        let path = path.into();
        remove_if_present(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_to_string(&self) -> TemplateResult<String> {
        fs::read_to_string(&self.path).map_err(|e| TemplateError::io(&self.path, e))
    }
}

impl Drop for GeneratedFile {
    fn drop(&mut self) {
        if let Err(err) = remove_if_present(&self.path) {
            warn!("failed to remove generated file: {err}");
        }
    }
}

fn remove_if_present(path: &Path) -> TemplateResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TemplateError::io(path, e)),
    }
}

/// Replace every occurrence of `dir` (native and `/`-separated forms) with
/// [`DIRPATH_PLACEHOLDER`].
pub fn normalize_dirpath(text: &str, dir: &Path) -> String {
    let native = dir.to_string_lossy().into_owned();
    let posix = posix_display(dir);
    let mut out = text.replace(&native, DIRPATH_PLACEHOLDER);
    if posix != native {
        out = out.replace(&posix, DIRPATH_PLACEHOLDER);
    }
    out
}

/// First line at which two texts differ (1-based). `None` on either side
/// means that text has already ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDifference {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl fmt::Display for LineDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(text: &Option<String>) -> String {
            match text {
                Some(t) => format!("{t:?}"),
                None => "<end of file>".to_string(),
            }
        }
        write!(
            f,
            "line {}: expected {}, found {}",
            self.line,
            side(&self.expected),
            side(&self.actual)
        )
    }
}

pub fn first_difference(expected: &str, actual: &str) -> Option<LineDifference> {
    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return None,
            (e, a) if e == a => line += 1,
            (e, a) => {
                return Some(LineDifference {
                    line,
                    expected: e.map(str::to_string),
                    actual: a.map(str::to_string),
                })
            }
        }
    }
}

/// Outcome of a passing fixture check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureReport {
    pub module: String,
    pub truth_path: String,
    pub output_path: String,
    pub lines: usize,
}

/// Generate `module` in `dir`, compare the normalized output with the
/// fixture `truth_name`, and remove the generated file whatever happens.
///
/// A relative `dir` is resolved against the current directory before the
/// absolute path is normalized out.
pub fn verify_module(dir: &Path, module: &str, truth_name: &str) -> TemplateResult<FixtureReport> {
    let generator = Generator::from_dir(dir)?;
    verify_with(&generator, module, truth_name)
}

/// [`verify_module`] against an already configured generator.
pub fn verify_with(
    generator: &Generator,
    module: &str,
    truth_name: &str,
) -> TemplateResult<FixtureReport> {
    validate_module_name(module)?;
    let layout = generator.layout();
    let output = GeneratedFile::claim(layout.output_path(module, generator.config()))?;

    generator.generate(&[module.to_string()], &GenerateOptions::default())?;

    let truth_path = layout.fixture_path(truth_name);
    let expected =
        fs::read_to_string(&truth_path).map_err(|e| TemplateError::io(&truth_path, e))?;
    let actual = normalize_dirpath(&output.read_to_string()?, &layout.root);

    if let Some(diff) = first_difference(&expected, &actual) {
        return Err(TemplateError::FixtureMismatch {
            module: module.to_string(),
            first_difference: diff,
            expected,
            actual,
        });
    }

    Ok(FixtureReport {
        module: module.to_string(),
        truth_path: truth_path.display().to_string(),
        output_path: output.path().display().to_string(),
        lines: actual.lines().count(),
    })
}
