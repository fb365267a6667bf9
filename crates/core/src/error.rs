use std::path::PathBuf;

use thiserror::Error;

use crate::fixture::LineDifference;

/// Error type for template expansion, generation and fixture checks.
///
/// Line numbers refer to the 1-based line of the template the offending
/// marker was read from.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The directory handed to the generator does not exist.
    #[error("Template directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// No template file for the requested module.
    #[error("Template for module `{module}` not found at {path}")]
    TemplateNotFound { module: String, path: PathBuf },

    /// Module names become file names, so separators and `..` are rejected.
    #[error("Invalid module name `{0}`")]
    InvalidModuleName(String),

    /// Filesystem error while reading or writing `path`.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: `{marker}` end marker found before any block began")]
    UnmatchedEnd { marker: &'static str, line: usize },

    #[error("line {line}: `{marker}` block is never closed")]
    UnterminatedBlock { marker: &'static str, line: usize },

    #[error("line {line}: `{marker}` header comment is not closed before the block ends")]
    UnterminatedHeader { marker: &'static str, line: usize },

    #[error("line {line}: `{marker}` header carries no specification literal")]
    MissingSpec { marker: &'static str, line: usize },

    #[error("line {line}: malformed header literal: {message}")]
    Literal { line: usize, message: String },

    #[error("line {line}: all repeat lists must be the same length")]
    RepeatLengthMismatch { line: usize },

    #[error("line {line}: dtype block body contains no DTYPE marker")]
    MissingDtypeMarker { line: usize },

    /// Config file exists but could not be parsed.
    #[error("Failed to parse config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generated output (after path normalization) differs from the fixture.
    #[error("Generated output for `{module}` differs from fixture: {first_difference}")]
    FixtureMismatch {
        module: String,
        first_difference: LineDifference,
        expected: String,
        actual: String,
    },
}

impl TemplateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplateError::Io { path: path.into(), source }
    }
}

/// Convenience result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
