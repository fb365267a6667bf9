//! ctempl-core
//!
//! Core library for expanding marker-annotated C templates.
//!
//! This crate defines the template marker language and its expansion passes,
//! the per-directory generator that turns `<module>_template.c` into
//! `<module>.c`, and the fixture harness used to check generated output
//! against checked-in expected files.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, build scripts, etc.).

pub mod config;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod layout;
pub mod template;

pub use error::{TemplateError, TemplateResult};
pub use generate::{make_c_files, GenerateOptions, GenerationReport, Generator};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
