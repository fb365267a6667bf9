//! Template expansion.
//!
//! A template is ordinary C source annotated with block markers:
//! - `/* repeat = {'KEY': [...]} */ ... /* repeat end */`
//! - `/* dtype = [[...], ...] */ ... /* dtype end */`
//! - `/* MULTILINE STRING BEGIN ... MULTILINE STRING END */`
//!
//! Each block kind is handled by one [`TemplatePass`]. Passes run in a fixed
//! order over a list of [`SourceLine`]s that remember which template line they
//! were copied from, so the renderer can emit `#line` directives.

pub mod blocks;
pub mod dtype;
pub mod literal;
pub mod multiline;
pub mod render;
pub mod repeat;

use log::debug;

use crate::error::TemplateResult;

pub use dtype::DtypePass;
pub use literal::Literal;
pub use multiline::MultilineStringPass;
pub use repeat::RepeatPass;

/// One line of template text in flight through the passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// 1-based template line this text was copied from; `None` for separators.
    pub origin: Option<usize>,
}

impl SourceLine {
    pub fn template(text: impl Into<String>, origin: usize) -> Self {
        Self { text: text.into(), origin: Some(origin) }
    }

    pub fn generated(text: impl Into<String>) -> Self {
        Self { text: text.into(), origin: None }
    }

    /// Same origin, new text.
    pub fn with_text(&self, text: String) -> Self {
        Self { text, origin: self.origin }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Template line to report in errors.
    pub fn line_hint(&self) -> usize {
        self.origin.unwrap_or(0)
    }
}

/// A single expansion pass over the template lines.
pub trait TemplatePass: Send + Sync {
    /// Returns a human-readable name for the pass.
    fn name(&self) -> &'static str;

    fn expand(&self, lines: Vec<SourceLine>) -> TemplateResult<Vec<SourceLine>>;
}

/// The passes every template goes through, in order.
pub fn default_passes() -> Vec<Box<dyn TemplatePass>> {
    vec![Box::new(RepeatPass), Box::new(DtypePass), Box::new(MultilineStringPass)]
}

/// Split template source into numbered lines.
pub fn split_lines(src: &str) -> Vec<SourceLine> {
    src.lines().enumerate().map(|(idx, text)| SourceLine::template(text, idx + 1)).collect()
}

/// Run `passes` in order, then collapse blank runs and trailing blank lines.
pub fn expand_lines(
    mut lines: Vec<SourceLine>,
    passes: &[Box<dyn TemplatePass>],
) -> TemplateResult<Vec<SourceLine>> {
    for pass in passes {
        let before = lines.len();
        lines = pass.expand(lines)?;
        debug!("{} pass: {} -> {} lines", pass.name(), before, lines.len());
    }
    let mut lines = render::collapse_blank_runs(lines);
    render::trim_trailing_blank(&mut lines);
    Ok(lines)
}

/// Expand template source into C source.
///
/// `location` is the template path written into `#line` directives; `None`
/// disables directives entirely.
pub fn expand_template(src: &str, location: Option<&str>) -> TemplateResult<String> {
    let lines = expand_lines(split_lines(src), &default_passes())?;
    Ok(render::render(&lines, location))
}
