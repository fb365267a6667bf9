use std::sync::LazyLock;

use crate::error::TemplateResult;
use crate::template::blocks::{expand_blocks, BlockMarkers};
use crate::template::{SourceLine, TemplatePass};

static MULTILINE_MARKERS: LazyLock<BlockMarkers> = LazyLock::new(|| {
    BlockMarkers::new(
        "MULTILINE STRING",
        r"^/\*\s*MULTILINE STRING BEGIN",
        r"^MULTILINE STRING END\s*\*/",
    )
});

/// Turns the lines between `/* MULTILINE STRING BEGIN` and
/// `MULTILINE STRING END */` into a sequence of C string literals, one per
/// line, terminated with `;`.
pub struct MultilineStringPass;

impl TemplatePass for MultilineStringPass {
    fn name(&self) -> &'static str {
        "multiline string"
    }

    fn expand(&self, lines: Vec<SourceLine>) -> TemplateResult<Vec<SourceLine>> {
        expand_blocks(lines, &MULTILINE_MARKERS, |block, _line| {
            let Some((opening, body)) = block.split_first() else {
                return Ok(Vec::new());
            };
            if body.is_empty() {
                return Ok(vec![opening.with_text("\"\";".to_string())]);
            }
            let last = body.len() - 1;
            Ok(body
                .iter()
                .enumerate()
                .map(|(idx, line)| {
                    let terminator = if idx == last { ";" } else { "" };
                    line.with_text(format!("\"{}\\n\"{terminator}", escape_c(&line.text)))
                })
                .collect())
        })
    }
}

/// Escape a line for use inside a C string literal.
pub fn escape_c(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
