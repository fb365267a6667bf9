use std::sync::LazyLock;

use regex::Regex;

use crate::error::{TemplateError, TemplateResult};
use crate::template::blocks::{expand_blocks, header_literal, split_header, BlockMarkers};
use crate::template::literal::Literal;
use crate::template::{SourceLine, TemplatePass};

static DTYPE_MARKERS: LazyLock<BlockMarkers> =
    LazyLock::new(|| BlockMarkers::new("dtype", r"^/\*\s*dtype\s*=\s*", r"^/\*\s*dtype end"));

static LIST_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]").unwrap_or_else(|_| panic!("Invalid Regex")));

const DTYPE_MARKER: &str = "DTYPE";

/// `/* dtype = [['float64', 'intp'], ...] */ ... /* dtype end */`
///
/// Emits the body once per row, replacing `DTYPE<i>` with column `i`.
pub struct DtypePass;

impl TemplatePass for DtypePass {
    fn name(&self) -> &'static str {
        "dtype"
    }

    fn expand(&self, lines: Vec<SourceLine>) -> TemplateResult<Vec<SourceLine>> {
        expand_blocks(lines, &DTYPE_MARKERS, |block, line| {
            let (header, body) = split_header(block, DTYPE_MARKERS.name, line)?;
            let literal = header_literal(&header, &LIST_SPEC, DTYPE_MARKERS.name, line)?;
            let rows = dtype_rows(literal, line)?;
            if !body.iter().any(|l| l.text.contains(DTYPE_MARKER)) {
                return Err(TemplateError::MissingDtypeMarker { line });
            }
            Ok(expand_dtypes(body, &rows))
        })
    }
}

/// Rows may be lists of strings or, for single-column tables, bare strings.
fn dtype_rows(literal: Literal, line: usize) -> TemplateResult<Vec<Vec<String>>> {
    let rows = match literal {
        Literal::List(rows) => rows,
        _ => {
            return Err(TemplateError::Literal {
                line,
                message: "dtype header must be a list".to_string(),
            })
        }
    };
    rows.into_iter()
        .map(|row| match row {
            Literal::Str(dtype) => Ok(vec![dtype]),
            other => other.into_string_list(),
        })
        .collect::<Result<Vec<Vec<String>>, String>>()
        .map_err(|message| TemplateError::Literal { line, message })
}

fn expand_dtypes(body: &[SourceLine], rows: &[Vec<String>]) -> Vec<SourceLine> {
    let mut out = Vec::with_capacity(rows.len() * (body.len() + 1));
    for row in rows {
        out.push(SourceLine::generated(""));
        for line in body {
            // Highest column first so DTYPE1 never rewrites part of DTYPE10.
            let text = row.iter().enumerate().rev().fold(line.text.clone(), |text, (i, dtype)| {
                text.replace(&format!("{DTYPE_MARKER}{i}"), dtype)
            });
            out.push(line.with_text(text));
        }
    }
    out
}
