use std::sync::LazyLock;

use regex::Regex;

use crate::error::{TemplateError, TemplateResult};
use crate::template::blocks::{expand_blocks, header_literal, split_header, BlockMarkers};
use crate::template::literal::Literal;
use crate::template::{SourceLine, TemplatePass};

static REPEAT_MARKERS: LazyLock<BlockMarkers> =
    LazyLock::new(|| BlockMarkers::new("repeat", r"^/\*\s*repeat\s*=\s*", r"^/\*\s*repeat end"));

static DICT_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*\}").unwrap_or_else(|_| panic!("Invalid Regex")));

/// `/* repeat = {'KEY': [...]} */ ... /* repeat end */`
///
/// Emits the body once per list index with every key replaced by the value at
/// that index. Keys are substituted in declaration order.
pub struct RepeatPass;

impl TemplatePass for RepeatPass {
    fn name(&self) -> &'static str {
        "repeat"
    }

    fn expand(&self, lines: Vec<SourceLine>) -> TemplateResult<Vec<SourceLine>> {
        expand_blocks(lines, &REPEAT_MARKERS, |block, line| {
            let (header, body) = split_header(block, REPEAT_MARKERS.name, line)?;
            let literal = header_literal(&header, &DICT_SPEC, REPEAT_MARKERS.name, line)?;
            let table = repeat_table(literal, line)?;
            Ok(expand_repeat(body, &table))
        })
    }
}

type RepeatTable = Vec<(String, Vec<String>)>;

fn repeat_table(literal: Literal, line: usize) -> TemplateResult<RepeatTable> {
    let entries = match literal {
        Literal::Dict(entries) => entries,
        _ => {
            return Err(TemplateError::Literal {
                line,
                message: "repeat header must be a dict".to_string(),
            })
        }
    };
    if entries.is_empty() {
        return Err(TemplateError::Literal { line, message: "repeat table is empty".to_string() });
    }

    let table = entries
        .into_iter()
        .map(|(key, values)| {
            values
                .into_string_list()
                .map(|values| (key, values))
                .map_err(|message| TemplateError::Literal { line, message })
        })
        .collect::<TemplateResult<RepeatTable>>()?;

    let count = table[0].1.len();
    if table.iter().any(|(_, values)| values.len() != count) {
        return Err(TemplateError::RepeatLengthMismatch { line });
    }
    Ok(table)
}

fn expand_repeat(body: &[SourceLine], table: &RepeatTable) -> Vec<SourceLine> {
    let count = table[0].1.len();
    let mut out = Vec::with_capacity(count * (body.len() + 1));
    for idx in 0..count {
        out.push(SourceLine::generated(""));
        for line in body {
            let text = table
                .iter()
                .fold(line.text.clone(), |text, (key, values)| text.replace(key, &values[idx]));
            out.push(line.with_text(text));
        }
    }
    out
}
