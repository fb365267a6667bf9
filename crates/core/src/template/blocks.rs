use regex::Regex;

use crate::error::{TemplateError, TemplateResult};
use crate::template::literal::Literal;
use crate::template::SourceLine;

/// Begin/end marker pair for one block kind.
pub struct BlockMarkers {
    /// Marker name used in error messages (e.g. `repeat`).
    pub name: &'static str,
    begin: Regex,
    end: Regex,
}

/// Line indices of a block: `begin` is the opening marker, `end` the closing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub begin: usize,
    pub end: usize,
}

impl BlockMarkers {
    pub fn new(name: &'static str, begin: &str, end: &str) -> Self {
        Self {
            name,
            begin: Regex::new(begin).unwrap_or_else(|_| panic!("Invalid begin marker for {name}")),
            end: Regex::new(end).unwrap_or_else(|_| panic!("Invalid end marker for {name}")),
        }
    }

    /// Find the first closed block, preferring the innermost one when blocks nest.
    pub fn next_block(&self, lines: &[SourceLine]) -> TemplateResult<Option<Block>> {
        let mut open = None;
        for (idx, line) in lines.iter().enumerate() {
            if self.begin.is_match(&line.text) {
                open = Some(idx);
            } else if self.end.is_match(&line.text) {
                return match open {
                    Some(begin) => Ok(Some(Block { begin, end: idx })),
                    None => {
                        Err(TemplateError::UnmatchedEnd { marker: self.name, line: line.line_hint() })
                    }
                };
            }
        }
        match open {
            Some(begin) => Err(TemplateError::UnterminatedBlock {
                marker: self.name,
                line: lines[begin].line_hint(),
            }),
            None => Ok(None),
        }
    }
}

/// Repeatedly expand the innermost block until none remain.
///
/// `expand` receives the block lines from the opening marker up to (not
/// including) the closing marker, plus the template line of the opening marker.
/// Its output replaces the whole block, closing marker included.
pub fn expand_blocks<F>(
    mut lines: Vec<SourceLine>,
    markers: &BlockMarkers,
    mut expand: F,
) -> TemplateResult<Vec<SourceLine>>
where
    F: FnMut(&[SourceLine], usize) -> TemplateResult<Vec<SourceLine>>,
{
    while let Some(block) = markers.next_block(&lines)? {
        let line = lines[block.begin].line_hint();
        let expanded = expand(&lines[block.begin..block.end], line)?;
        lines.splice(block.begin..=block.end, expanded);
    }
    Ok(lines)
}

/// Split a block into its header comment (joined into one string) and body.
///
/// The header runs from the opening marker to the first line containing `*/`.
pub fn split_header<'a>(
    block: &'a [SourceLine],
    marker: &'static str,
    line: usize,
) -> TemplateResult<(String, &'a [SourceLine])> {
    let close = block
        .iter()
        .position(|l| l.text.contains("*/"))
        .ok_or(TemplateError::UnterminatedHeader { marker, line })?;
    let header =
        block[..=close].iter().map(|l| l.text.as_str()).collect::<Vec<_>>().join(" ");
    Ok((header, &block[close + 1..]))
}

/// Extract and parse the specification literal a header carries.
pub fn header_literal(
    header: &str,
    pattern: &Regex,
    marker: &'static str,
    line: usize,
) -> TemplateResult<Literal> {
    let spec = pattern.find(header).ok_or(TemplateError::MissingSpec { marker, line })?;
    Literal::parse(spec.as_str()).map_err(|message| TemplateError::Literal { line, message })
}
