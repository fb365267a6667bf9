use crate::template::SourceLine;

/// Collapse every run of two or more blank lines into a single empty line.
pub fn collapse_blank_runs(lines: Vec<SourceLine>) -> Vec<SourceLine> {
    let mut out: Vec<SourceLine> = Vec::with_capacity(lines.len());
    let mut run: Vec<SourceLine> = Vec::new();
    for line in lines {
        if line.is_blank() {
            run.push(line);
            continue;
        }
        flush_blank_run(&mut out, &mut run);
        out.push(line);
    }
    flush_blank_run(&mut out, &mut run);
    out
}

fn flush_blank_run(out: &mut Vec<SourceLine>, run: &mut Vec<SourceLine>) {
    match run.len() {
        0 => {}
        1 => out.append(run),
        _ => {
            run.clear();
            out.push(SourceLine::generated(""));
        }
    }
}

/// Drop blank lines at the end of the output.
pub fn trim_trailing_blank(lines: &mut Vec<SourceLine>) {
    while lines.last().map_or(false, SourceLine::is_blank) {
        lines.pop();
    }
}

/// A `#line` directive pointing the C compiler back at the template.
pub fn line_directive(line: usize, location: &str) -> String {
    format!("#line {line} \"{}\"", location.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Join lines into the final text, one trailing newline included.
///
/// With a `location`, the output opens with `#line 1 "<location>"` and a new
/// directive is emitted before any non-blank line whose template origin is not
/// the line number the compiler would otherwise assign to it.
pub fn render(lines: &[SourceLine], location: Option<&str>) -> String {
    let mut out = String::new();
    if lines.is_empty() {
        return out;
    }

    let Some(location) = location else {
        for line in lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        return out;
    };

    out.push_str(&line_directive(1, location));
    out.push('\n');
    let mut next_line = 1;
    for line in lines {
        if let Some(origin) = line.origin {
            if origin != next_line && !line.is_blank() {
                out.push_str(&line_directive(origin, location));
                out.push('\n');
                next_line = origin;
            }
        }
        out.push_str(&line.text);
        out.push('\n');
        next_line += 1;
    }
    out
}
