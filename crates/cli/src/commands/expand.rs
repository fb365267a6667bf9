use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ctempl_core::layout::posix_display;
use ctempl_core::template::expand_template;

/// Expand a single template file to stdout, or to `output` when given.
pub fn expand_command(input: &str, output: Option<&str>, line_directives: bool) -> Result<()> {
    let input_path = Path::new(input);
    let src = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read template {}", input_path.display()))?;

    let location = posix_display(input_path);
    let rendered = expand_template(&src, line_directives.then_some(location.as_str()))
        .with_context(|| format!("Failed to expand template {}", input_path.display()))?;

    match output {
        Some(out) => {
            fs::write(out, &rendered).with_context(|| format!("Failed to write {out}"))?;
            println!("Expanded {} -> {} ({} bytes)", input_path.display(), out, rendered.len());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
