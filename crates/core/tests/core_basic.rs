use ctempl_core::template::{default_passes, split_lines};
use ctempl_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn default_passes_run_repeat_then_dtype_then_multiline() {
    let names: Vec<&str> = default_passes().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["repeat", "dtype", "multiline string"]);
}

#[test]
fn split_lines_numbers_from_one() {
    let lines = split_lines("a\nb\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].origin, Some(1));
    assert_eq!(lines[1].text, "b");
    assert_eq!(lines[1].origin, Some(2));
}
