// Generates `test.c` from the checked-in `test_template.c` and compares it
// with `truth.c`, each run in its own temporary copy of the fixture directory.

use std::fs;
use std::path::{Path, PathBuf};

use ctempl_core::fixture::{
    first_difference, normalize_dirpath, verify_module, GeneratedFile, DEFAULT_TRUTH_FILE,
    DIRPATH_PLACEHOLDER,
};
use ctempl_core::generate::{make_c_files, GenerateOptions};
use ctempl_core::TemplateError;
use tempfile::{tempdir, TempDir};

fn fixture_source() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/template_test")
}

fn fixture_copy() -> TempDir {
    let tmp = tempdir().expect("tempdir");
    for name in ["test_template.c", "truth.c"] {
        fs::copy(fixture_source().join(name), tmp.path().join(name)).expect("copy fixture");
    }
    tmp
}

#[test]
fn make_c_files_matches_truth() {
    let tmp = fixture_copy();
    let dirpath = tmp.path();
    let test_output = dirpath.join("test.c");
    if test_output.exists() {
        fs::remove_file(&test_output).unwrap();
    }

    make_c_files(dirpath, &["test".to_string()], &GenerateOptions::default()).unwrap();

    let truth = fs::read_to_string(dirpath.join("truth.c")).unwrap();
    let test = fs::read_to_string(&test_output).unwrap();
    let test = test.replace(&*dirpath.to_string_lossy(), DIRPATH_PLACEHOLDER);

    assert_eq!(truth, test);

    fs::remove_file(&test_output).unwrap();
}

#[test]
fn verify_module_passes_and_cleans_up() {
    let tmp = fixture_copy();
    let report = verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).expect("fixture matches");
    assert_eq!(report.module, "test");
    assert!(report.lines > 0);
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn verify_module_is_repeatable() {
    let tmp = fixture_copy();
    verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).expect("first run");
    verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).expect("second run");
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn verify_module_replaces_a_stale_artifact() {
    let tmp = fixture_copy();
    fs::write(tmp.path().join("test.c"), "left over from a failed run").unwrap();
    verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).expect("fixture matches");
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn normalized_output_does_not_depend_on_location() {
    let first = fixture_copy();
    let second = fixture_copy();
    let nested = second.path().join("some/deeper/checkout");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(first.path().join("test_template.c"), nested.join("test_template.c")).unwrap();

    let mut normalized = Vec::new();
    for dir in [first.path(), nested.as_path()] {
        make_c_files(dir, &["test".to_string()], &GenerateOptions::default()).unwrap();
        let text = fs::read_to_string(dir.join("test.c")).unwrap();
        normalized.push(normalize_dirpath(&text, dir));
    }
    assert_eq!(normalized[0], normalized[1]);
    assert!(!normalized[0].contains(&*first.path().to_string_lossy()));
}

#[test]
fn mismatch_reports_first_difference_and_still_cleans_up() {
    let tmp = fixture_copy();
    let truth_path = tmp.path().join("truth.c");
    let truth = fs::read_to_string(&truth_path).unwrap();
    fs::write(&truth_path, truth.replace("reduce_mean_int32", "reduce_mean_int64")).unwrap();

    let err = verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).unwrap_err();
    match err {
        TemplateError::FixtureMismatch { module, first_difference, expected, actual } => {
            assert_eq!(module, "test");
            assert_eq!(first_difference.line, 34);
            assert!(expected.contains("reduce_mean_int64"));
            assert!(actual.contains("reduce_mean_int32"));
        }
        other => panic!("expected FixtureMismatch, got {other:?}"),
    }
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn generator_failure_still_cleans_up() {
    let tmp = fixture_copy();
    fs::write(tmp.path().join("test_template.c"), "/* dtype end */\n").unwrap();
    fs::write(tmp.path().join("test.c"), "stale").unwrap();

    let err = verify_module(tmp.path(), "test", DEFAULT_TRUTH_FILE).unwrap_err();
    assert!(matches!(err, TemplateError::UnmatchedEnd { marker: "dtype", .. }), "got {err:?}");
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn missing_truth_file_is_an_io_error() {
    let tmp = fixture_copy();
    let err = verify_module(tmp.path(), "test", "absent.c").unwrap_err();
    match err {
        TemplateError::Io { path, .. } => assert_eq!(path, tmp.path().join("absent.c")),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(!tmp.path().join("test.c").exists());
}

#[test]
fn generated_file_guard_removes_on_drop() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("out.c");
    fs::write(&path, "stale").unwrap();
    {
        let guard = GeneratedFile::claim(&path).unwrap();
        assert!(!path.exists(), "claim removes stale file");
        fs::write(guard.path(), "fresh").unwrap();
        assert_eq!(guard.read_to_string().unwrap(), "fresh");
    }
    assert!(!path.exists(), "drop removes generated file");
}

#[test]
fn first_difference_detects_trailing_newline_changes() {
    assert_eq!(first_difference("a\nb\n", "a\nb\n"), None);
    let diff = first_difference("a\nb\n", "a\nb").unwrap();
    assert_eq!(diff.line, 3);
    assert_eq!(diff.expected.as_deref(), Some(""));
    assert_eq!(diff.actual, None);
    assert_eq!(diff.to_string(), "line 3: expected \"\", found <end of file>");
}

// The only test in this file that changes the working directory; every other
// test here uses absolute paths.
#[test]
fn relative_directories_are_resolved_before_normalizing() {
    let tmp = fixture_copy();
    let nested = tmp.path().join("data");
    fs::create_dir_all(&nested).unwrap();
    for name in ["test_template.c", "truth.c"] {
        fs::copy(tmp.path().join(name), nested.join(name)).unwrap();
    }
    std::env::set_current_dir(tmp.path()).unwrap();

    for dir in [".", "data", "./data"] {
        let report = verify_module(Path::new(dir), "test", DEFAULT_TRUTH_FILE)
            .unwrap_or_else(|err| panic!("verify through `{dir}`: {err}"));
        assert_eq!(report.module, "test");
        assert!(Path::new(&report.output_path).is_absolute());
    }
    assert!(!tmp.path().join("test.c").exists());
    assert!(!nested.join("test.c").exists());

    make_c_files(Path::new("./data"), &["test".to_string()], &GenerateOptions::default()).unwrap();
    let generated = fs::read_to_string(nested.join("test.c")).unwrap();
    let cwd = std::env::current_dir().unwrap();
    let expected_header = format!("#line 1 \"{}/data/test_template.c\"\n", cwd.display());
    assert!(generated.starts_with(&expected_header), "got {:?}", generated.lines().next());
}
