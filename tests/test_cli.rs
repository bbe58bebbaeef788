//! Runs the `huffdec` binary in a subprocess against fixture copies in a
//! temporary `--dir` and checks exit codes, stderr and output files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{TempDir, tempdir};

const FIXTURES: &str = "tests/fixtures";

/// Creates a temporary directory holding copies of the named fixtures.
fn dir_with(fixtures: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    for name in fixtures {
        fs::copy(Path::new(FIXTURES).join(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn huffdec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_huffdec"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run huffdec")
}

fn huffdec_in(dir: &TempDir, args: &[&str]) -> Output {
    let dir = dir.path().to_str().unwrap();
    let mut all = vec!["--dir", dir];
    all.extend_from_slice(args);
    huffdec(&all)
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// --- TESTS SUCCESS ---
#[test]
fn test_decodes_to_default_output() {
    let dir = dir_with(&["story.hdr", "story.code"]);
    let out = huffdec_in(&dir, &["story.hdr", "story.code"]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));

    let decoded = fs::read_to_string(dir.path().join("story.tokens_decoded")).unwrap();
    let expected = fs::read_to_string("tests/fixtures/story.tokens_expected").unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn test_in_memory_matches_streamed() {
    let dir = dir_with(&["abc.hdr", "abc.code"]);
    let output = dir.path().join("in_memory.out");
    let out = huffdec_in(
        &dir,
        &["--in-memory", "-o", output.to_str().unwrap(), "abc.hdr", "abc.code"],
    );
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    assert_eq!(fs::read_to_string(output).unwrap(), "a\nb\nc\nc\na\n");
}

#[test]
fn test_inputs_resolved_inside_dir() {
    let dir = dir_with(&["abc.hdr", "abc.code"]);
    let out = huffdec_in(&dir, &["elsewhere/abc.hdr", "../abc.code"]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    assert!(dir.path().join("abc.tokens_decoded").is_file());
}

#[test]
fn test_help_succeeds() {
    let out = huffdec(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--in-memory"));
}

// --- TESTS FAILURE STAGES ---
#[test]
fn test_usage_error() {
    assert_eq!(huffdec(&[]).status.code(), Some(1));
    assert_eq!(huffdec(&["--bogus", "a.hdr", "a.code"]).status.code(), Some(1));
}

#[test]
fn test_preflight_missing_dir() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let out = huffdec(&["--dir", missing.to_str().unwrap(), "abc.hdr", "abc.code"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("directory not found"), "stderr:\n{}", stderr(&out));
}

#[test]
fn test_preflight_missing_file() {
    let dir = dir_with(&["abc.code"]);
    let out = huffdec_in(&dir, &["abc.hdr", "abc.code"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_bad_code_file_start() {
    let dir = dir_with(&["abc.hdr", "bad_start.code"]);
    let out = huffdec_in(&dir, &["abc.hdr", "bad_start.code"]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("must start with 0 or 1"), "stderr:\n{}", stderr(&out));
}

#[test]
fn test_malformed_header() {
    let dir = dir_with(&["digit_start.hdr", "abc.code"]);
    let out = huffdec_in(&dir, &["digit_start.hdr", "abc.code"]);
    assert_eq!(out.status.code(), Some(6));
    assert!(stderr(&out).contains("Error reading header"), "stderr:\n{}", stderr(&out));
}

#[test]
fn test_prefix_conflict() {
    let dir = dir_with(&["conflict.hdr", "abc.code"]);
    let out = huffdec_in(&dir, &["conflict.hdr", "abc.code"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(stderr(&out).contains("Error building Huffman tree"), "stderr:\n{}", stderr(&out));
    assert!(!dir.path().join("conflict.tokens_decoded").exists());
}

#[test]
fn test_output_not_writable() {
    let dir = dir_with(&["abc.hdr", "abc.code"]);
    let output = dir.path().join("missing").join("out.tokens_decoded");
    let out = huffdec_in(&dir, &["-o", output.to_str().unwrap(), "abc.hdr", "abc.code"]);
    assert_eq!(out.status.code(), Some(8));
}

#[test]
fn test_truncated_stream() {
    let dir = dir_with(&["abc.hdr", "truncated.code"]);
    let out = huffdec_in(&dir, &["abc.hdr", "truncated.code"]);
    assert_eq!(out.status.code(), Some(9));
    assert!(stderr(&out).contains("truncated code"), "stderr:\n{}", stderr(&out));

    let partial = fs::read_to_string(dir.path().join("abc.tokens_decoded")).unwrap();
    assert_eq!(partial, "a\nb\nc\nc\n");
}
