//! Integration tests for the `linediff diff` and `linediff export` commands.

use assert_cmd::Command;
use assert_cmd::cargo;
use tempfile::TempDir;

use linediff_testkit::fixtures::sample_texts;
use linediff_testkit::schema::validate_report_json;

fn linediff_cmd() -> Command {
    Command::new(cargo::cargo_bin!("linediff"))
}

fn write_pair(dir: &std::path::Path, original: &str, modified: &str) {
    std::fs::write(dir.join("before.txt"), original).unwrap();
    std::fs::write(dir.join("after.txt"), modified).unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn unified_output_by_default() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, sample_texts::HELLO_ORIGINAL, sample_texts::HELLO_MODIFIED);

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir).args(["diff", "before.txt", "after.txt"]);

    let out = stdout_of(&mut cmd);
    assert_eq!(
        out,
        "  function hello() {\n\
         ~   console.log('Hello'); →   console.log('Hello World');\n\
         +   console.log('Modified');\n    return true;\n  }\n"
    );
}

#[test]
fn exit_code_flag_reports_differences() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "a\n", "b\n");

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--exit-code"]);
    cmd.assert().code(2);

    write_pair(dir, "same\n", "same\n");
    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--exit-code"]);
    cmd.assert().code(0);
}

#[test]
fn json_output_validates_against_schema() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "a\nb\nc\n", "a\nc\nd\n");

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--format", "json"]);

    let out = stdout_of(&mut cmd);
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
    assert_eq!(json["schema"], "linediff.report.v1");
    assert_eq!(json["stats"]["removed"], 1);
    assert_eq!(json["stats"]["added"], 1);
    validate_report_json(&json).expect("report matches schema");
}

#[test]
fn side_by_side_with_swap() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "", "new\n");

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir).args([
        "diff",
        "before.txt",
        "after.txt",
        "--format",
        "side-by-side",
        "--width",
        "5",
        "--swap",
    ]);

    // Swapped, the added line becomes a removal on the left pane.
    assert_eq!(stdout_of(&mut cmd), "   1 new   <\n");
}

#[test]
fn reads_one_side_from_stdin() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    std::fs::write(dir.join("after.txt"), "x\ny\n").unwrap();

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "-", "after.txt"])
        .write_stdin("x\n");

    assert_eq!(stdout_of(&mut cmd), "  x\n+ y\n");
}

#[test]
fn config_file_sets_defaults() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "a\n", "a\nb\n");
    std::fs::write(
        dir.join("linediff.toml"),
        "[defaults]\nline_numbers = true\n",
    )
    .unwrap();

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir).args(["diff", "before.txt", "after.txt"]);

    assert_eq!(stdout_of(&mut cmd), "   1    1   a\n        2 + b\n");
}

#[test]
fn max_lines_guard_fails_with_message() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "1\n2\n3\n", "1\n");

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--max-lines", "2"]);

    let out = cmd.assert().code(1).get_output().stderr.clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("original input has 3 lines"), "{stderr}");
}

#[test]
fn missing_input_is_an_error() {
    let td = TempDir::new().expect("temp");

    let mut cmd = linediff_cmd();
    cmd.current_dir(td.path())
        .args(["diff", "nope.txt", "also-nope.txt"]);

    let out = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8(out).unwrap().contains("read nope.txt"));
}

#[test]
fn export_writes_both_texts() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "a\nb", "a\nc\n");

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir).args([
        "export",
        "before.txt",
        "after.txt",
        "--out",
        "artifacts/linediff/export.txt",
    ]);
    cmd.assert().success();

    let doc = std::fs::read_to_string(dir.join("artifacts/linediff/export.txt")).unwrap();
    assert_eq!(
        doc,
        "=== before.txt ===\na\nb\n\n=== after.txt ===\na\nc\n"
    );
}

#[test]
fn non_utf8_input_is_diffed_not_rejected() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    std::fs::write(dir.join("before.txt"), b"caf\xe9\nsame\n").unwrap();
    std::fs::write(dir.join("after.txt"), "café\nsame\n").unwrap();

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--exit-code"]);

    let out = cmd.assert().code(2).get_output().stdout.clone();
    assert_eq!(String::from_utf8(out).unwrap(), "~ caf\u{FFFD} → café\n  same\n");
}

#[test]
fn flag_turns_off_config_setting() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    write_pair(dir, "a\n", "a\nb\n");
    std::fs::write(
        dir.join("linediff.toml"),
        "[defaults]\nline_numbers = true\n",
    )
    .unwrap();

    let mut cmd = linediff_cmd();
    cmd.current_dir(dir)
        .args(["diff", "before.txt", "after.txt", "--no-line-numbers"]);

    assert_eq!(stdout_of(&mut cmd), "  a\n+ b\n");
}
