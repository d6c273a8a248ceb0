use assert_cmd::Command;
use std::fs;

fn write_sample(dir: &tempfile::TempDir, name: &str, src: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, src).expect("write sample");
    path
}

#[test]
fn build_prints_ir_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "app.elpian", "let x = 5;");

    let output = Command::cargo_bin("elpian")
        .expect("binary built")
        .arg("build")
        .arg(&sample)
        .output()
        .expect("failed to spawn elpian binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        r#"[{"type":"definition","data":{"leftSide":{"type":"identifier","data":{"name":"x"}},"rightSide":{"type":"i64","data":{"value":5}}}}]"#
    );
}

#[test]
fn build_writes_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "ui.elpian", r#"render(<div foo="bar">hello</div>);"#);
    let out = dir.path().join("ui.json");

    Command::cargo_bin("elpian")
        .expect("binary built")
        .arg("build")
        .arg(&sample)
        .arg("-o")
        .arg(&out)
        .arg("--pretty")
        .assert()
        .success();

    let written = fs::read_to_string(&out).expect("output file");
    let ir: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    let element = &ir[0]["data"]["args"][0]["data"]["value"];
    assert_eq!(element["foo"]["data"]["value"], "bar");
    assert_eq!(element["type"]["data"]["value"], "div");
    assert!(written.contains("\n  "), "expected indented output");
}

#[test]
fn syntax_error_exits_nonzero_with_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "bad.elpian", "let = 5;");

    let output = Command::cargo_bin("elpian")
        .expect("binary built")
        .arg("build")
        .arg(&sample)
        .output()
        .expect("failed to spawn elpian binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no IR may be written on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ELPIAN | ERROR | bad.elpian:1:"), "stderr: {}", stderr);
}

#[test]
fn ecma_version_flag_gates_syntax() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "arrow.elpian", "const f = () => 1;");

    Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "--ecma-version", "5"])
        .arg(&sample)
        .assert()
        .failure();

    Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "--ecma-version", "2015"])
        .arg(&sample)
        .assert()
        .success();
}

#[test]
fn unknown_ecma_version_is_rejected_by_argument_parsing() {
    Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "--ecma-version", "4", "whatever.elpian"])
        .assert()
        .failure();
}

#[test]
fn missing_file_reports_error() {
    let output = Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "does-not-exist.elpian"])
        .output()
        .expect("failed to spawn elpian binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ELPIAN | ERROR"), "stderr: {}", stderr);
}

#[test]
fn dump_ast_goes_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "d.elpian", "x = 1;");

    let output = Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "--dump", "ast"])
        .arg(&sample)
        .output()
        .expect("failed to spawn elpian binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AssignmentExpression"), "stderr: {}", stderr);
    let ir: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is still the IR");
    assert_eq!(ir[0]["type"], "assignment");
}

#[test]
fn verbose_flag_enables_info_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sample = write_sample(&dir, "v.elpian", "let x = 1;");

    let quiet = Command::cargo_bin("elpian")
        .expect("binary built")
        .arg("build")
        .arg(&sample)
        .output()
        .expect("failed to spawn elpian binary");
    assert!(quiet.status.success());
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("compiling v.elpian"));

    let verbose = Command::cargo_bin("elpian")
        .expect("binary built")
        .args(["build", "-v"])
        .arg(&sample)
        .output()
        .expect("failed to spawn elpian binary");
    assert!(verbose.status.success());
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("INFO"), "stderr: {}", stderr);
    assert!(stderr.contains("compiling v.elpian"), "stderr: {}", stderr);
    // Records from the compiler library reach the same subscriber.
    assert!(stderr.contains("lowered"), "stderr: {}", stderr);
}
