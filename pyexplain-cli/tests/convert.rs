use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn convert_markdown_file_to_html() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "# Title\n- item\n1. first").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("html");

    cmd.assert().success().stdout(
        r#"<div class="markdown-content"><h1>Title</h1><li class="md-list-unordered">item</li><li class="md-list-ordered">first</li></div>"#,
    );
}

#[test]
fn convert_is_the_default_subcommand() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "## Sub").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("tag");

    cmd.assert()
        .success()
        .stdout("<document>\n  <heading level=\"2\">Sub</heading>\n</document>\n");
}

#[test]
fn convert_reads_markdown_from_stdin() {
    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg("convert")
        .arg("-")
        .arg("--to")
        .arg("json")
        .arg("--extra-pretty")
        .arg("false")
        .write_stdin("## Sub\n");

    cmd.assert()
        .success()
        .stdout(r#"{"blocks":[{"type":"heading","level":2,"text":"Sub"},{"type":"spacer"}]}"#);
}

#[test]
fn convert_json_back_to_markdown() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("blocks.json");
    fs::write(
        &input_path,
        r#"{"blocks":[
            {"type":"heading","level":1,"text":"Title"},
            {"type":"paragraph","segments":[{"text":"a","emphasized":false},{"text":"b","emphasized":true}]},
            {"type":"code_block","lines":["x = 1"]}
        ]}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("markdown");

    cmd.assert()
        .success()
        .stdout("# Title\na**b\n```\nx = 1\n```");
}

#[test]
fn convert_writes_output_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    let output_path = dir.path().join("notes.tree");
    fs::write(&input_path, "plain").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("treeviz")
        .arg("-o")
        .arg(output_path.as_os_str());

    cmd.assert().success().stdout("");
    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.starts_with("⧉ Document (1 block)\n"));
    assert!(written.ends_with("plain\n"));
}

#[test]
fn convert_passes_extra_params_to_the_format() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "abcdefghij").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("treeviz")
        .arg("--extra-label-width")
        .arg("3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("abc…"));
}

#[test]
fn convert_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("pdf");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Format 'pdf' not found"));
}

#[test]
fn convert_rejects_unsupported_parameter() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("tag")
        .arg("--extra-color");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not support"));
}

#[test]
fn convert_rejects_parameter_of_another_format() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("tag")
        .arg("--extra-standalone");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "does not support parameter(s): standalone",
        ));
}

#[test]
fn convert_requires_detectable_source_format() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.rst");
    fs::write(&input_path, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect format"));
}

#[test]
fn convert_reports_missing_input() {
    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg("convert")
        .arg("does-not-exist.md")
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error reading file 'does-not-exist.md'",
        ));
}

#[test]
fn list_formats_shows_every_format() {
    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("html")
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("markdown"))
            .and(predicate::str::contains("tag"))
            .and(predicate::str::contains("treeviz")),
    );
}

#[test]
fn generate_css_prints_baseline_stylesheet() {
    let mut cmd = cargo_bin_cmd!("pyexplain");
    cmd.arg("generate-css");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".markdown-content h1"));
}
