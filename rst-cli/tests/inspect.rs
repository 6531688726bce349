use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.md");
    fs::write(&input_path, "# Title\n\nSome *text*\n").unwrap();

    let mut cmd = cargo_bin_cmd!("md2rst");
    cmd.arg("inspect").arg(input_path.as_os_str());

    cmd.assert().success().stdout(
        "⧉ Document (2 blocks)\n\
         ├─ § Heading 1: Title\n\
         │ └─ ◦ Title\n\
         └─ ¶ Paragraph\n\
         \x20 ├─ ◦ Some \n\
         \x20 └─ 𝐼 Emphasis\n\
         \x20   └─ ◦ text\n",
    );
}

#[test]
fn inspect_ir_json() {
    let mut cmd = cargo_bin_cmd!("md2rst");
    cmd.arg("inspect")
        .arg("-")
        .arg("ir-json")
        .write_stdin("1. one\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"kind\": \"list\"")
            .and(predicate::str::contains("\"ordered\": true"))
            .and(predicate::str::contains("\"tight\": true")),
    );
}

#[test]
fn inspect_rejects_unknown_transform() {
    let mut cmd = cargo_bin_cmd!("md2rst");
    cmd.arg("inspect").arg("-").arg("ast-tag").write_stdin("x");

    cmd.assert().failure();
}

#[test]
fn inspect_width_from_extra_param() {
    let mut cmd = cargo_bin_cmd!("md2rst");
    cmd.arg("inspect")
        .arg("-")
        .arg("--extra-width")
        .arg("5")
        .write_stdin("A long paragraph of text\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("◦ A lon…"));
}
