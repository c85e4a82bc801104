//! CLI end-to-end tests for `ednr`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn ednr() -> Command {
    Command::cargo_bin("ednr").unwrap()
}

#[test]
fn help_output_mentions_ednr() {
    let mut cmd = ednr();
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains("ednr"));
}

#[test]
fn version_flag_prints_a_version() {
    let mut cmd = ednr();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("0."));
}

#[test]
fn reads_forms_from_a_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1 :a [2 3]").unwrap();

    let mut cmd = ednr();
    cmd.arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1").and(predicate::str::contains(":a")).and(predicate::str::contains("[2 3]")));
}

#[test]
fn reads_forms_from_stdin_when_no_files_given() {
    let mut cmd = ednr();
    cmd.write_stdin(":k\n");
    cmd.assert().success().stdout(predicate::str::contains(":k"));
}

#[test]
fn positions_flag_prefixes_each_form() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "42").unwrap();

    let mut cmd = ednr();
    cmd.arg("--positions").arg(file.path());
    cmd.assert().success().stdout(predicate::str::contains("1:0: 42"));
}

#[test]
fn reports_unread_forms_as_a_failure() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "(1 2").unwrap();

    let mut cmd = ednr();
    cmd.arg(file.path());
    cmd.assert().failure();
}

#[test]
fn register_tag_accepts_the_tag_and_passes_its_form_through() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "#my/tag 5").unwrap();

    let mut cmd = ednr();
    cmd.arg("--register-tag").arg("my/tag").arg(file.path());
    cmd.assert().success().stdout(predicate::str::contains("5"));
}

#[test]
fn malformed_register_tag_value_is_rejected() {
    let mut cmd = ednr();
    cmd.arg("--register-tag").arg("/bad").arg("-");
    cmd.write_stdin("1\n");
    cmd.assert().failure();
}
