use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn litsift_version_text_output_contract() {
    Command::new(assert_cmd::cargo::cargo_bin!("litsift"))
        .args(["version", "--output", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("litsift "));
}

#[test]
fn litsift_doctor_text_output_contract() {
    let tmp = tempfile::tempdir().expect("export dir");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("litsift"));
    cmd.args(["doctor", "--output", "text", "--export-dir"])
        .arg(tmp.path())
        .env_remove("LITSIFT_PDF_FALLBACK")
        .env_remove("LITSIFT_OPENALEX_ENDPOINT");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("litsift doctor: ok"))
        .stdout(predicate::str::contains("- lexicons: ok"))
        .stdout(predicate::str::contains("- export_dir_writable: ok"))
        .stdout(predicate::str::contains("- pdf_engine: ok"));
}

// `--format` stays accepted as an alias for `--output`.
#[test]
fn litsift_version_format_alias_contract() {
    Command::new(assert_cmd::cargo::cargo_bin!("litsift"))
        .args(["version", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("litsift "));
}
