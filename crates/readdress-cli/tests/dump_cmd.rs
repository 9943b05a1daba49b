mod common;

use assert_cmd::Command;
use common::{address_pdf, write_test_pdf};
use predicates::prelude::*;

#[test]
fn dump_labels_pages_one_based() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = address_pdf(dir.path());

    Command::cargo_bin("readdress")
        .unwrap()
        .args(["dump"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Page 1 ---"))
        .stdout(predicate::str::contains("123 Old Street"));
}

#[test]
fn dump_text_is_raw_not_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_test_pdf(
        dir.path(),
        "mixed.pdf",
        b"BT /F1 12 Tf 50 700 Td (BLOCK C - 13) Tj ET",
    );

    // the dump keeps original casing and spacing
    Command::cargo_bin("readdress")
        .unwrap()
        .args(["dump"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("BLOCK C - 13"));
}

#[test]
fn dump_json_has_one_entry_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = address_pdf(dir.path());

    let output = Command::cargo_bin("readdress")
        .unwrap()
        .args(["dump"])
        .arg(&pdf)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let pages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let arr = pages.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["page"], 1);
    assert!(arr[0]["text"].as_str().unwrap().contains("123 Old Street"));
}

#[test]
fn shift_subcommand_writes_a_translated_copy() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = address_pdf(dir.path());

    Command::cargo_bin("readdress")
        .unwrap()
        .args(["shift"])
        .arg(&pdf)
        .args(["--dx", "10", "--dy", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated_deed.pdf"));

    let out = dir.path().join("updated_deed.pdf");
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn config_show_without_a_record() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("readdress")
        .unwrap()
        .env("READDRESS_CONFIG_DIR", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no saved configuration"));
}

#[test]
fn config_clear_removes_a_saved_record() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = address_pdf(dir.path());

    Command::cargo_bin("readdress")
        .unwrap()
        .env("READDRESS_CONFIG_DIR", dir.path())
        .args(["replace"])
        .arg(&pdf)
        .args(["Old Street", "--text", "New Address"])
        .assert()
        .success();

    Command::cargo_bin("readdress")
        .unwrap()
        .env("READDRESS_CONFIG_DIR", dir.path())
        .args(["config", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));

    Command::cargo_bin("readdress")
        .unwrap()
        .env("READDRESS_CONFIG_DIR", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no saved configuration"));
}
