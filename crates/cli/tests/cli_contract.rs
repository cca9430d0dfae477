use assert_cmd::Command;
use pdf_redactor_engine::{DocumentWriter, LopdfWriter, RgbaImage};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

fn write_fixture_pdf(dir: &Path) -> PathBuf {
    let pixels = RgbaImage::from_pixel(64, 64, image::Rgba([255, 255, 255, 255]));
    let bytes = LopdfWriter::new()
        .write_document(&pixels, &[])
        .expect("fixture PDF should be written");

    let path = dir.join("small.pdf");
    fs::write(&path, bytes).expect("fixture should be written to disk");
    path
}

fn cli() -> Command {
    Command::cargo_bin("pdf-redactor").expect("binary should be built")
}

#[test]
fn info_emits_json_with_page_count() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let fixture = write_fixture_pdf(temp.path());

    let output = cli().arg("info").arg(&fixture).assert().success().get_output().stdout.clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["page_count"], 1);
    assert!(value["first_page_size_pt"]["width"].as_f64().expect("width should be present") > 0.0);
}

#[test]
fn redact_writes_parseable_artifact() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let fixture = write_fixture_pdf(temp.path());
    let output_path = temp.path().join("out.pdf");

    cli()
        .arg("redact")
        .arg(&fixture)
        .arg("--surface")
        .arg("400x600")
        .arg("--blur")
        .arg("10,10,50x30")
        .arg("--erase")
        .arg("100,100,80x40")
        .arg("--note")
        .arg("reviewed@150,200")
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("out.pdf"));

    let bytes = fs::read(&output_path).expect("artifact should exist");
    let doc = lopdf::Document::load_mem(&bytes).expect("artifact should be a valid PDF");
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn redact_defaults_output_name() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let fixture = write_fixture_pdf(temp.path());

    cli()
        .current_dir(temp.path())
        .arg("redact")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("modified.pdf"));

    assert!(temp.path().join("modified.pdf").exists());
}

#[test]
fn info_fails_for_missing_file() {
    cli()
        .arg("info")
        .arg("missing.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn info_fails_for_non_pdf_file() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("notes.txt");
    fs::write(&path, b"plain text, not a pdf").expect("file should be written");

    cli()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid PDF"));
}

#[test]
fn redact_rejects_page_out_of_range() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let fixture = write_fixture_pdf(temp.path());

    cli()
        .arg("redact")
        .arg(&fixture)
        .arg("--page")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn redact_rejects_malformed_rectangles() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let fixture = write_fixture_pdf(temp.path());

    cli()
        .arg("redact")
        .arg(&fixture)
        .arg("--blur")
        .arg("banana")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rectangle"));
}
