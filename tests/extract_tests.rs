//! Echo extraction tests - CLI behavior of `bomwerk extract`

mod common;

use common::{bomwerk, write_file, SAMPLE_ECHO};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_extract_emits_jsonl_in_occurrence_order() {
    let output = bomwerk()
        .args(["extract", "--product", "filterslang", "--version", "1.0.0"])
        .write_stdin(SAMPLE_ECHO)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"bom_tag\":\"sleeve\""));
    assert!(lines[1].contains("\"bom_tag\":\"ring1\""));
}

#[test]
fn test_extract_record_shape() {
    let output = bomwerk()
        .args(["extract", "--product", "filterslang", "--version", "1.0.0"])
        .write_stdin(r#"ECHO: "BOM_ITEM:", "ring1", ["D", 150, "L", 1500, "t", 2.0]"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "{\"product\":\"filterslang\",\"version\":\"1.0.0\",\"bom_tag\":\"ring1\",\"D\":150,\"L\":1500,\"t\":2.0}\n"
    );
}

#[test]
fn test_extract_is_idempotent() {
    let run = || {
        bomwerk()
            .args(["extract", "--product", "filterslang", "--version", "1.0.0"])
            .write_stdin(SAMPLE_ECHO)
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_extract_without_marker_fails() {
    bomwerk()
        .args(["extract", "--product", "p", "--version", "1"])
        .write_stdin("no items in this output\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no BOM_ITEM records"));
}

#[test]
fn test_extract_allow_empty_succeeds_with_empty_output() {
    let output = bomwerk()
        .args([
            "extract",
            "--product",
            "p",
            "--version",
            "1",
            "--allow-empty",
        ])
        .write_stdin("no items in this output\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extract_writes_jsonl_and_csv_files() {
    let tmp = TempDir::new().unwrap();
    let echo = write_file(&tmp, "render.echo", SAMPLE_ECHO);
    let jsonl = tmp.path().join("out/bom.jsonl");
    let csv = tmp.path().join("out/bom.csv");

    bomwerk()
        .args(["extract", "--product", "filterslang", "--version", "1.0.0"])
        .arg("--echo")
        .arg(&echo)
        .arg("--jsonl")
        .arg(&jsonl)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success();

    let jsonl_text = fs::read_to_string(&jsonl).unwrap();
    assert_eq!(jsonl_text.lines().count(), 2);

    let csv_text = fs::read_to_string(&csv).unwrap();
    let header = csv_text.lines().next().unwrap();
    // Preferred ordering first; both records' keys are unioned.
    assert_eq!(
        header,
        "product,version,bom_tag,L,D,t,medium,top,open_top,bottom,bottom_opt,rings,ring_w,ring_t,reinforce,rein_side,rein_spans,productzijde"
    );
    // Nested values land as compact JSON inside cells.
    assert!(csv_text.contains("\"[300,600,900]\""));
    assert!(csv_text.contains("\"[[100,200],[400,650]]\""));
}

#[test]
fn test_extract_quoted_form_across_lines() {
    let text = "\"BOM_ITEM:\", \"strip\", [\"D\", 150,\n \"L\", 1500]\n";
    let output = bomwerk()
        .args(["extract", "--product", "p", "--version", "1"])
        .write_stdin(text)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"bom_tag\":\"strip\""));
}

#[test]
fn test_extract_bare_form_uses_last_tier() {
    let text = "BOM_ITEM: [\"D\", 150,\n \"L\", 1500]\n";
    let output = bomwerk()
        .args(["extract", "--product", "p", "--version", "1"])
        .write_stdin(text)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"D\":150"));
}

#[test]
fn test_extract_requires_product_and_version() {
    let tmp = TempDir::new().unwrap();
    bomwerk()
        .current_dir(tmp.path())
        .arg("extract")
        .write_stdin(SAMPLE_ECHO)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no product name"));
}

#[test]
fn test_extract_falls_back_to_workspace_config() {
    let tmp = TempDir::new().unwrap();
    write_file(
        &tmp,
        ".bomwerk.yaml",
        "product: filterslang\nversion: 2.1.0\n",
    );

    let output = bomwerk()
        .current_dir(tmp.path())
        .arg("extract")
        .write_stdin(r#"ECHO: "BOM_ITEM:", ["D", 10]"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"product\":\"filterslang\""));
    assert!(stdout.contains("\"version\":\"2.1.0\""));
}
