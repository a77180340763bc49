//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a bomwerk command
pub fn bomwerk() -> Command {
    Command::new(cargo::cargo_bin!("bomwerk"))
}

/// Console-style echo output with two embedded BOM items.
pub const SAMPLE_ECHO: &str = r#"Compiling design (CSG Tree generation)...
ECHO: "render pass", 1
ECHO: "BOM_ITEM:", "sleeve", ["L", 1500, "D", 150, "t", 2.0, "medium", "PTFE", "top", "snap", "open_top", false, "bottom", "closed", "bottom_opt", "zonder", "rings", [300, 600, 900], "ring_w", 15, "ring_t", 3, "reinforce", true, "rein_side", "inside", "rein_spans", [[100, 200], [400, 650]], "productzijde", "binnen"]
ECHO: "BOM_ITEM:", "ring1", ["D", 150, "L", 1500, "t", 2.0]
Geometries in cache: 14
"#;

/// Minimal parts catalog covering the sample echo.
pub const SAMPLE_CATALOG: &str = "\
category,enum_value,material_code,part_no,description,unit,supplier
material,PTFE,MC-100,PN-PTFE-01,PTFE cloth,m2,Acme Weaving
top,snap,MC-300,PN-TOP-01,Snap ring top,pc,Fittings BV
bottom,closed,MC-200,PN-BTM-01,Closed bottom,pc,Fittings BV
bottom_opt,drain,MC-210,PN-OPT-01,Drain fitting,pc,Fittings BV
reinforcement,inside,MC-400,PN-REIN-01,Inside strip,m,Acme Weaving
";

/// Write a file into a temp directory and return its path.
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Run `bomwerk extract` over the sample echo and return the JSONL output.
pub fn extract_sample_jsonl(tmp: &TempDir) -> PathBuf {
    let echo = write_file(tmp, "render.echo", SAMPLE_ECHO);
    let jsonl = tmp.path().join("bom.jsonl");
    bomwerk()
        .args([
            "extract",
            "--product",
            "filterslang",
            "--version",
            "1.0.0",
            "--echo",
        ])
        .arg(&echo)
        .arg("--jsonl")
        .arg(&jsonl)
        .assert()
        .success();
    jsonl
}
