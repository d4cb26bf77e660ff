//! End-to-end tests for the CLI commands.
//!
//! Each test:
//! 1. Creates a temp directory as the working directory
//! 2. Feeds the fixture report through `parse` or `collect`
//! 3. Runs the specific command
//! 4. Asserts exit code + expected output

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Rows with `": "` in the fixture that are not headings.
const FIXTURE_ROWS: usize = 32;

/// Manifest directory (project root).
fn manifest_dir() -> &'static str {
    env!("CARGO_MANIFEST_DIR")
}

fn fixture_path() -> String {
    format!("{}/fixtures/system_profiler/basic.txt", manifest_dir())
}

/// Build a command pointing at the tempdir.
fn sptable(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sptable").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

/// Temp dir with the fixture collected into a snapshot.
fn setup_collected() -> TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    sptable(&dir)
        .arg("collect")
        .arg("--input")
        .arg(fixture_path())
        .assert()
        .success();
    dir
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run sptable");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ─── parse ──────────────────────────────────────────────────────────────────

#[test]
fn e2e_parse_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let rows = stdout_json(sptable(&dir).arg("parse").arg("--input").arg(fixture_path()));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), FIXTURE_ROWS);

    assert_eq!(rows[0]["section"], "Hardware");
    assert_eq!(rows[0]["subsection"], "Hardware Overview");
    assert_eq!(rows[0]["key"], "Model Name");
    assert_eq!(rows[0]["value"], "MacBook Pro");
    assert_eq!(rows[0]["data_type"], "SPHardwareDataType");
}

#[test]
fn e2e_parse_attributes_deep_entries_to_subsection() {
    let dir = tempfile::tempdir().unwrap();
    let rows = stdout_json(sptable(&dir).arg("parse").arg("--input").arg(fixture_path()));
    let device = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["key"] == "Device Name")
        .expect("Device Name row");
    assert_eq!(device["section"], "Storage");
    assert_eq!(device["subsection"], "Macintosh HD");
    assert_eq!(device["value"], "APPLE SSD AP0512R");
}

#[test]
fn e2e_parse_unknown_section_has_empty_data_type() {
    let dir = tempfile::tempdir().unwrap();
    let rows = stdout_json(sptable(&dir).arg("parse").arg("--input").arg(fixture_path()));
    let last = rows.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["section"], "Diagnostics");
    assert_eq!(last["subsection"], "");
    assert_eq!(last["key"], "Result");
    assert_eq!(last["data_type"], "");
}

#[test]
fn e2e_parse_stdin() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir)
        .arg("parse")
        .write_stdin("Memory:\n    Size: 16 GB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"section":"Memory","subsection":"","key":"Size","value":"16 GB","data_type":"SPMemoryDataType"}"#,
        ));
}

#[test]
fn e2e_parse_empty_stdin() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir)
        .arg("parse")
        .write_stdin("")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn e2e_parse_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir)
        .arg("parse")
        .arg("--input")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}

#[test]
fn e2e_parse_invalid_utf8_keeps_later_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(
        &path,
        b"Bluetooth:\n    Devices:\n      Name: Caf\xe9 Speaker\nMemory:\n    Size: 16 GB\n",
    )
    .unwrap();

    let rows = stdout_json(sptable(&dir).arg("parse").arg("--input").arg(&path));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["value"], "Caf\u{FFFD} Speaker");
    assert_eq!(rows[1]["section"], "Memory");
    assert_eq!(rows[1]["value"], "16 GB");
}

#[test]
fn e2e_collect_invalid_utf8_stores_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(
        &path,
        b"Bluetooth:\n    Devices:\n      Name: Caf\xe9 Speaker\nMemory:\n    Size: 16 GB\n",
    )
    .unwrap();

    let out = stdout_json(sptable(&dir).arg("collect").arg("--input").arg(&path));
    assert_eq!(out["rows"], 2);
    let rows = stdout_json(sptable(&dir).arg("query").arg("--section").arg("Memory"));
    assert_eq!(rows[0]["key"], "Size");
}

#[test]
fn e2e_parse_jsonl_format_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".sptable")).unwrap();
    fs::write(
        dir.path().join(".sptable/config.toml"),
        "[output]\nformat = \"jsonl\"\n",
    )
    .unwrap();

    let output = sptable(&dir)
        .arg("parse")
        .arg("--input")
        .arg(fixture_path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), FIXTURE_ROWS);
    for line in stdout.lines() {
        let row: Value = serde_json::from_str(line).unwrap();
        assert!(row["data_type"].is_string());
    }
}

#[test]
fn e2e_parse_custom_mapping_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".sptable")).unwrap();
    fs::write(
        dir.path().join(".sptable/config.toml"),
        "[classification.custom_mappings]\nDiagnostics = \"SPDiagnosticsDataType\"\n",
    )
    .unwrap();

    let rows = stdout_json(sptable(&dir).arg("parse").arg("--input").arg(fixture_path()));
    let last = rows.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["data_type"], "SPDiagnosticsDataType");
}

// ─── generate ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "macos"))]
#[test]
fn e2e_generate_is_empty_off_macos() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir)
        .arg("generate")
        .assert()
        .success()
        .stdout("[]\n");
}

// ─── collect ────────────────────────────────────────────────────────────────

#[test]
fn e2e_collect_creates_db() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_json(sptable(&dir).arg("collect").arg("--input").arg(fixture_path()));
    assert_eq!(out["rows"], FIXTURE_ROWS);
    assert_eq!(out["sections"], 6);
    assert_eq!(out["unclassified_rows"], 2);
    assert_eq!(out["unchanged"], false);
    assert!(dir.path().join(".sptable/inventory.db").exists());
}

#[test]
fn e2e_collect_twice_is_unchanged() {
    let dir = setup_collected();
    let out = stdout_json(sptable(&dir).arg("collect").arg("--input").arg(fixture_path()));
    assert_eq!(out["unchanged"], true);
}

// ─── query ──────────────────────────────────────────────────────────────────

#[test]
fn e2e_query_by_section_and_key() {
    let dir = setup_collected();
    let rows = stdout_json(
        sptable(&dir)
            .arg("query")
            .arg("--section")
            .arg("Storage")
            .arg("--key")
            .arg("Capacity"),
    );
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["subsection"], "Macintosh HD");
    assert_eq!(rows[1]["subsection"], "Data");
}

#[test]
fn e2e_query_unclassified_rows() {
    let dir = setup_collected();
    let rows = stdout_json(sptable(&dir).arg("query").arg("--data-type").arg(""));
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["section"] == "Diagnostics"));
}

#[test]
fn e2e_query_limit() {
    let dir = setup_collected();
    let rows = stdout_json(sptable(&dir).arg("query").arg("--limit").arg("3"));
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[test]
fn e2e_query_without_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir)
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sptable collect"));
}

// ─── grep ───────────────────────────────────────────────────────────────────

#[test]
fn e2e_grep_values() {
    let dir = setup_collected();
    let rows = stdout_json(sptable(&dir).arg("grep").arg("APFS").arg("--field").arg("value"));
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[test]
fn e2e_grep_invalid_field() {
    let dir = setup_collected();
    sptable(&dir)
        .arg("grep")
        .arg("x")
        .arg("--field")
        .arg("section")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key, value, or any"));
}

// ─── sections / stats ───────────────────────────────────────────────────────

#[test]
fn e2e_sections() {
    let dir = setup_collected();
    let out = stdout_json(sptable(&dir).arg("sections"));
    assert_eq!(out["count"], 6);
    let sections = out["sections"].as_array().unwrap();
    assert_eq!(sections[0]["section"], "Hardware");
    assert_eq!(sections[2]["section"], "Storage");
    assert_eq!(sections[2]["subsections"], 2);
    assert_eq!(sections[2]["rows"], 12);
}

#[test]
fn e2e_stats() {
    let dir = setup_collected();
    let out = stdout_json(sptable(&dir).arg("stats"));
    assert_eq!(out["snapshots"], 1);
    assert_eq!(out["total_rows"], FIXTURE_ROWS);
    assert_eq!(out["latest"]["unclassified_rows"], 2);
}

#[test]
fn e2e_stats_without_db() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_json(sptable(&dir).arg("stats"));
    assert_eq!(out["snapshots"], 0);
    assert!(out.get("latest").is_none());
}

// ─── columns / types ────────────────────────────────────────────────────────

#[test]
fn e2e_columns() {
    let dir = tempfile::tempdir().unwrap();
    sptable(&dir).arg("columns").assert().success().stdout(
        predicate::str::contains("\"name\":\"section\"")
            .and(predicate::str::contains("\"name\":\"data_type\""))
            .and(predicate::str::contains("\"type\":\"TEXT\"")),
    );
}

#[test]
fn e2e_types() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_json(sptable(&dir).arg("types"));
    assert_eq!(out["count"], 23);
}
