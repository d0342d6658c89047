//! CLI integration tests
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success |
//! | 1 | Unreadable input, invalid dataset, or render failure |
//! | 2 | Invalid command-line arguments |

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const DATASET: &str = r#"{
    "case": {
        "name": "NovExa Leadership",
        "id": "2024-CV-10321",
        "type": "Securities Fraud Investigation"
    },
    "events": [
        { "actor": "Marcus Hale", "action": "served as CFO",
          "category": "Financial Leadership", "start": "2019", "end": "2023-04-03",
          "context": "Resigned during informal inquiry" },
        { "actor": "Ray Lin", "action": "interim CFO",
          "category": "Financial Leadership", "start": "2023-04-10", "end": "2024-08" },
        { "actor": "FDA", "action": "informal inquiry",
          "category": "Regulator", "start": "2023-03-15", "milestone": true }
    ]
}"#;

const DIRECTIVE: &str = r##"{
    "highlights": [
        { "subject": "Ray Lin", "color": "#ef4444", "reason": "Appointed during inquiry" }
    ],
    "titleOverride": "CFO Succession"
}"##;

fn hubble() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hubble"));
    for var in ["HUBBLE_FORMAT", "HUBBLE_WIDTH", "HUBBLE_THEME", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str], file: &Path) -> Output {
    hubble()
        .args(args)
        .arg(file)
        .output()
        .expect("failed to execute hubble")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_reports_counts() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    let output = run(&["check"], &file);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("NovExa Leadership"));
    assert!(text.contains("3 (2 bars, 1 milestones)"));
    assert!(text.contains("OK"));
}

#[test]
fn check_fails_on_malformed_date() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "bad.json", &DATASET.replace("2023-04-10", "2023-13-10"));

    let output = run(&["check"], &file);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("2023-13-10"));
}

#[test]
fn missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let output = run(&["check"], &dir.path().join("absent.json"));
    assert_eq!(output.status.code(), Some(1));
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_svg_to_stdout() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    let output = run(&["render"], &file);
    assert_eq!(output.status.code(), Some(0));
    let svg = stdout(&output);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Marcus Hale"));
}

#[test]
fn render_each_format_to_file() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    for (format, marker) in [
        ("svg", "<svg"),
        ("html", "<!DOCTYPE html>"),
        ("json", "\"bars\""),
        ("mermaid", "gantt"),
    ] {
        let out = dir.path().join(format!("chart.{}", format));
        let output = run(
            &["render", "-f", format, "-o", out.to_str().unwrap()],
            &file,
        );
        assert_eq!(output.status.code(), Some(0), "format {}", format);
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains(marker), "format {}", format);
    }
}

#[test]
fn format_and_width_from_environment() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    let output = hubble()
        .env("HUBBLE_FORMAT", "json")
        .env("HUBBLE_WIDTH", "1200")
        .arg("render")
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["width"], 1200.0);
}

#[test]
fn unusable_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    for width in ["NaN", "inf", "0", "-5", "450", "wide"] {
        let output = run(&["render", "--width", width], &file);
        assert_eq!(output.status.code(), Some(2), "width {}", width);
        assert!(stdout(&output).is_empty(), "width {}", width);
    }

    let output = hubble()
        .env("HUBBLE_WIDTH", "NaN")
        .arg("render")
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("width must be a finite number"));
}

#[test]
fn dark_flag_switches_theme() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);

    let output = run(&["render", "-f", "json", "--dark"], &file);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["theme"]["paper_color"], "#16213e");
}

#[test]
fn render_without_bars_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "points.json",
        r#"{ "case": { "name": "Points" },
             "events": [ { "actor": "FDA", "action": "inquiry", "category": "x",
                           "start": "2020", "milestone": true } ] }"#,
    );

    let output = run(&["render"], &file);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No events with both start and end dates"));
}

// =============================================================================
// restyle
// =============================================================================

#[test]
fn restyle_applies_replacement_directive() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);
    let directive = write(&dir, "directive.json", DIRECTIVE);

    let output = hubble()
        .args(["restyle", "-f", "json", "--directive"])
        .arg(&directive)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["header"]["title"]["text"], "CFO Succession");
    assert_eq!(value["meta"]["highlighted"][0], "Ray Lin");
}

#[test]
fn restyle_rejects_bad_directive() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "case.json", DATASET);
    let directive = write(&dir, "directive.json", "{ not json");

    let output = hubble()
        .args(["restyle", "--directive"])
        .arg(&directive)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
