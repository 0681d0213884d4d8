mod common;

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use common::DOBLE_JSON;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("assay-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_rules_and_typecheck() {
    let program = write_temp("rules-program.json", DOBLE_JSON);
    let rules = write_temp(
        "rules.json",
        r#"[
            {"inspection": "HasBinding", "args": {"name": "doble"}, "expected": true},
            {"inspection": "Nope", "args": {"name": "doble"}, "expected": true}
        ]"#,
    );

    let output = Command::cargo_bin("assay")
        .unwrap()
        .arg(&program)
        .arg("--rules")
        .arg(&rules)
        .arg("--typecheck")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["passed"], true);
    assert_eq!(results[1]["error"], "Unknown inspection");
    assert_eq!(report["typeErrors"], serde_json::json!([]));
}

#[test]
fn test_typecheck_by_default() {
    let program = write_temp("default-program.json", DOBLE_JSON);
    let output = Command::cargo_bin("assay")
        .unwrap()
        .arg(&program)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report.get("results").is_none());
    assert_eq!(report["typeErrors"], serde_json::json!([]));
}

#[test]
fn test_mulang_expectations() {
    let program = write_temp("mulang-program.json", DOBLE_JSON);
    let expectations = write_temp(
        "expectations.json",
        r#"{ "expectations": [{ "inspection": "Not:UsesGuards", "binding": "doble" }] }"#,
    );
    let output = Command::cargo_bin("assay")
        .unwrap()
        .arg(&program)
        .arg("-m")
        .arg(&expectations)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"][0]["passed"], true);
    assert_eq!(report["results"][0]["rule"]["inspection"], "UsesGuards");
    assert!(report.get("typeErrors").is_none());
}

#[test]
fn test_missing_program_fails() {
    Command::cargo_bin("assay")
        .unwrap()
        .arg("/definitely/not/here.json")
        .assert()
        .failure();
}

#[test]
fn test_yaml_expectations() {
    let program = write_temp("yaml-program.json", DOBLE_JSON);
    let expectations = write_temp(
        "expectations.yaml",
        "expectations:\n  - binding: doble\n    inspection: HasArithmetic\n",
    );
    let output = Command::cargo_bin("assay")
        .unwrap()
        .arg(&program)
        .arg("--mulang")
        .arg(&expectations)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"][0]["passed"], true);
}

#[test]
fn test_unknown_language_fails() {
    let program = write_temp("language-program.json", DOBLE_JSON);
    Command::cargo_bin("assay")
        .unwrap()
        .arg(&program)
        .arg("--language")
        .arg("cobol")
        .assert()
        .failure();
}
