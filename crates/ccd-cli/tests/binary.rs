//! End-to-end tests of the `ccd-text` binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const CCD: &str = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
  <component><structuredBody>
    <component><section>
      <code code="10160-0"/>
      <title>MEDICATIONS</title>
      <text><table>
        <thead><tr><th>Medication</th><th>Dose</th></tr></thead>
        <tbody><tr><td>Aspirin</td><td>81mg</td></tr></tbody>
      </table></text>
    </section></component>
    <component><section>
      <code code="48765-2"/>
      <text><table><thead><tr><th>Substance</th></tr></thead></table></text>
    </section></component>
  </structuredBody></component>
</ClinicalDocument>"#;

fn write_ccd(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("ccd.xml");
    fs::write(&path, CCD).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ccd-text"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn field_prints_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ccd(&dir);
    let output = run(&["field", path.to_str().unwrap(), "Medications", "0", "Dose"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "81mg\n");
}

#[test]
fn field_miss_prints_empty_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ccd(&dir);
    let output = run(&["field", path.to_str().unwrap(), "Allergies", "5", "Missing"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\n");
}

#[test]
fn extract_prints_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ccd(&dir);
    let output = run(&[
        "--color",
        "never",
        "extract",
        path.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["Medications"][0]["Medication"], "Aspirin");
    assert_eq!(json["Allergies"], serde_json::json!([]));
}

#[test]
fn extract_table_shows_section_titles() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ccd(&dir);
    let output = run(&["--color", "never", "extract", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MEDICATIONS"));
    assert!(stdout.contains("Aspirin"));
}

#[test]
fn domains_lists_classification_table() {
    let output = run(&["domains"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("30954-2"));
    assert!(stdout.contains("Insurances"));
}

#[test]
fn missing_file_fails() {
    let output = run(&["extract", "/nonexistent/ccd.xml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: read "));
}
