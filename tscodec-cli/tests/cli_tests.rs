use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn tscodec_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tscodec"))
}

fn corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tscodec")
        .join("tests")
        .join("data")
        .join("qt_hu_excerpt.ts")
}

fn corpus() -> String {
    corpus_path().to_string_lossy().to_string()
}

fn run(args: &[&str]) -> Output {
    tscodec_cmd().args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const DUPLICATED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="hu_HU">
<context>
    <name>QFileDialog</name>
    <message>
        <source>Open</source>
        <translation>Megnyitás</translation>
    </message>
    <message>
        <source>Open</source>
        <translation>Nyitás</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_lookup_finished_translation() {
    let output = run(&["lookup", "-i", &corpus(), "-c", "QFileDialog", "-s", "Open"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Megnyitás\n");
}

#[test]
fn test_lookup_intentionally_empty_translation() {
    let output = run(&["lookup", "-i", &corpus(), "-c", "QPrintDialog", "-s", "A4"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\n");
}

#[test]
fn test_lookup_with_comment() {
    let output = run(&[
        "lookup",
        "-i",
        &corpus(),
        "-c",
        "QDirModel",
        "-s",
        "Kind",
        "--comment",
        "Match OS X Finder",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Típus\n");
}

#[test]
fn test_lookup_unfinished_fails_without_fallback() {
    let corpus = corpus();
    let args = [
        "lookup",
        "-i",
        corpus.as_str(),
        "-c",
        "QtXmlPatterns",
        "-s",
        "An %1-attribute with value %2 has already been declared.",
    ];
    let output = run(&args);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("is unfinished"), "stderr: {}", stderr(&output));

    let mut with_fallback = args.to_vec();
    with_fallback.push("--fallback");
    let output = run(&with_fallback);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "An %1-attribute with value %2 has already been declared.\n"
    );
}

#[test]
fn test_lookup_missing_message() {
    let output = run(&["lookup", "-i", &corpus(), "-c", "QFileDialog", "-s", "Nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No message 'Nope'"));
}

#[test]
fn test_lookup_numerus_with_count() {
    let output = run(&[
        "lookup",
        "-i",
        &corpus(),
        "-c",
        "QtXmlPatterns",
        "-s",
        "%1 takes at most %n argument(s). %2 is therefore invalid.",
        "-n",
        "5",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "%1 maximum %n argumentumot fogad, így %2 érvénytelen.\n"
    );
}

#[test]
fn test_view_filters_by_context_and_status() {
    let output = run(&[
        "view",
        "-i",
        &corpus(),
        "--context",
        "QtXmlPatterns",
        "--status",
        "unfinished",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Language: hu_HU"));
    assert!(out.contains("=== Context: QtXmlPatterns ==="));
    assert!(!out.contains("=== Context: QFileDialog ==="));
    assert!(out.contains("Source: An %1-attribute with value"));
    assert!(!out.contains("Network timeout."));
    assert!(!out.contains("Status: finished"));
}

#[test]
fn test_view_unknown_context_fails() {
    let output = run(&["view", "-i", &corpus(), "--context", "NoSuchContext"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No context named 'NoSuchContext'"));
}

#[test]
fn test_view_invalid_status_fails() {
    let output = run(&["view", "-i", &corpus(), "--status", "done"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown translation type: done"));
}

#[test]
fn test_stats_json() {
    let output = run(&["stats", "-i", &corpus(), "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["language"], "hu_HU");
    assert_eq!(value["contexts"], 7);
    assert_eq!(value["messages"], 246);
    assert_eq!(value["by_status"]["unfinished"], 22);
    assert_eq!(value["by_status"]["finished"], 224);
    assert_eq!(value["numerus"], 3);
    assert_eq!(value["plural_issues"], 0);
}

#[test]
fn test_validate_clean_corpus() {
    let output = run(&["validate", "-i", &corpus(), "--strict"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no issues found"));
}

#[test]
fn test_validate_reports_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("qt_hu.ts");
    fs::write(&input, DUPLICATED).unwrap();
    let input = input.to_string_lossy().to_string();

    let output = run(&["validate", "-i", &input]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("duplicate message QFileDialog::\"Open\""), "stderr: {}", err);
    assert!(err.contains("Validation failed: 1 issue(s)"), "stderr: {}", err);

    let output = run(&["validate", "-i", &input, "--strict"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("duplicate message"));
}

#[test]
fn test_validate_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("qt_hu.ts");
    fs::write(&input, DUPLICATED).unwrap();

    let output = run(&["validate", "-i", input.to_str().unwrap(), "--json"]);
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value[0]["kind"], "duplicate_key");
}

#[test]
fn test_convert_ts_json_ts_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let json = temp_dir.path().join("qt_hu.json");
    let ts = temp_dir.path().join("nested").join("qt_hu.ts");

    let output = run(&["convert", "-i", &corpus(), "-o", json.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(json.exists());

    let output = run(&[
        "convert",
        "-i",
        json.to_str().unwrap(),
        "-o",
        ts.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read_to_string(&ts).unwrap(),
        fs::read_to_string(corpus_path()).unwrap()
    );
}

#[test]
fn test_convert_with_explicit_output_format() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("catalog.txt");
    let output = run(&[
        "convert",
        "-i",
        &corpus(),
        "-o",
        out.to_str().unwrap(),
        "--output-format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["language"], "hu_HU");
}

#[test]
fn test_convert_warns_about_catalog_issues() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("qt_hu.ts");
    let mismatched = DUPLICATED.replace(
        "<source>Open</source>\n        <translation>Nyitás",
        "<source>Open %1</source>\n        <translation>Nyitás",
    );
    fs::write(&input, mismatched).unwrap();
    let out = temp_dir.path().join("qt_hu.json");

    let output = run(&[
        "convert",
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.exists());
    let err = stderr(&output);
    assert!(err.contains("placeholder mismatch"), "stderr: {}", err);
    assert!(err.contains("missing %1"), "stderr: {}", err);
}

#[test]
fn test_convert_rejects_unknown_format_name() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("catalog.txt");
    let output = run(&[
        "convert",
        "-i",
        &corpus(),
        "-o",
        out.to_str().unwrap(),
        "--output-format",
        "po",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid output format"));
    assert!(!out.exists());
}

#[test]
fn test_convert_unknown_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("qt_hu.qm");
    let output = run(&["convert", "-i", &corpus(), "-o", out.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cannot infer output format"));
}

#[test]
fn test_debug_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("debug.json");
    let output = run(&["debug", "-i", &corpus(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["contexts"][0]["name"], "MAC_APPLICATION_MENU");
}

#[test]
fn test_config_supplies_language_and_strict() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("catalog.ts");
    fs::write(&input, DUPLICATED.replace(" language=\"hu_HU\"", "")).unwrap();
    let config = temp_dir.path().join("tscodec.toml");
    fs::write(&config, "strict = true\nlanguage = \"hu_HU\"\n").unwrap();

    let output = run(&[
        "validate",
        "-i",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("duplicate message"));

    fs::write(&config, "language = \"hu_HU\"\n").unwrap();
    let output = run(&[
        "stats",
        "-i",
        input.to_str().unwrap(),
        "--json",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["language"], "hu_HU");
}

#[test]
fn test_missing_config_file_fails() {
    let output = run(&["stats", "-i", &corpus(), "--config", "/no/such/tscodec.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config file does not exist"));
}

#[test]
fn test_missing_input_fails() {
    let output = run(&["stats", "-i", "/no/such/qt_hu.ts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("File does not exist"));
}
