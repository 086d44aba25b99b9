use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_luadoc")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_codex(dir: &Path) -> Value {
    let text = std::fs::read_to_string(dir.join("Codex.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_json() {
    let input = std::fs::read_to_string(fixture_path("mockup/ScreenUnit.lua")).unwrap();

    let assert = cmd().write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let codex: Value = serde_json::from_str(&output).unwrap();

    let screen = &codex["classes"]["ScreenUnit"];
    assert_eq!(screen["parent"], "Element");
    assert_eq!(screen["methods"]["setHTML"]["isMethodStatic"], true);
    assert_eq!(
        screen["events"]["onMouseDown"]["params"].as_array().unwrap().len(),
        2
    );
    assert_eq!(
        screen["events"]["onMouseDown"]["description"],
        "Emitted when the mouse is pressed on the screen"
    );
    assert_eq!(screen["events"]["mouseDown"]["description"], "");
    assert_eq!(codex["globals"]["unit"]["type"], "ControlUnit");
}

#[test]
fn stdin_empty_input() {
    let assert = cmd().args(["--no-globals"]).write_stdin("").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let codex: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(codex, serde_json::json!({"classes": {}, "globals": {}}));
}

#[test]
fn stdin_markdown_format() {
    let input = std::fs::read_to_string(fixture_path("mockup/Element.lua")).unwrap();

    let assert = cmd()
        .args(["-f", "markdown"])
        .write_stdin(input)
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.starts_with("# Codex"));
    assert!(output.contains("#### Element:getHitPoints"));
    assert!(output.contains("#### Element.getName"));
}

// -- file mode --

#[test]
fn file_mode_directory() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("mockup"))
        .assert()
        .success();

    let codex = read_codex(dir.path());
    let classes = codex["classes"].as_object().unwrap();
    assert_eq!(classes.keys().collect::<Vec<_>>(), ["Element", "ScreenUnit"]);

    let element = &codex["classes"]["Element"];
    assert!(element.get("parent").is_none());
    assert_eq!(element["methods"]["getName"]["isMethodStatic"], true);
    assert_eq!(element["methods"]["getHitPoints"]["isMethodStatic"], false);
    assert_eq!(element["methods"]["getHitPoints"]["returns"][0]["name"], "hp");
    assert_eq!(element["methods"]["getMaxHP"]["deprecated"], true);
    assert!(element["methods"]["getName"].get("deprecated").is_none());
}

#[test]
fn file_mode_glob_pattern() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("mockup/Screen*.lua"))
        .assert()
        .success();

    let codex = read_codex(dir.path());
    assert!(codex["classes"].get("ScreenUnit").is_some());
    assert!(codex["classes"].get("Element").is_none());
}

#[test]
fn file_mode_creates_nested_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist").join("Lua");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("mockup/Element.lua"))
        .assert()
        .success();

    assert!(out.join("Codex.json").exists());
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("mockup"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn file_mode_no_match_warns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("missing/*.lua"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));

    assert_eq!(read_codex(dir.path())["classes"], serde_json::json!({}));
}

// -- encoding --

const LATIN1_UNIT: &[u8] =
    b"-- Copyright Novaquark \xe9\n---@class Unit\n---Stops\nfunction self:exit()\nend\n";

#[test]
fn file_mode_tolerates_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Unit.lua");
    std::fs::write(&input, LATIN1_UNIT).unwrap();
    let out = dir.path().join("out");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(input.to_str().unwrap())
        .assert()
        .success();

    let codex = read_codex(&out);
    assert_eq!(codex["classes"]["Unit"]["methods"]["exit"]["description"], "Stops");
}

#[test]
fn stdin_tolerates_invalid_utf8() {
    let assert = cmd().write_stdin(LATIN1_UNIT).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let codex: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(codex["classes"]["Unit"]["methods"]["exit"]["isMethodStatic"], false);
}

// -- options --

#[test]
fn folded_returns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--returns", "folded"])
        .arg(fixture_path("mockup/Element.lua"))
        .assert()
        .success();

    let ret = &read_codex(dir.path())["classes"]["Element"]["methods"]["getHitPoints"]["returns"][0];
    assert!(ret.get("name").is_none());
    assert_eq!(ret["description"], "hp the current hit points");
}

#[test]
fn supplement_file_overlays_builtin_globals() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--globals", &fixture_path("supplement.json")])
        .arg(fixture_path("mockup"))
        .assert()
        .success();

    let codex = read_codex(dir.path());
    assert_eq!(codex["globals"]["unit"]["type"], "ScreenUnit");
    assert_eq!(codex["globals"]["screen"]["type"], "ScreenUnit");
    assert_eq!(codex["globals"]["system"]["type"], "System");
    assert_eq!(
        codex["classes"]["Library"]["methods"]["systemResolution3"]["isMethodStatic"],
        true
    );
    // Parsed classes untouched by an additive supplement
    assert_eq!(codex["classes"]["ScreenUnit"]["parent"], "Element");
}

#[test]
fn no_globals_flag() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--no-globals")
        .arg(fixture_path("mockup"))
        .assert()
        .success();

    assert_eq!(read_codex(dir.path())["globals"], serde_json::json!({}));
}

#[test]
fn bad_supplement_fails() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ nope").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--globals", bad.to_str().unwrap()])
        .arg(fixture_path("mockup"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn invalid_format_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "xml"])
        .arg(fixture_path("mockup"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- signature advisories --

#[test]
fn advisory_warning_on_stderr() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("mockup"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "function setWidgetVisible missing @param tags for: extra",
        ))
        // deprecated methods are exempt
        .stderr(predicate::str::contains("getMaxHP").not());
}

#[test]
fn no_validate_silences_advisories() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--no-validate")
        .arg(fixture_path("mockup"))
        .assert()
        .success()
        .stderr(predicate::str::contains("setWidgetVisible").not());
}

#[test]
fn quiet_silences_warnings() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("-q")
        .arg(fixture_path("mockup"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
