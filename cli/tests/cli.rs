use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/net")).unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {\n    // TODO: start\n}\n").unwrap();
    fs::write(root.join("src/net/client.rs"), "// TODO: retry\npub struct Client;\n").unwrap();
    fs::write(root.join("README.md"), "# demo\n").unwrap();
    fs::write(root.join("filescope.json"), "{}").unwrap();
    dir
}

fn filescope(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("filescope").unwrap();
    cmd.current_dir(root)
        .env_remove("FILESCOPE_LIBRARY_ROOTS")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(root.join("filescope.json"))
        .arg("--root")
        .arg(root);
    cmd
}

#[test]
fn find_resolves_partial_path() {
    let dir = project();
    filescope(dir.path())
        .args(["find", "client.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/net/client.rs"));
}

#[test]
fn find_missing_file_fails() {
    let dir = project();
    filescope(dir.path())
        .args(["find", "nothing_here.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grep_prints_json() {
    let dir = project();
    let output = filescope(dir.path())
        .args(["grep", "TODO", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["kind"], "multi_file");
    assert_eq!(value["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn read_prints_numbered_lines() {
    let dir = project();
    filescope(dir.path())
        .args(["read", "main.rs", "--offset", "1", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2\t    // TODO: start"));
}

#[test]
fn tools_lists_every_tool() {
    let dir = project();
    filescope(dir.path())
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("find_file"))
        .stdout(predicate::str::contains("search_content"))
        .stdout(predicate::str::contains("read_file"));
}
