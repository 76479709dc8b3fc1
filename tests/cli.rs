use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn notebook(cells: &[(&str, &str)]) -> String {
    let cells: Vec<serde_json::Value> = cells
        .iter()
        .map(|(kind, text)| serde_json::json!({"cell_type": kind, "metadata": {}, "source": text}))
        .collect();
    serde_json::json!({"nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": cells})
        .to_string()
}

fn notebook_tree(temp: &TempDir) -> PathBuf {
    let nbs = temp.path().join("nbs");
    fs::create_dir_all(nbs.join("child")).unwrap();
    fs::write(nbs.join("__init__.py"), "").unwrap();
    fs::write(nbs.join("child").join("__init__.py"), "").unwrap();
    fs::write(
        nbs.join("module.ipynb"),
        notebook(&[
            ("code", "%load_ext autoreload\ndef hello_world():\n    print('hello world')"),
            ("markdown", "# Greeting"),
        ]),
    )
    .unwrap();
    fs::write(
        nbs.join("child").join("baby_module.ipynb"),
        notebook(&[("code", "def babble():\n    print('goo')")]),
    )
    .unwrap();
    nbs
}

fn nbimport(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nbimport").unwrap();
    cmd.current_dir(cwd);
    cmd
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    nbimport(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert-one"));
}

#[test]
fn test_convert_tree() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);
    let pkg = temp.path().join("pkg");

    nbimport(temp.path())
        .arg("convert")
        .arg(&nbs)
        .arg(&pkg)
        .assert()
        .success()
        .stdout(predicate::str::contains("nbs"));

    assert_eq!(
        fs::read_to_string(pkg.join("module.py")).unwrap(),
        "def hello_world():\n    print('hello world')\n"
    );
    assert!(pkg.join("child").join("baby_module.py").is_file());
    assert!(pkg.join("child").join("__init__.py").is_file());
}

#[test]
fn test_convert_tree_json_report() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);
    let pkg = temp.path().join("pkg");

    let output = nbimport(temp.path())
        .args(["convert", "--json"])
        .arg(&nbs)
        .arg(&pkg)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["package"], "nbs");
    assert_eq!(report["directories"], 2);
    assert_eq!(report["converted"].as_array().unwrap().len(), 2);
}

#[test]
fn test_convert_one_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);
    fs::write(nbs.join("module.py"), "original").unwrap();

    nbimport(temp.path())
        .arg("convert-one")
        .arg(nbs.join("module.ipynb"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(nbs.join("module.py")).unwrap(), "original");

    nbimport(temp.path())
        .arg("convert-one")
        .arg(nbs.join("module.ipynb"))
        .arg("--overwrite")
        .assert()
        .success();
    assert!(fs::read_to_string(nbs.join("module.py"))
        .unwrap()
        .starts_with("def hello_world"));
}

#[test]
fn test_keep_directives_without_shell_fails() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);

    nbimport(temp.path())
        .arg("convert-one")
        .arg(nbs.join("module.ipynb"))
        .arg("--keep-directives")
        .assert()
        .failure()
        .stderr(predicate::str::contains("shell transformer"));
    assert!(!nbs.join("module.py").exists());
}

#[test]
fn test_source_of_nested_module() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);

    nbimport(temp.path())
        .arg("source")
        .arg(&nbs)
        .arg("nbs.child.baby_module")
        .assert()
        .success()
        .stdout("def babble():\n    print('goo')\n");
}

#[test]
fn test_spec_of_package() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);

    let output = nbimport(temp.path())
        .args(["spec", "--json"])
        .arg(&nbs)
        .arg("nbs")
        .output()
        .unwrap();
    assert!(output.status.success());

    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(spec["is_package"], true);
    let locations = spec["submodule_search_locations"].as_array().unwrap();
    assert_eq!(locations.len(), 1);
    assert!(locations[0].as_str().unwrap().ends_with("child"));
}

#[test]
fn test_unknown_module() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);

    nbimport(temp.path())
        .arg("spec")
        .arg(&nbs)
        .arg("nbs.missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No module named 'nbs.missing'"));
}

#[test]
fn test_config_changes_conventions() {
    let temp = TempDir::new().unwrap();
    let nbs = notebook_tree(&temp);
    fs::write(
        temp.path().join("nbimport.toml"),
        "[conventions]\nsource_extension = \"txt\"\n",
    )
    .unwrap();

    nbimport(temp.path())
        .arg("convert-one")
        .arg(nbs.join("module.ipynb"))
        .assert()
        .success();
    assert!(nbs.join("module.txt").is_file());
}
