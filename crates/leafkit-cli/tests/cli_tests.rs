//! End-to-end tests for the `leafkit` binary over temporary catalog and
//! project trees.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A catalog, a project and an empty config file under one temp dir.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("catalog")).unwrap();
        fs::create_dir_all(dir.path().join("app/src/models")).unwrap();
        fs::write(dir.path().join("leafkit.toml"), "").unwrap();
        Self { dir }
    }

    fn catalog(&self) -> PathBuf {
        self.dir.path().join("catalog")
    }

    fn project(&self) -> PathBuf {
        self.dir.path().join("app")
    }

    fn leaf(&self, name: &str, manifest: &str) -> &Self {
        let root = self.catalog().join(name);
        fs::create_dir_all(root.join("models")).unwrap();
        fs::write(root.join("leaf.json"), manifest).unwrap();
        fs::write(root.join("index.ts"), format!("// {name}\n")).unwrap();
        self
    }

    fn installed(&self, name: &str) -> PathBuf {
        self.project().join("src").join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("leafkit");
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("leafkit.toml"))
            .arg("--catalog")
            .arg(self.catalog())
            .arg("--project")
            .arg(self.project());
        cmd
    }
}

fn auth_catalog(fx: &Fixture) {
    fx.leaf(
        "leaf-auth",
        r#"{ "name": "leaf-auth", "version": "1.0.0", "description": "Sign-in",
             "dependencies": ["leaf-session"],
             "requirements": [{ "type": "model", "name": "User" }] }"#,
    )
    .leaf(
        "leaf-session",
        r#"{ "name": "leaf-session", "version": "1.0.0" }"#,
    );
}

fn version_of(dir: &Path) -> String {
    let raw = fs::read_to_string(dir.join("leaf.json")).unwrap();
    serde_json::from_str::<serde_json::Value>(&raw).unwrap()["version"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn help_and_version() {
    cargo_bin_cmd!("leafkit")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("leafkit"));
    cargo_bin_cmd!("leafkit")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_catalog_as_json() {
    let fx = Fixture::new();
    auth_catalog(&fx);
    // Not a leaf: no prefix.
    fs::create_dir_all(fx.catalog().join("shared")).unwrap();

    let output = fx.cmd().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["leaf-auth", "leaf-session"]);
}

#[test]
fn add_installs_dependencies_when_requirements_met() {
    let fx = Fixture::new();
    auth_catalog(&fx);
    fs::write(fx.project().join("src/models/User.ts"), "export {}\n").unwrap();

    fx.cmd().args(["add", "leaf-auth", "--yes"]).assert().success();

    assert!(fx.installed("leaf-session").join("index.ts").is_file());
    assert!(fx.installed("leaf-auth").join("leaf.json").is_file());
    assert!(fx.project().join(".leafkit/installed.json").is_file());
}

#[test]
fn add_refuses_unmet_requirements() {
    let fx = Fixture::new();
    auth_catalog(&fx);

    fx.cmd()
        .args(["add", "leaf-auth", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requirement"));
    assert!(!fx.installed("leaf-session").exists());
    assert!(!fx.installed("leaf-auth").exists());
}

#[test]
fn dry_run_as_json() {
    let fx = Fixture::new();
    auth_catalog(&fx);

    let output = fx
        .cmd()
        .args(["--output-format", "json", "add", "leaf-auth", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["would_refuse"], true);
    assert_eq!(plan["steps"][0]["leaf"], "leaf-session");
    assert_eq!(plan["steps"][1]["missing"][0], "model User");
    assert!(!fx.installed("leaf-session").exists());
}

#[test]
fn add_without_terminal_needs_yes() {
    let fx = Fixture::new();
    fx.leaf("leaf-x", r#"{ "name": "leaf-x", "version": "1.0.0" }"#);

    fx.cmd()
        .args(["add", "leaf-x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
    assert!(!fx.installed("leaf-x").exists());
}

#[test]
fn unknown_leaf_exits_not_found() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["info", "leaf-nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("leaf-nope"));
    fx.cmd().args(["remove", "leaf-nope", "--yes"]).assert().code(3);
}

#[test]
fn invalid_leaf_name_is_a_user_error() {
    let fx = Fixture::new();
    fx.cmd().args(["check", "../etc"]).assert().code(2);
}

#[test]
fn remove_deletes_only_the_leaf() {
    let fx = Fixture::new();
    fx.leaf("leaf-x", r#"{ "name": "leaf-x", "version": "1.0.0" }"#);
    fs::write(fx.project().join("src/models/User.ts"), "").unwrap();
    fx.cmd().args(["add", "leaf-x", "--yes"]).assert().success();

    fx.cmd().args(["remove", "leaf-x", "--yes"]).assert().success();
    assert!(!fx.installed("leaf-x").exists());
    assert!(fx.project().join("src/models/User.ts").is_file());
}

#[test]
fn outdated_and_update() {
    let fx = Fixture::new();
    fx.leaf("leaf-x", r#"{ "name": "leaf-x", "version": "1.0.0" }"#);
    fx.cmd().args(["add", "leaf-x", "--yes"]).assert().success();

    fx.cmd()
        .args(["outdated", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    fx.leaf("leaf-x", r#"{ "name": "leaf-x", "version": "1.2.0" }"#);
    fx.cmd()
        .args(["outdated", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaf-x"));

    fx.cmd().args(["update", "--yes"]).assert().success();
    assert_eq!(version_of(&fx.installed("leaf-x")), "1.2.0");
}

#[test]
fn check_reports_without_failing() {
    let fx = Fixture::new();
    auth_catalog(&fx);

    fx.cmd()
        .args(["--output-format", "json", "check", "leaf-auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"satisfied\": false"));
}

#[test]
fn init_then_config_get() {
    let fx = Fixture::new();
    let path = fx.dir.path().join("conf").join("leafkit.toml");

    cargo_bin_cmd!("leafkit")
        .current_dir(fx.dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leafkit.toml"));
    assert!(!path.exists());

    cargo_bin_cmd!("leafkit")
        .current_dir(fx.dir.path())
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .success();
    assert!(path.is_file());

    cargo_bin_cmd!("leafkit")
        .current_dir(fx.dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "layout.prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaf-"));

    cargo_bin_cmd!("leafkit")
        .current_dir(fx.dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leafkit.toml"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let fx = Fixture::new();
    cargo_bin_cmd!("leafkit")
        .current_dir(fx.dir.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    cargo_bin_cmd!("leafkit")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leafkit"));
}
