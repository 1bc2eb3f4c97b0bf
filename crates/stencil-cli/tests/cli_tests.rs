//! Integration tests for the `stencil` binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn workspace() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn templates() -> PathBuf {
    workspace().join("templates")
}

fn demo() -> PathBuf {
    workspace().join("demos/tracker/stencil.toml")
}

/// The binary with a clean environment and an empty config file.
fn stencil(tmp: &TempDir) -> Command {
    let config = tmp.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("stencil");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STENCIL_TEMPLATES_DIR")
        .arg("--config")
        .arg(config);
    cmd
}

// ── Help ──────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    cargo_bin_cmd!("stencil")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn version_flag() {
    cargo_bin_cmd!("stencil")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_usage_error() {
    cargo_bin_cmd!("stencil").assert().failure().code(2);
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_demo_into_out_dir() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");

    stencil(&tmp)
        .arg("generate")
        .arg(demo())
        .arg("--templates")
        .arg(templates())
        .arg("--out")
        .arg(&out)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 28 files"));

    assert!(out.join("config.toml").is_file());
    assert!(out.join("webClient/src/app/components/task/item.vue").is_file());
    assert!(out.join("sql/model/sales/02_deal/function/deal_trigger_before.sql").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");

    stencil(&tmp)
        .arg("generate")
        .arg(demo())
        .arg("--templates")
        .arg(templates())
        .arg("--out")
        .arg(&out)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("28 files would be written"))
        .stdout(predicate::str::contains("sql_function_list.sql"));

    assert!(!out.exists());
}

#[test]
fn out_dir_from_environment() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("from-env");

    stencil(&tmp)
        .env("STENCIL_GENERATE__OUT_DIR", &out)
        .env("STENCIL_TEMPLATES__DIR", templates())
        .arg("generate")
        .arg(demo())
        .arg("--yes")
        .assert()
        .success();

    assert!(out.join("docker-compose.yml").is_file());
}

// ── plan ──────────────────────────────────────────────────────────────────────

#[test]
fn plan_as_json() {
    let tmp = TempDir::new().unwrap();
    let assert = stencil(&tmp)
        .arg("plan")
        .arg(demo())
        .arg("--templates")
        .arg(templates())
        .args(["--format", "json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["project"], "tracker");
    assert_eq!(value["fileCount"], 28);
    assert_eq!(value["documents"][2]["document"], "deal");
}

// ── errors ────────────────────────────────────────────────────────────────────

#[test]
fn missing_project_is_not_found() {
    let tmp = TempDir::new().unwrap();
    stencil(&tmp)
        .arg("generate")
        .arg(tmp.path().join("nope.toml"))
        .arg("--templates")
        .arg(templates())
        .arg("--yes")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("project definition not found"));
}

#[test]
fn incomplete_catalog_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let empty = tmp.path().join("tpl");
    fs::create_dir_all(&empty).unwrap();

    stencil(&tmp)
        .arg("plan")
        .arg(demo())
        .arg("--templates")
        .arg(&empty)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Template catalog not found"))
        .stderr(predicate::str::contains("missing project/config.toml"));
}

#[test]
fn broken_template_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("p.toml");
    fs::write(
        &project,
        r#"
name = "p"

[[documents]]
name = "invoice"
label = "Invoice"

[documents.templates."webClient_comp_print.vue"]
"#,
    )
    .unwrap();
    let tmpl = tmp.path().join("invoice/tmpl");
    fs::create_dir_all(&tmpl).unwrap();
    fs::write(tmpl.join("webClient_comp_print.vue"), "[% if %]").unwrap();

    stencil(&tmp)
        .arg("generate")
        .arg(&project)
        .arg("--templates")
        .arg(templates())
        .arg("--yes")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains(
            "doc: invoice tmpl: webClient_comp_print.vue parse template error",
        ));

    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn unknown_config_key() {
    let tmp = TempDir::new().unwrap();
    stencil(&tmp)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_explicit_config_file() {
    cargo_bin_cmd!("stencil")
        .args(["--config", "/nonexistent/stencil/config.toml", "config", "list"])
        .assert()
        .failure()
        .code(4);
}
