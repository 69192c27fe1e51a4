//! Integration tests for the offlinedatasci binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// The binary with `HOME` pointed at `home` and no inherited ods directory.
fn ods(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("offlinedatasci"));
    cmd.env("HOME", home)
        .env_remove("OFFLINEDATASCI_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ods(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("activate"))
        .stdout(predicate::str::contains("deactivate"))
        .stdout(predicate::str::contains("install"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ods(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ods(home.path()).assert().failure();
    Ok(())
}

#[test]
fn activate_writes_both_config_files() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mirror = home.path().join("mirror");

    ods(home.path())
        .arg("activate")
        .arg(&mirror)
        .assert()
        .success()
        .stdout(predicate::str::contains("CRAN mirror added"))
        .stdout(predicate::str::contains("PyPI mirror added"));

    let rprofile = fs::read_to_string(home.path().join(".Rprofile"))?;
    assert!(rprofile.ends_with("options(repos=r)}) #Added by offlinedatasci\n"));
    assert!(rprofile.contains(&format!("file://{}/miniCRAN", mirror.display())));

    let pip_conf = fs::read_to_string(home.path().join(".config/pip/pip.conf"))?;
    assert_eq!(
        pip_conf,
        format!(
            "#Added by offlinedatasci\n[global]\nindex-url = file://{}/pypi\n",
            mirror.display()
        )
    );
    Ok(())
}

#[test]
fn activate_twice_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mirror = home.path().join("mirror");

    ods(home.path()).arg("activate").arg(&mirror).assert().success();
    let first = fs::read_to_string(home.path().join(".config/pip/pip.conf"))?;

    ods(home.path())
        .arg("activate")
        .arg(&mirror)
        .assert()
        .success()
        .stdout(predicate::str::contains("already active"));
    let second = fs::read_to_string(home.path().join(".config/pip/pip.conf"))?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn activate_uses_env_directory() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mirror = home.path().join("from-env");

    ods(home.path())
        .env("OFFLINEDATASCI_DIR", &mirror)
        .arg("activate")
        .assert()
        .success();

    let rprofile = fs::read_to_string(home.path().join(".Rprofile"))?;
    assert!(rprofile.contains("from-env/miniCRAN"));
    Ok(())
}

#[test]
fn activate_defaults_to_offlinedatasci_under_home() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ods(home.path()).arg("activate").assert().success();

    let rprofile = fs::read_to_string(home.path().join(".Rprofile"))?;
    let expected = format!("file://{}/offlinedatasci/miniCRAN", home.path().display());
    assert!(rprofile.contains(&expected));
    let pip_conf = fs::read_to_string(home.path().join(".config/pip/pip.conf"))?;
    assert!(pip_conf.contains(&format!("file://{}/offlinedatasci/pypi", home.path().display())));
    Ok(())
}

#[test]
fn deactivate_restores_user_content() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let original = "options(width = 120)\n";
    fs::write(home.path().join(".Rprofile"), original)?;
    fs::create_dir_all(home.path().join(".config/pip"))?;
    fs::write(home.path().join(".config/pip/pip.conf"), "[install]\nuser = true\n")?;

    ods(home.path())
        .arg("activate")
        .arg(home.path().join("mirror"))
        .assert()
        .success();
    ods(home.path())
        .arg("deactivate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lines removed"));

    assert_eq!(fs::read_to_string(home.path().join(".Rprofile"))?, original);
    assert_eq!(
        fs::read_to_string(home.path().join(".config/pip/pip.conf"))?,
        "[install]\nuser = true\n"
    );
    Ok(())
}

#[test]
fn deactivate_without_rprofile_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ods(home.path())
        .arg("deactivate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(".Rprofile"));
    Ok(())
}

#[test]
fn status_json_reports_activation() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ods(home.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""active": false"#));

    ods(home.path()).arg("activate").assert().success();

    let output = ods(home.path()).args(["status", "--json"]).output()?;
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value[0]["name"], "cran");
    assert_eq!(value[0]["active"], true);
    assert_eq!(value[1]["active"], true);
    Ok(())
}

#[test]
fn invalid_settings_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let settings = home.path().join("bad.yml");
    fs::write(&settings, "python_platforms: {")?;

    ods(home.path())
        .args(["--settings"])
        .arg(&settings)
        .arg("activate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.yml"));
    Ok(())
}

#[test]
fn install_rejects_unknown_software() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ods(home.path())
        .args(["install", "julia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown software 'julia'"));
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ods(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offlinedatasci"));
    Ok(())
}
