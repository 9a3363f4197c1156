use predicates::prelude::*;
use std::fs;
use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn config_file_sets_the_indent() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let cfg = tmp.path().join("dockfmt.toml");
    fs::write(&cfg, "indent_size = 2\n")?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "RUN a && \\\n    b\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--config")
        .arg(&cfg)
        .arg(&path)
        .assert()
        .success()
        .stdout("RUN a && \\\n  b\n");
    Ok(())
}

#[test]
fn flags_override_the_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let cfg = tmp.path().join("dockfmt.toml");
    fs::write(&cfg, "indent_size = 8\n")?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "RUN a && \\\n    b\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--config")
        .arg(&cfg)
        .arg("--indent")
        .arg("2")
        .arg(&path)
        .assert()
        .success()
        .stdout("RUN a && \\\n  b\n");
    Ok(())
}

#[test]
fn config_file_can_drop_the_trailing_newline() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let cfg = tmp.path().join("dockfmt.toml");
    fs::write(&cfg, "trailing_newline = false\n")?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "from alpine\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--config")
        .arg(&cfg)
        .arg(&path)
        .assert()
        .success()
        .stdout("FROM alpine");
    Ok(())
}

#[test]
fn unknown_config_keys_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let cfg = tmp.path().join("dockfmt.toml");
    fs::write(&cfg, "indentation = 2\n")?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "FROM alpine\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--config")
        .arg(&cfg)
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dockfmt.toml"));
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let cfg = tmp.path().join("absent.toml");

    Command::cargo_bin("dockfmt")?
        .arg("--config")
        .arg(&cfg)
        .write_stdin("FROM alpine\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
    Ok(())
}
