use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn clean_files_pass() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "FROM alpine\nRUN echo hi\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("would reformat").not());
    Ok(())
}

#[test]
fn dirty_files_exit_with_one() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "from alpine\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--check")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("would reformat"))
        .stdout(predicate::str::contains("Dockerfile"));
    Ok(())
}

#[test]
fn check_leaves_files_alone() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "from alpine\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--check")
        .arg(&path)
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&path)?, "from alpine\n");
    Ok(())
}

#[test]
fn parse_errors_exit_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let path = tmp.path().join("Dockerfile");
    fs::write(&path, "RUN <<EOF\necho hi\n")?;

    Command::cargo_bin("dockfmt")?
        .arg("--check")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unterminated heredoc"));
    Ok(())
}

#[test]
fn check_and_write_conflict() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("dockfmt")?
        .arg("--check")
        .arg("-w")
        .arg("Dockerfile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}
