use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use tempfile::TempDir;

fn covm() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("covm-semantics")?;
    cmd.env_remove("COVM_MEMORY_LIMIT")
        .env_remove("COVM_OUTPUT_FORMAT")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    Ok(cmd)
}

#[test]
fn test_eval_add_wraps() -> Result<(), Box<dyn Error>> {
    covm()?
        .arg("eval")
        .arg("add")
        .arg(format!("0x{}", "f".repeat(64)))
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::diff("0x0\n"));

    Ok(())
}

#[test]
fn test_eval_sdiv_overflow() -> Result<(), Box<dyn Error>> {
    let min = format!("0x8{}", "0".repeat(63));
    covm()?
        .args(["eval", "sdiv", &min, "-1"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", min)));

    Ok(())
}

#[test]
fn test_eval_decimal_format() -> Result<(), Box<dyn Error>> {
    covm()?
        .args(["--format", "decimal", "eval", "exp", "2", "10"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1024\n"));

    covm()?
        .env("COVM_OUTPUT_FORMAT", "decimal")
        .args(["eval", "mul", "6", "7"])
        .assert()
        .success()
        .stdout(predicate::str::diff("42\n"));

    Ok(())
}

#[test]
fn test_eval_rejects_bad_input() -> Result<(), Box<dyn Error>> {
    covm()?
        .args(["eval", "add", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expects 2 operand(s), found 1"));

    covm()?
        .args(["eval", "jump", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown operation"));

    covm()?
        .args(["eval", "add", "1", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid word"));

    Ok(())
}

#[test]
fn test_steps_share_memory() -> Result<(), Box<dyn Error>> {
    covm()?
        .args(["steps", "mstore 5 0xff", "msize", "mload 5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MSIZE  => 0x40"))
        .stdout(predicate::str::contains("MLOAD 5 => 0xff"))
        .stdout(predicate::str::contains("Size: 64 bytes"));

    Ok(())
}

#[test]
fn test_steps_json_snapshot() -> Result<(), Box<dyn Error>> {
    let output = covm()?.args(["--json", "steps", "mstore 0 1"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["memory"]["size"], 32);
    assert_eq!(
        json["memory"]["contents"],
        format!("{}01", "00".repeat(31))
    );
    assert_eq!(json["steps"][0]["op"], "mstore");

    Ok(())
}

#[test]
fn test_memory_limit_flag() -> Result<(), Box<dyn Error>> {
    covm()?
        .args(["--memory-limit", "32", "steps", "mstore 32 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Memory limit exceeded"));

    Ok(())
}

#[test]
fn test_check_builtin_vectors() -> Result<(), Box<dyn Error>> {
    covm()?
        .args(["check", "--builtin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 failed"));

    Ok(())
}

#[test]
fn test_check_vector_file() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("vectors.json");
    fs::write(
        &path,
        r#"{
            "vectors": [
                { "name": "passes", "steps": [{ "op": "div", "args": ["7", "0"] }], "expect": "0" },
                { "name": "fails", "steps": [{ "op": "add", "args": ["1", "1"] }], "expect": "3" }
            ]
        }"#,
    )?;

    covm()?
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL fails"))
        .stdout(predicate::str::contains("expected 0x3, got 0x2"))
        .stdout(predicate::str::contains("1 passed, 1 failed"));

    Ok(())
}

#[test]
fn test_check_missing_file() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    covm()?
        .arg("check")
        .arg(temp_dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));

    Ok(())
}

#[test]
fn test_ops_listing() -> Result<(), Box<dyn Error>> {
    covm()?
        .arg("ops")
        .assert()
        .success()
        .stdout(predicate::str::contains("0x05  sdiv"))
        .stdout(predicate::str::contains("0x52  mstore"));

    Ok(())
}
