// Copyright (c) 2024 Botho Foundation
//
//! CLI integration tests.
//!
//! Every test points `--config` into a temp dir so the user's home
//! directory is never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_OWNER_BOARD: &str = r#"[
    {"id": "A", "amount": 100, "tickets": ["1.18.1"], "range": {"from": 0, "to": 200000000}, "percent": 20.0},
    {"id": "B", "amount": 400, "tickets": ["1.18.2"], "range": {"from": 200000001, "to": 999999999}, "percent": 80.0}
]"#;

fn airdrop(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("airdrop").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

fn write_board(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("leaderboard.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_calculate_forward_end_to_end() {
    let dir = TempDir::new().unwrap();
    let board = write_board(dir.path(), TWO_OWNER_BOARD);

    let output = airdrop(&dir)
        .args(["calculate", "--signature", "123456789123456789", "--algo", "forward"])
        .arg("--leaderboard")
        .arg(&board)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"].as_array().unwrap().len(), 1);
    assert_eq!(json["summary"][0]["id"], "B");
    assert_eq!(json["summary"][0]["qty"], 2);
    assert_eq!(json["summary"][0]["percent"], "100.00000");
    assert_eq!(
        json["generatedNumbers"]["forward"],
        serde_json::json!([123456789, 123456789])
    );
}

#[test]
fn test_calculate_flags_override_config() {
    let dir = TempDir::new().unwrap();
    let board = write_board(dir.path(), TWO_OWNER_BOARD);
    let out_path = dir.path().join("result.json");

    airdrop(&dir)
        .args(["calculate", "--signature", "123454321123454321"])
        .args(["--algo", "forward", "--algo", "reverse", "--deduplicate", "Yes"])
        .arg("--leaderboard")
        .arg(&board)
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["generatedNumbers"]["forward"], serde_json::json!([123454321]));
    assert_eq!(json["generatedNumbers"]["reverse"], serde_json::json!([]));
    assert_eq!(json["totalTickets"], 1);
}

#[test]
fn test_calculate_rejects_overlapping_leaderboard() {
    let dir = TempDir::new().unwrap();
    let board = write_board(
        dir.path(),
        r#"[{"id": "A", "range": {"from": 0, "to": 10}}, {"id": "B", "range": {"from": 5, "to": 20}}]"#,
    );

    airdrop(&dir)
        .args(["calculate", "--signature", "123456789", "--algo", "forward"])
        .arg("--leaderboard")
        .arg(&board)
        .assert()
        .failure()
        .stderr(predicate::str::contains("leaderboard"));
}

#[test]
fn test_calculate_rejects_bad_yes_no() {
    let dir = TempDir::new().unwrap();
    let board = write_board(dir.path(), TWO_OWNER_BOARD);

    airdrop(&dir)
        .args(["calculate", "--signature", "123456789", "--always-winning", "sometimes"])
        .arg("--leaderboard")
        .arg(&board)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--always-winning"));
}

#[test]
fn test_tickets_alien_blood() {
    let dir = TempDir::new().unwrap();

    let output = airdrop(&dir)
        .args(["tickets", "--signature", "123456", "--algo", "alien_blood", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tickets: Vec<u64> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tickets.len(), 999);
}

#[test]
fn test_tickets_unknown_algorithm() {
    let dir = TempDir::new().unwrap();

    airdrop(&dir)
        .args(["tickets", "--signature", "123456789", "--algo", "lucky_seven"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized algorithm"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();

    airdrop(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.toml").exists());

    airdrop(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    airdrop(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn test_algorithms_lists_all() {
    let dir = TempDir::new().unwrap();

    airdrop(&dir)
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("bouncing_ball"))
        .stdout(predicate::str::contains("reverse_pi"));
}

#[test]
fn test_leaderboard_table() {
    let dir = TempDir::new().unwrap();
    let board = write_board(dir.path(), TWO_OWNER_BOARD);

    airdrop(&dir)
        .arg("leaderboard")
        .arg("--leaderboard")
        .arg(&board)
        .assert()
        .success()
        .stdout(predicate::str::contains("999999999"))
        .stdout(predicate::str::contains("2 entries"));
}
