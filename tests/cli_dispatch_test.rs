// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

// 每个测试使用独立的 HOME，避免读写真实的配置文件
fn main_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("EDUFLEX_TOKEN");
    cmd
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_token_help_command() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.arg("--token-help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("localStorage"));
}

#[test]
fn test_missing_mode_shows_help() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_global_requires_user_id() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--list", "--global"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--user-id <ID>"));
}

#[test]
fn test_global_conflicts_with_course() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--list", "--global", "-u", "7", "--course", "5"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_difficulty_out_of_range_rejected() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--create-material", "Lektion", "-c", "5", "--difficulty", "9"]);
    cmd.assert().failure().stderr(predicate::str::contains("9"));
}

// --- 测试核心分发逻辑 ---

#[test]
fn test_network_mode_without_token_fails() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--list", "--course", "5", "--server", "http://127.0.0.1:9"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("未提供 Access Token"));
}

#[test]
fn test_blank_material_title_is_rejected_before_sending() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args([
        "--create-material",
        "   ",
        "--course",
        "5",
        "--token",
        "abc",
        "--server",
        "http://127.0.0.1:9",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("标题不能为空"));
}

#[test]
fn test_invalid_available_from_is_rejected() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args([
        "--create-material",
        "Lektion",
        "--course",
        "5",
        "--available-from",
        "nästa vecka",
        "--token",
        "abc",
        "--server",
        "http://127.0.0.1:9",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nästa vecka"));
}

#[test]
fn test_save_token_writes_config_file() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--save-token", "my-secret-token"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Token 已保存至"));

    let config_path = home.path().join(".eduflex-cli").join("config.json");
    let content = fs::read_to_string(config_path).expect("config file should exist");
    assert!(content.contains("my-secret-token"));
}

#[test]
fn test_open_with_unreachable_server_reports_toast() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args([
        "--open",
        "http://localhost/courses/5?itemId=1",
        "--token",
        "abc",
        "--server",
        "http://127.0.0.1:9",
    ]);
    // 两个集合都加载失败时只提示一次，然后显示空列表
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("部分内容加载失败").count(1));
}

#[test]
fn test_my_submission_requires_user_id() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(&home);
    cmd.args(["--my-submission", "3", "--token", "abc"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--user-id <ID>"));
}
