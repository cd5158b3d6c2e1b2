//! Integration tests for the CLI skeleton: help, version, argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn wol() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wol"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    wol().assert().code(2).stderr(predicate::str::contains(
        "Wake-on-LAN and remote host management",
    ));
}

#[test]
fn test_cli_help_lists_every_command() {
    let assert = wol().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for cmd in ["check", "wake", "reboot", "shutdown", "stats", "scan", "config", "version"] {
        assert!(out.contains(cmd), "help is missing `{cmd}`:\n{out}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    wol()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_shows_version() {
    wol()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "wol {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = wol().args(["version", "--json"]).assert().success();
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

// --- Argument validation ---

#[test]
fn test_check_rejects_invalid_host() {
    wol()
        .args(["check", "not a host!"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_check_rejects_port_zero() {
    wol().args(["check", "10.0.0.5", "-p", "0"]).assert().code(2);
}

#[test]
fn test_wake_rejects_invalid_mac() {
    wol()
        .args(["wake", "aa:bb:cc:dd:ee"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_wake_rejects_mixed_separators() {
    wol().args(["wake", "aa:bb-cc:dd:ee:ff"]).assert().code(2);
}

#[test]
fn test_stats_rejects_precision_above_fifteen() {
    wol()
        .args(["stats", "10.0.0.5", "--precision", "16"])
        .assert()
        .code(2);
}

#[test]
fn test_scan_rejects_malformed_network() {
    wol().args(["scan", "--net", "10.0.0.0/33"]).assert().code(2);
}

#[test]
fn test_reboot_requires_host() {
    wol()
        .arg("reboot")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<HOST>"));
}

#[test]
fn test_stats_rejects_bare_hostname() {
    wol()
        .args(["stats", "nas"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_reboot_help_describes_accepted_hosts() {
    wol()
        .args(["reboot", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IP address or domain name"))
        .stdout(predicate::str::contains("alias").not());
}
