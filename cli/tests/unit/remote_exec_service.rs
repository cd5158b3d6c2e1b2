//! Unit tests for the remote execution service.

#![allow(clippy::expect_used, clippy::float_cmp)]

use wol_cli::application::services::remote_exec::{
    self, REBOOT_COMMAND, SHUTDOWN_COMMAND,
};
use wol_cli::domain::capability::{Capabilities, Capability};
use wol_cli::domain::cpu::CPU_SAMPLE_COMMAND;
use wol_cli::domain::error::{OpError, SampleError};
use wol_cli::domain::ssh::{RemoteErrorCode, SshCredentials};

use crate::helpers::{CPU_SAMPLE_STDOUT, exec_result};
use crate::mocks::{MockShell, ShellCall};

fn creds() -> SshCredentials {
    SshCredentials::new("10.0.0.5").with_login("admin")
}

fn remote_code(err: &OpError) -> RemoteErrorCode {
    match err {
        OpError::Remote(e) => e.code,
        other => panic!("expected a remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_success_returns_output() {
    let shell = MockShell::returning(exec_result(0, "up 3 days\n", ""));

    let result = remote_exec::execute(&shell, &Capabilities::all(), &creds(), "uptime", false)
        .await
        .expect("execute");

    assert_eq!(result.stdout, "up 3 days\n");
    assert_eq!(
        shell.calls(),
        vec![ShellCall {
            host: "10.0.0.5".to_string(),
            command: "uptime".to_string(),
            sudo: false,
        }]
    );
}

#[tokio::test]
async fn test_execute_nonzero_exit_is_exec_error_with_output() {
    let shell = MockShell::returning(exec_result(1, "", "permission denied"));

    let err = remote_exec::execute(&shell, &Capabilities::all(), &creds(), "cat /root/x", false)
        .await
        .expect_err("exit 1 must fail");

    let OpError::Remote(remote) = &err else {
        panic!("expected remote error, got {err:?}");
    };
    assert_eq!(remote.code, RemoteErrorCode::Exec);
    assert_eq!(remote.reason, "can't exec command");
    let details = remote.details.as_ref().expect("details");
    assert_eq!(details["err"], "permission denied");
    assert_eq!(details["out"], "");
    assert_eq!(err.code(), "exec_error");
}

#[tokio::test]
async fn test_execute_connection_refused_is_not_connected() {
    let shell = MockShell::returning(exec_result(
        255,
        "",
        "ssh: connect to host 10.0.0.5 port 22: Connection refused\r\n",
    ));

    let err = remote_exec::execute(&shell, &Capabilities::all(), &creds(), "uptime", false)
        .await
        .expect_err("refused must fail");

    assert_eq!(remote_code(&err), RemoteErrorCode::NotConnected);
    assert_eq!(err.to_string(), "can't connect to host");
}

#[tokio::test]
async fn test_execute_auth_failure_is_ssh_error() {
    let shell = MockShell::returning(exec_result(
        255,
        "",
        "admin@10.0.0.5: Permission denied (publickey,password).",
    ));

    let err = remote_exec::execute(&shell, &Capabilities::all(), &creds(), "uptime", false)
        .await
        .expect_err("auth failure must fail");

    assert_eq!(remote_code(&err), RemoteErrorCode::Ssh);
}

#[tokio::test]
async fn test_execute_session_failure_is_ssh_error_with_details() {
    let shell = MockShell::failing("command timed out after 60s");

    let err = remote_exec::execute(&shell, &Capabilities::all(), &creds(), "uptime", false)
        .await
        .expect_err("session failure must fail");

    let OpError::Remote(remote) = &err else {
        panic!("expected remote error, got {err:?}");
    };
    assert_eq!(remote.code, RemoteErrorCode::Ssh);
    let details = remote.details.as_ref().expect("details");
    assert!(
        details["error"]
            .as_str()
            .is_some_and(|s| s.contains("timed out"))
    );
}

#[tokio::test]
async fn test_execute_without_ssh_client_is_unsupported_and_never_spawns() {
    let shell = MockShell::returning(exec_result(0, "", ""));

    let err = remote_exec::execute(&shell, &Capabilities::none(), &creds(), "uptime", false)
        .await
        .expect_err("no client");

    assert!(matches!(err, OpError::Unsupported(Capability::RemoteShell)));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_sample_cpu_runs_sample_command_and_computes_percentages() {
    let shell = MockShell::returning(exec_result(0, CPU_SAMPLE_STDOUT, ""));

    let pct = remote_exec::sample_cpu(&shell, &Capabilities::all(), &creds(), None)
        .await
        .expect("sample");

    assert_eq!(pct.user, 25.0);
    assert_eq!(pct.system, 12.5);
    assert_eq!(pct.idle, 62.5);
    assert!((pct.total() - 100.0).abs() < 1e-9);

    let calls = shell.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, CPU_SAMPLE_COMMAND);
    assert!(!calls[0].sudo);
}

#[tokio::test]
async fn test_sample_cpu_applies_precision() {
    let stdout = "cpu 0 0 0 0 0 0 0 0 0 0\ncpu 1 0 1 1 0 0 0 0 0 0\n";
    let shell = MockShell::returning(exec_result(0, stdout, ""));

    let pct = remote_exec::sample_cpu(&shell, &Capabilities::all(), &creds(), Some(2))
        .await
        .expect("sample");

    assert_eq!(pct.user, 33.33);
    assert_eq!(pct.system, 33.33);
    assert_eq!(pct.idle, 33.33);
}

#[tokio::test]
async fn test_sample_cpu_identical_readings_is_degenerate() {
    let stdout = "cpu 5 0 5 5 0 0 0 0 0 0\ncpu 5 0 5 5 0 0 0 0 0 0\n";
    let shell = MockShell::returning(exec_result(0, stdout, ""));

    let err = remote_exec::sample_cpu(&shell, &Capabilities::all(), &creds(), None)
        .await
        .expect_err("zero delta");

    assert!(matches!(err, OpError::Sample(SampleError::Degenerate)));
}

#[tokio::test]
async fn test_sample_cpu_single_line_is_malformed() {
    let shell = MockShell::returning(exec_result(0, "cpu 1 2 3 4 5 6 7 8 9 10", ""));

    let err = remote_exec::sample_cpu(&shell, &Capabilities::all(), &creds(), None)
        .await
        .expect_err("one line");

    assert_eq!(err.code(), "malformed_sample");
}

#[tokio::test]
async fn test_reboot_uses_sudo() {
    let shell = MockShell::returning(exec_result(0, "", ""));

    remote_exec::reboot(&shell, &Capabilities::all(), &creds())
        .await
        .expect("reboot");

    let calls = shell.calls();
    assert_eq!(calls[0].command, REBOOT_COMMAND);
    assert!(calls[0].sudo);
}

#[tokio::test]
async fn test_shutdown_uses_sudo() {
    let shell = MockShell::returning(exec_result(0, "", ""));

    remote_exec::shutdown(&shell, &Capabilities::all(), &creds())
        .await
        .expect("shutdown");

    let calls = shell.calls();
    assert_eq!(calls[0].command, SHUTDOWN_COMMAND);
    assert!(calls[0].sudo);
}

#[tokio::test]
async fn test_shutdown_sudo_rejected_is_exec_error() {
    let shell = MockShell::returning(exec_result(1, "", "sudo: a password is required\n"));

    let err = remote_exec::shutdown(&shell, &Capabilities::all(), &creds())
        .await
        .expect_err("sudo refused");

    assert_eq!(remote_code(&err), RemoteErrorCode::Exec);
}
