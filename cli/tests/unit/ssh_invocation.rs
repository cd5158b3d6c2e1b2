//! Unit tests for the OpenSSH invocation builder and `OpenSshShell`.

#![allow(clippy::expect_used)]

use wol_cli::application::ports::RemoteShell;
use wol_cli::domain::capability::Capabilities;
use wol_cli::domain::config::SshConfig;
use wol_cli::domain::ssh::SshCredentials;
use wol_cli::infra::ssh::{OpenSshShell, build_invocation, remote_command};

use crate::helpers::{err_output, ok_output};
use crate::mocks::MockRunner;

#[test]
fn test_remote_command_sudo_variants() {
    assert_eq!(remote_command("reboot", false, true), "reboot");
    assert_eq!(remote_command("reboot", true, true), "sudo -S -p '' reboot");
    assert_eq!(remote_command("reboot", true, false), "sudo -n reboot");
}

#[test]
fn test_build_invocation_key_auth_uses_batch_mode() {
    let creds = SshCredentials::new("nas.local").with_login("root").with_port(2222);

    let inv = build_invocation(&creds, "uptime", false, 10, true);

    assert_eq!(inv.program, "ssh");
    assert_eq!(
        inv.args,
        vec![
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=10",
            "-o",
            "StrictHostKeyChecking=accept-new",
            "-p",
            "2222",
            "-l",
            "root",
            "nas.local",
            "uptime",
        ]
    );
    assert!(inv.env.is_empty());
    assert!(inv.stdin.is_none());
}

#[test]
fn test_build_invocation_password_goes_through_sshpass_env() {
    let creds = SshCredentials::new("10.0.0.5").with_password("hunter2");

    let inv = build_invocation(&creds, "uptime", false, 5, true);

    assert_eq!(inv.program, "sshpass");
    assert_eq!(&inv.args[..2], ["-e", "ssh"]);
    assert_eq!(inv.env, vec![("SSHPASS", "hunter2".to_string())]);
    assert!(inv.args.iter().all(|a| !a.contains("hunter2")));
    assert!(!inv.args.iter().any(|a| a == "-l"));
}

#[test]
fn test_build_invocation_sudo_password_goes_through_stdin() {
    let creds = SshCredentials::new("10.0.0.5").with_password("hunter2");

    let inv = build_invocation(&creds, "shutdown now", true, 5, false);

    assert_eq!(inv.program, "ssh");
    assert!(inv.env.is_empty());
    assert_eq!(inv.stdin.as_deref(), Some("hunter2\n"));
    assert_eq!(
        inv.args.last().map(String::as_str),
        Some("sudo -S -p '' shutdown now")
    );
    assert!(inv.args.iter().all(|a| !a.contains("hunter2")));
}

#[tokio::test]
async fn test_open_ssh_shell_returns_remote_exit_code() {
    let runner = MockRunner::returning(err_output(3, b"boom"));
    let shell = OpenSshShell::new(runner, &SshConfig::default(), &Capabilities::all());
    let creds = SshCredentials::new("10.0.0.5");

    let result = shell.run(&creds, "false", false).await.expect("run");

    assert_eq!(result.exit_code, 3);
    assert_eq!(result.stderr, "boom");
}

async fn run_with_password(exit_code: i32) -> i32 {
    let runner = MockRunner::returning(err_output(exit_code, b""));
    let shell = OpenSshShell::new(runner, &SshConfig::default(), &Capabilities::all());
    let creds = SshCredentials::new("10.0.0.5").with_password("wrong");

    shell
        .run(&creds, "uptime", false)
        .await
        .expect("run")
        .exit_code
}

#[tokio::test]
async fn test_open_ssh_shell_maps_sshpass_rejection_to_transport_failure() {
    assert_eq!(run_with_password(5).await, 255);
}

#[tokio::test]
async fn test_open_ssh_shell_maps_every_sshpass_failure_to_transport_failure() {
    for code in [2, 3, 4, 6] {
        assert_eq!(run_with_password(code).await, 255, "sshpass exit {code}");
    }
}

#[tokio::test]
async fn test_open_ssh_shell_keeps_exit_one_as_remote_status() {
    assert_eq!(run_with_password(1).await, 1);
}

#[tokio::test]
async fn test_open_ssh_shell_leaves_plain_ssh_exit_codes_alone() {
    let runner = MockRunner::returning(err_output(6, b""));
    let shell = OpenSshShell::new(runner, &SshConfig::default(), &Capabilities::all());
    let creds = SshCredentials::new("10.0.0.5");

    let result = shell.run(&creds, "uptime", false).await.expect("run");

    assert_eq!(result.exit_code, 6);
}

#[tokio::test]
async fn test_open_ssh_shell_keeps_secrets_out_of_args() {
    let runner = MockRunner::returning(ok_output(b"ok\n"));
    let log = runner.call_log();
    let shell = OpenSshShell::new(runner, &SshConfig::default(), &Capabilities::all());
    let creds = SshCredentials::new("10.0.0.5")
        .with_login("admin")
        .with_password("s3cret");

    let result = shell.run(&creds, "reboot", true).await.expect("run");
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "ok\n");

    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.program, "sshpass");
    assert_eq!(call.env, vec![("SSHPASS".to_string(), "s3cret".to_string())]);
    assert_eq!(call.stdin.as_deref(), Some(&b"s3cret\n"[..]));
    assert!(call.args.iter().all(|a| !a.contains("s3cret")));
    assert!(call.args.contains(&"admin".to_string()));
}
