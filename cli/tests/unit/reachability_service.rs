//! Unit tests for reachability strategy selection.

#![allow(clippy::expect_used)]

use wol_cli::application::services::reachability::is_reachable;
use wol_cli::domain::capability::Capabilities;

use crate::mocks::{FixedPrivilege, MockProber};

#[tokio::test]
async fn test_privileged_with_raw_packets_uses_raw_probe() {
    let raw = MockProber::up();
    let ping = MockProber::down();

    let up = is_reachable(&Capabilities::all(), &FixedPrivilege(true), &raw, &ping, "10.0.0.5", 80)
        .await
        .expect("probe");

    assert!(up);
    assert_eq!(raw.calls.get(), 1);
    assert_eq!(ping.calls.get(), 0);
}

#[tokio::test]
async fn test_unprivileged_uses_ping() {
    let raw = MockProber::up();
    let ping = MockProber::down();

    let up = is_reachable(&Capabilities::all(), &FixedPrivilege(false), &raw, &ping, "10.0.0.5", 80)
        .await
        .expect("probe");

    assert!(!up);
    assert_eq!(raw.calls.get(), 0);
    assert_eq!(ping.calls.get(), 1);
}

#[tokio::test]
async fn test_no_raw_packets_uses_ping_even_when_privileged() {
    let raw = MockProber::up();
    let ping = MockProber::up();
    let caps = Capabilities {
        raw_packets: false,
        ..Capabilities::all()
    };

    is_reachable(&caps, &FixedPrivilege(true), &raw, &ping, "10.0.0.5", 80)
        .await
        .expect("probe");

    assert_eq!(raw.calls.get(), 0);
    assert_eq!(ping.calls.get(), 1);
}

#[tokio::test]
async fn test_raw_probe_failure_falls_back_to_ping() {
    let raw = MockProber::broken();
    let ping = MockProber::up();

    let up = is_reachable(&Capabilities::all(), &FixedPrivilege(true), &raw, &ping, "10.0.0.5", 80)
        .await
        .expect("fallback");

    assert!(up);
    assert_eq!(raw.calls.get(), 1);
    assert_eq!(ping.calls.get(), 1);
}

#[tokio::test]
async fn test_raw_probe_negative_answer_does_not_ping() {
    let raw = MockProber::down();
    let ping = MockProber::up();

    let up = is_reachable(&Capabilities::all(), &FixedPrivilege(true), &raw, &ping, "10.0.0.5", 22)
        .await
        .expect("probe");

    assert!(!up);
    assert_eq!(ping.calls.get(), 0);
}
