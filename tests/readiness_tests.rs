// Copyright (c) 2025 - Cowboy AI, Inc.
//! Readiness waits under a paused clock

mod fixtures;

use fixtures::FlakyProbe;
use messaging_harness::service::{wait_for_port, ReadinessPolicy};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_success_on_last_attempt() {
    let probe = FlakyProbe::failing(9);
    let policy = ReadinessPolicy::default();
    let started = Instant::now();

    let ready = wait_for_port(&probe, "broker", 8161, &policy).await;

    let waited = started.elapsed();
    assert!(ready);
    assert_eq!(probe.calls(), 10);
    assert!(waited >= Duration::from_secs(27), "waited {:?}", waited);
    assert!(waited < Duration::from_secs(30), "waited {:?}", waited);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_without_trailing_delay() {
    let probe = FlakyProbe::failing(usize::MAX);
    let policy = ReadinessPolicy::default();
    let started = Instant::now();

    let ready = wait_for_port(&probe, "broker", 61616, &policy).await;

    assert!(!ready);
    assert_eq!(probe.calls(), 10);
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(27), "waited {:?}", waited);
    assert!(waited < Duration::from_secs(30), "waited {:?}", waited);
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy() {
    let probe = FlakyProbe::failing(2);
    let policy = ReadinessPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(500),
    };
    let started = Instant::now();

    assert!(wait_for_port(&probe, "broker", 5672, &policy).await);
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(probe.probed_ports(), vec![5672, 5672, 5672]);
}
