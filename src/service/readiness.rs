// Copyright (c) 2025 - Cowboy AI, Inc.
//! Readiness wait
//!
//! Bounded polling of a TCP port after a service state change. The loop is
//! the only cancellation bound on a readiness wait: at most `max_attempts`
//! probes with `delay` between consecutive probes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Default number of probes
pub const MAX_ATTEMPTS: u32 = 10;

/// Default delay between probes
pub const DELAY: Duration = Duration::from_secs(3);

/// Boundary probe telling whether a TCP port accepts connections
#[async_trait]
pub trait PortProbe: Send + Sync {
    async fn is_tcp_port_available(&self, port: u16, host: &str) -> bool;
}

/// Probe that opens (and immediately drops) a TCP connection
#[derive(Debug, Clone)]
pub struct TcpPortProbe {
    connect_timeout: Duration,
}

impl TcpPortProbe {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpPortProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl PortProbe for TcpPortProbe {
    async fn is_tcp_port_available(&self, port: u16, host: &str) -> bool {
        matches!(
            tokio::time::timeout(self.connect_timeout, TcpStream::connect((host, port))).await,
            Ok(Ok(_))
        )
    }
}

/// Attempt ceiling and spacing of a readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_delay")]
    pub delay: Duration,
}

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

fn default_delay() -> Duration {
    DELAY
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay: DELAY,
        }
    }
}

/// Poll `host:port` until it accepts connections or attempts run out
///
/// Returns `false` after logging a warning when the port never became
/// reachable; it never errors.
pub async fn wait_for_port(
    probe: &dyn PortProbe,
    host: &str,
    port: u16,
    policy: &ReadinessPolicy,
) -> bool {
    for attempt in 1..=policy.max_attempts {
        if probe.is_tcp_port_available(port, host).await {
            debug!("{}:{} reachable after {} attempt(s)", host, port, attempt);
            return true;
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }

    warn!(
        "Unable to connect to {}:{} after {} attempts",
        host, port, policy.max_attempts
    );
    false
}
