// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service State Controller
//!
//! Drives managed services (system services and the Artemis pseudo-service)
//! through a Command/Executor pair.
//!
//! # Transitions
//!
//! ```text
//! ServiceSystemState   direct label   orchestration label
//! Started              start          started
//! Stopped              stop           stopped
//! Restarted            restart        restarted
//! Enabled              enable         enabled     (persistent services only)
//! Disabled             disable        disabled    (persistent services only)
//! ```
//!
//! Each transition maps to exactly one command, built with the label that
//! matches the executor kind. Status is never inferred from exit codes: it
//! is classified from captured output, see [`StatusPatterns`].
//!
//! Enable/disable live on [`PersistentService`], which is only implemented
//! by service managers with a persistence model.

pub mod artemis;
pub mod readiness;
pub mod status;
pub mod system;

pub use artemis::ServiceArtemis;
pub use readiness::{wait_for_port, PortProbe, ReadinessPolicy, TcpPortProbe};
pub use status::StatusPatterns;
pub use system::ServiceSystem;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::executor::{Execution, ExecutorKind};

/// Target state of a service transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSystemState {
    Started,
    Stopped,
    Restarted,
    Enabled,
    Disabled,
}

impl ServiceSystemState {
    pub const ALL: [ServiceSystemState; 5] = [
        ServiceSystemState::Started,
        ServiceSystemState::Stopped,
        ServiceSystemState::Restarted,
        ServiceSystemState::Enabled,
        ServiceSystemState::Disabled,
    ];

    /// (direct label, orchestration label)
    fn labels(self) -> (&'static str, &'static str) {
        match self {
            ServiceSystemState::Started => ("start", "started"),
            ServiceSystemState::Stopped => ("stop", "stopped"),
            ServiceSystemState::Restarted => ("restart", "restarted"),
            ServiceSystemState::Enabled => ("enable", "enabled"),
            ServiceSystemState::Disabled => ("disable", "disabled"),
        }
    }

    /// Label used when invoking the service manager directly
    pub fn system_label(self) -> &'static str {
        self.labels().0
    }

    /// Label used by the orchestration backend
    pub fn orchestration_label(self) -> &'static str {
        self.labels().1
    }

    /// Label matching the given executor kind
    pub fn label(self, kind: ExecutorKind) -> &'static str {
        match kind {
            ExecutorKind::Direct => self.system_label(),
            ExecutorKind::Orchestrated => self.orchestration_label(),
        }
    }

    /// Whether the state only exists for persistence-capable managers
    pub fn requires_persistence(self) -> bool {
        matches!(self, ServiceSystemState::Enabled | ServiceSystemState::Disabled)
    }
}

impl fmt::Display for ServiceSystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.orchestration_label())
    }
}

/// Observed status of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Running,
    Stopped,
    /// Status query produced no output
    Failed,
    /// Output matched no known pattern
    Unknown,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Running => write!(f, "RUNNING"),
            ServiceStatus::Stopped => write!(f, "STOPPED"),
            ServiceStatus::Failed => write!(f, "FAILED"),
            ServiceStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A managed service
#[async_trait]
pub trait Service: Send + Sync {
    /// Service name as known to the service manager
    fn name(&self) -> &str;

    /// Query and classify the current status
    async fn status(&self) -> ServiceStatus;

    async fn start(&self) -> Execution;

    async fn stop(&self) -> Execution;

    async fn restart(&self) -> Execution;
}

/// A service whose manager can persist boot-time enablement
#[async_trait]
pub trait PersistentService: Service {
    async fn enable(&self) -> Execution;

    async fn disable(&self) -> Execution;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ServiceSystemState::Started, "start", "started")]
    #[test_case(ServiceSystemState::Stopped, "stop", "stopped")]
    #[test_case(ServiceSystemState::Restarted, "restart", "restarted")]
    #[test_case(ServiceSystemState::Enabled, "enable", "enabled")]
    #[test_case(ServiceSystemState::Disabled, "disable", "disabled")]
    fn test_state_labels(state: ServiceSystemState, system: &str, orchestration: &str) {
        assert_eq!(state.system_label(), system);
        assert_eq!(state.orchestration_label(), orchestration);
        assert_eq!(state.label(ExecutorKind::Direct), system);
        assert_eq!(state.label(ExecutorKind::Orchestrated), orchestration);
    }

    #[test]
    fn test_every_state_has_labels() {
        for state in ServiceSystemState::ALL {
            assert!(!state.system_label().is_empty());
            assert!(state.orchestration_label().starts_with(state.system_label()));
        }
    }

    #[test]
    fn test_persistence_states() {
        let persistent: Vec<_> = ServiceSystemState::ALL
            .into_iter()
            .filter(|s| s.requires_persistence())
            .collect();

        assert_eq!(
            persistent,
            vec![ServiceSystemState::Enabled, ServiceSystemState::Disabled]
        );
    }
}
