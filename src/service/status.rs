// Copyright (c) 2025 - Cowboy AI, Inc.
//! Status output classification
//!
//! Traditional init scripts print `... is running` / `... is stopped`,
//! systemd prints `active (running)` / `inactive (dead)`, and the Artemis
//! service script prints `Running` / `Stopped`. Hosts may redirect `service`
//! to `systemctl`, so every vocabulary is checked on every host.

use serde::{Deserialize, Serialize};

use super::ServiceStatus;

/// Pattern table used to classify status output
///
/// Matching is a case-insensitive substring search. Running patterns are
/// checked before stopped patterns; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatterns {
    #[serde(default = "default_running")]
    pub running: Vec<String>,

    #[serde(default = "default_stopped")]
    pub stopped: Vec<String>,
}

fn default_running() -> Vec<String> {
    vec!["is running".into(), "(running)".into(), "Running".into()]
}

fn default_stopped() -> Vec<String> {
    vec!["is stopped".into(), "(dead)".into(), "Stopped".into()]
}

impl Default for StatusPatterns {
    fn default() -> Self {
        Self {
            running: default_running(),
            stopped: default_stopped(),
        }
    }
}

impl StatusPatterns {
    /// Add a pattern meaning "running"
    pub fn with_running(mut self, pattern: impl Into<String>) -> Self {
        self.running.push(pattern.into());
        self
    }

    /// Add a pattern meaning "stopped"
    pub fn with_stopped(mut self, pattern: impl Into<String>) -> Self {
        self.stopped.push(pattern.into());
        self
    }

    /// Classify captured status output
    ///
    /// Empty output is `Failed` regardless of how the command exited.
    pub fn classify(&self, output: &str) -> ServiceStatus {
        if output.is_empty() {
            return ServiceStatus::Failed;
        }

        let haystack = output.to_lowercase();
        let matches = |patterns: &[String]| {
            patterns
                .iter()
                .any(|p| haystack.contains(&p.to_lowercase()))
        };

        if matches(&self.running) {
            ServiceStatus::Running
        } else if matches(&self.stopped) {
            ServiceStatus::Stopped
        } else {
            ServiceStatus::Unknown
        }
    }
}
