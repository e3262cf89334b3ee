// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Executors
//!
//! Executors run a [`Command`](crate::command) against a target host and
//! report what happened as an [`Execution`]. Failures are data, not errors:
//! a command that cannot be spawned, times out, or exits non-zero produces an
//! execution with `success == false`, so polling loops treat every outcome
//! uniformly.
//!
//! # Variants
//!
//! ```text
//! Direct        LocalExecutor, SshExecutor   accept ArgvCommand
//! Orchestrated  AnsibleExecutor              accepts ModuleCommand
//! ```
//!
//! The accepted encoding is the associated `Command` type, which makes the
//! executor/command pairing a compile-time property.

pub mod ansible;
pub mod local;
mod process;
pub mod ssh;

pub use ansible::AnsibleExecutor;
pub use local::LocalExecutor;
pub use ssh::SshExecutor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::command::CommandEncoding;

/// Execution backend variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorKind {
    /// Spawns processes against the target host's shell
    Direct,
    /// Delegates to an automation backend as an orchestration task
    Orchestrated,
}

impl fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorKind::Direct => write!(f, "direct"),
            ExecutorKind::Orchestrated => write!(f, "orchestrated"),
        }
    }
}

/// Runs commands of one encoding against a target host
#[async_trait]
pub trait Executor: Send + Sync {
    /// Command encoding accepted by this executor
    type Command: CommandEncoding;

    /// Execute a command, blocking until it finishes or times out
    ///
    /// Never fails: transport and command failures are reported through
    /// [`Execution::completed_successfully`].
    async fn execute(&self, command: &Self::Command) -> Execution;

    /// Human readable executor name
    fn name(&self) -> &str;

    /// Backend variant, derived from the accepted encoding
    fn kind(&self) -> ExecutorKind {
        <Self::Command as CommandEncoding>::KIND
    }
}

/// Immutable result of one command submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    id: Uuid,
    started_at: DateTime<Utc>,
    elapsed: Duration,
    success: bool,
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
    timed_out: bool,
}

impl Execution {
    /// Create an execution result from raw outcome values
    pub fn new(
        success: bool,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            success,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            timed_out: false,
        }
    }

    /// Process ran to completion; success follows the exit status
    pub(crate) fn finished(
        started_at: DateTime<Utc>,
        elapsed: Duration,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            started_at,
            elapsed,
            ..Self::new(exit_code == Some(0), stdout, stderr, exit_code)
        }
    }

    /// Daemon process was spawned and left running
    pub(crate) fn spawned(started_at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            started_at,
            elapsed,
            ..Self::new(true, "", "", None)
        }
    }

    /// Process could not be run at all
    pub(crate) fn failed(started_at: DateTime<Utc>, elapsed: Duration, reason: String) -> Self {
        Self {
            started_at,
            elapsed,
            ..Self::new(false, "", reason, None)
        }
    }

    /// Process exceeded its timeout and was killed
    pub(crate) fn timed_out(started_at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            started_at,
            elapsed,
            timed_out: true,
            ..Self::new(false, "", format!("timed out after {:?}", elapsed), None)
        }
    }

    /// Identifier used to correlate log lines for this execution
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the command ran and signaled successful completion
    pub fn completed_successfully(&self) -> bool {
        self.success
    }

    /// Captured standard output (empty when not captured)
    pub fn read_stdout(&self) -> &str {
        &self.stdout
    }

    /// Captured standard error (empty when not captured)
    pub fn read_stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }
}
