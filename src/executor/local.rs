// Copyright (c) 2025 - Cowboy AI, Inc.
//! Local process executor

use async_trait::async_trait;

use super::process::run_process;
use super::{Execution, Executor};
use crate::command::ArgvCommand;

/// Runs argument-vector commands as local child processes
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    name: String,
}

impl LocalExecutor {
    pub fn new() -> Self {
        Self {
            name: "local".to_string(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    type Command = ArgvCommand;

    async fn execute(&self, command: &Self::Command) -> Execution {
        run_process(&command.argv, &command.options).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
