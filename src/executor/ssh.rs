// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote shell executor over the `ssh` binary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::process::run_process;
use super::{Execution, Executor};
use crate::command::{shell_quote, ArgvCommand};

/// Connection settings for [`SshExecutor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Target host name or address
    pub host: String,

    /// Remote user (ssh default when absent)
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default = "default_ssh_port")]
    pub port: u16,

    /// Extra `-o` options passed to ssh
    #[serde(default = "default_ssh_options")]
    pub options: Vec<String>,
}

fn default_ssh_port() -> u16 {
    22
}

fn default_ssh_options() -> Vec<String> {
    vec![
        "BatchMode=yes".to_string(),
        "StrictHostKeyChecking=no".to_string(),
    ]
}

impl SshConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: default_ssh_port(),
            options: default_ssh_options(),
        }
    }
}

/// Runs argument-vector commands on a remote host through ssh
#[derive(Debug, Clone)]
pub struct SshExecutor {
    config: SshConfig,
    name: String,
}

impl SshExecutor {
    pub fn new(config: SshConfig) -> Self {
        let name = format!("ssh:{}", config.host);
        Self { config, name }
    }

    /// Full local argument vector that runs `command` remotely
    ///
    /// Command words are shell-quoted so each reaches the remote program intact.
    pub fn remote_argv(&self, command: &ArgvCommand) -> Vec<String> {
        let mut argv = vec!["ssh".to_string()];
        for option in &self.config.options {
            argv.push("-o".to_string());
            argv.push(option.clone());
        }
        argv.push("-p".to_string());
        argv.push(self.config.port.to_string());
        argv.push(match &self.config.user {
            Some(user) => format!("{}@{}", user, self.config.host),
            None => self.config.host.clone(),
        });
        argv.push("--".to_string());
        // ssh hands the joined words to the remote shell, which splits them again
        argv.extend(command.argv.iter().map(|arg| shell_quote(arg)));
        argv
    }
}

#[async_trait]
impl Executor for SshExecutor {
    type Command = ArgvCommand;

    async fn execute(&self, command: &Self::Command) -> Execution {
        run_process(&self.remote_argv(command), &command.options).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
