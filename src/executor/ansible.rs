// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ansible orchestration executor
//!
//! Submits each [`ModuleCommand`] as an ad-hoc Ansible task:
//!
//! ```text
//! ansible <host> [-i inventory] [-u user] -m <module> -a "<params>"
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::process::run_process;
use super::{Execution, Executor};
use crate::command::ModuleCommand;

/// Settings for [`AnsibleExecutor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsibleConfig {
    /// Host pattern the task targets
    #[serde(default = "default_ansible_host")]
    pub host: String,

    /// Inventory file
    #[serde(default)]
    pub inventory: Option<PathBuf>,

    /// Remote user
    #[serde(default)]
    pub user: Option<String>,

    /// Path or name of the ansible binary
    #[serde(default = "default_ansible_binary")]
    pub binary: String,
}

fn default_ansible_host() -> String {
    "localhost".to_string()
}

fn default_ansible_binary() -> String {
    "ansible".to_string()
}

impl Default for AnsibleConfig {
    fn default() -> Self {
        Self {
            host: default_ansible_host(),
            inventory: None,
            user: None,
            binary: default_ansible_binary(),
        }
    }
}

/// Runs module commands through Ansible
#[derive(Debug, Clone)]
pub struct AnsibleExecutor {
    config: AnsibleConfig,
    name: String,
}

impl AnsibleExecutor {
    pub fn new(config: AnsibleConfig) -> Self {
        let name = format!("ansible:{}", config.host);
        Self { config, name }
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Argument vector of the ad-hoc task running `command`
    pub fn task_argv(&self, command: &ModuleCommand) -> Vec<String> {
        let mut argv = vec![self.config.binary.clone(), self.config.host.clone()];
        if let Some(inventory) = &self.config.inventory {
            argv.push("-i".to_string());
            argv.push(inventory.display().to_string());
        }
        if let Some(user) = &self.config.user {
            argv.push("-u".to_string());
            argv.push(user.clone());
        }
        argv.push("-m".to_string());
        argv.push(command.module.clone());
        if !command.params.is_empty() {
            argv.push("-a".to_string());
            argv.push(command.params.clone());
        }
        argv
    }
}

#[async_trait]
impl Executor for AnsibleExecutor {
    type Command = ModuleCommand;

    async fn execute(&self, command: &Self::Command) -> Execution {
        run_process(&self.task_argv(command), &command.options).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandOptions;
    use crate::executor::ExecutorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_argv() {
        let executor = AnsibleExecutor::new(AnsibleConfig {
            host: "brokers".to_string(),
            inventory: Some(PathBuf::from("/etc/ansible/hosts")),
            user: Some("root".to_string()),
            ..AnsibleConfig::default()
        });
        let cmd = ModuleCommand::new("service", "name=qpidd state=started", CommandOptions::default());

        assert_eq!(
            executor.task_argv(&cmd),
            vec![
                "ansible",
                "brokers",
                "-i",
                "/etc/ansible/hosts",
                "-u",
                "root",
                "-m",
                "service",
                "-a",
                "name=qpidd state=started"
            ]
        );
    }

    #[test]
    fn test_ansible_executor_is_orchestrated() {
        let executor = AnsibleExecutor::new(AnsibleConfig::default());
        assert_eq!(executor.kind(), ExecutorKind::Orchestrated);
        assert_eq!(executor.host(), "localhost");
    }
}
