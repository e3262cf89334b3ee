// Copyright (c) 2025 - Cowboy AI, Inc.
//! Artemis pseudo-service
//!
//! Manages a broker instance through its `bin/artemis-service` script, run as
//! the instance owner. The script takes verbs (`start`, `stop`, `restart`,
//! `status`), so it always receives the direct label regardless of executor
//! kind; the executor only decides how the invocation is encoded.
//!
//! Start and restart are followed by a readiness wait: the web port always,
//! the messaging port only when asked for.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument, Span};

use super::readiness::{wait_for_port, PortProbe, ReadinessPolicy, TcpPortProbe};
use super::{Service, ServiceStatus, ServiceSystemState, StatusPatterns};
use crate::command::{CommandEncoding, CommandOptions};
use crate::config::ArtemisConfig;
use crate::errors::{HarnessError, HarnessResult};
use crate::executor::{Execution, Executor};

/// Artemis broker instance driven through `artemis-service`
pub struct ServiceArtemis<E: Executor> {
    name: String,
    executor: Arc<E>,
    host: String,
    messaging_port: u16,
    web_port: u16,
    service_path: String,
    service_user: String,
    timeout: Duration,
    patterns: StatusPatterns,
    readiness: ReadinessPolicy,
    probe: Arc<dyn PortProbe>,
    span: Span,
}

impl<E: Executor> ServiceArtemis<E> {
    pub fn new(executor: Arc<E>, config: &ArtemisConfig) -> Self {
        let name = "artemis-service".to_string();
        let span = info_span!("service", name = %name, host = %config.host);
        Self {
            name,
            executor,
            host: config.host.clone(),
            messaging_port: config.messaging_port,
            web_port: config.web_port,
            service_path: config.service_path().display().to_string(),
            service_user: config.service_user.clone(),
            timeout: config.timeout(),
            patterns: config.status_patterns.clone(),
            readiness: config.readiness,
            probe: Arc::new(TcpPortProbe::default()),
            span,
        }
    }

    /// Replace the port probe used by readiness waits
    pub fn with_probe(mut self, probe: Arc<dyn PortProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Parent logging span for this service's operations
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn script_command(&self, verb: &str) -> E::Command {
        E::Command::program(
            vec![
                "runuser".to_string(),
                "-l".to_string(),
                self.service_user.clone(),
                "-c".to_string(),
                format!("{} {}", self.service_path, verb),
            ],
            CommandOptions::stdout_only(self.timeout),
        )
    }

    /// Command performing the given transition
    ///
    /// The pseudo-service has no persistence model, so `Enabled` and
    /// `Disabled` are rejected.
    pub fn create_command(&self, state: ServiceSystemState) -> HarnessResult<E::Command> {
        if state.requires_persistence() {
            return Err(HarnessError::InvalidArgument(format!(
                "{} cannot be {}",
                self.name, state
            )));
        }
        Ok(self.script_command(state.system_label()))
    }

    /// Command querying the broker status
    pub fn status_command(&self) -> E::Command {
        self.script_command("status")
    }

    async fn run(&self, state: ServiceSystemState) -> Execution {
        info!("Service {} -> {}", self.name, state);
        self.executor
            .execute(&self.script_command(state.system_label()))
            .await
    }

    /// Wait for the web port, and the messaging port when `messaging` is set
    ///
    /// Returns whether every awaited port became reachable.
    pub async fn wait_for_messaging(&self, messaging: bool) -> bool {
        async {
            let mut ready =
                wait_for_port(self.probe.as_ref(), &self.host, self.web_port, &self.readiness)
                    .await;

            if messaging {
                ready &= wait_for_port(
                    self.probe.as_ref(),
                    &self.host,
                    self.messaging_port,
                    &self.readiness,
                )
                .await;
            }

            if !ready {
                warn!("Broker on {} is not reachable", self.host);
            }
            ready
        }
        .instrument(self.span.clone())
        .await
    }

    /// Start the broker and wait for it to become reachable
    ///
    /// The start execution is returned even when the readiness wait fails.
    pub async fn start_and_wait(&self, wait_for_messaging: bool) -> Execution {
        let execution = self
            .run(ServiceSystemState::Started)
            .instrument(self.span.clone())
            .await;
        self.wait_for_messaging(wait_for_messaging).await;
        execution
    }

    /// Restart the broker and wait for it to become reachable
    pub async fn restart_and_wait(&self, wait_for_messaging: bool) -> Execution {
        let execution = self
            .run(ServiceSystemState::Restarted)
            .instrument(self.span.clone())
            .await;
        self.wait_for_messaging(wait_for_messaging).await;
        execution
    }
}

#[async_trait]
impl<E: Executor> Service for ServiceArtemis<E> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn status(&self) -> ServiceStatus {
        let command = self.status_command();
        async {
            let execution = self.executor.execute(&command).await;
            let status = self.patterns.classify(execution.read_stdout());
            debug!("Service: {} - Status: {}", self.name, status);
            status
        }
        .instrument(self.span.clone())
        .await
    }

    async fn start(&self) -> Execution {
        self.start_and_wait(false).await
    }

    async fn stop(&self) -> Execution {
        self.run(ServiceSystemState::Stopped)
            .instrument(self.span.clone())
            .await
    }

    async fn restart(&self) -> Execution {
        self.restart_and_wait(false).await
    }
}
