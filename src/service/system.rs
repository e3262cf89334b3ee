// Copyright (c) 2025 - Cowboy AI, Inc.
//! systemd / init managed service

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument, Span};

use super::{PersistentService, Service, ServiceStatus, ServiceSystemState, StatusPatterns};
use crate::command::{CommandEncoding, CommandOptions, DEFAULT_TIMEOUT};
use crate::executor::{Execution, Executor};

/// A service managed by the host's `service` / `systemctl` tooling
pub struct ServiceSystem<E: Executor> {
    name: String,
    executor: Arc<E>,
    timeout: Duration,
    patterns: StatusPatterns,
    span: Span,
}

impl<E: Executor> ServiceSystem<E> {
    pub fn new(name: impl Into<String>, executor: Arc<E>) -> Self {
        let name = name.into();
        let span = info_span!("service", name = %name, executor = executor.name());
        Self {
            name,
            executor,
            timeout: DEFAULT_TIMEOUT,
            patterns: StatusPatterns::default(),
            span,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_patterns(mut self, patterns: StatusPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Parent logging span for this service's operations
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn options(&self) -> CommandOptions {
        CommandOptions::stdout_only(self.timeout)
    }

    /// Command performing the given transition, encoded for the bound executor
    pub fn create_command(&self, state: ServiceSystemState) -> E::Command {
        E::Command::service_state(&self.name, state, self.options())
    }

    /// Command querying the service status
    pub fn status_command(&self) -> E::Command {
        E::Command::program(
            vec!["service".to_string(), self.name.clone(), "status".to_string()],
            self.options(),
        )
    }

    async fn transition(&self, state: ServiceSystemState) -> Execution {
        let command = self.create_command(state);
        async {
            info!("Service {} -> {}", self.name, state);
            self.executor.execute(&command).await
        }
        .instrument(self.span.clone())
        .await
    }
}

#[async_trait]
impl<E: Executor> Service for ServiceSystem<E> {
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
        self.transition(ServiceSystemState::Started).await
    }

    async fn stop(&self) -> Execution {
        self.transition(ServiceSystemState::Stopped).await
    }

    async fn restart(&self) -> Execution {
        self.transition(ServiceSystemState::Restarted).await
    }
}

#[async_trait]
impl<E: Executor> PersistentService for ServiceSystem<E> {
    async fn enable(&self) -> Execution {
        self.transition(ServiceSystemState::Enabled).await
    }

    async fn disable(&self) -> Execution {
        self.transition(ServiceSystemState::Disabled).await
    }
}
