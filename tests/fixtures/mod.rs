// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for messaging-harness
//!
//! Fake executors and a fake management API. Nothing here touches a real
//! host or broker: executors record the commands they receive and answer
//! with canned output, the management fake serves in-memory listings and
//! counts every client and call.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use messaging_harness::command::{ArgvCommand, CommandEncoding, ModuleCommand};
use messaging_harness::errors::HarnessResult;
use messaging_harness::executor::{Execution, Executor};
use messaging_harness::management::{
    AddressInfo, BrokerConnection, ManagementClient, ManagementClientFactory, ManagementResponse,
    QueueInfo, RoutingTypesField,
};
use messaging_harness::service::PortProbe;

/// Executor that records commands and answers with queued stdout
///
/// When the queue is empty the default stdout is returned. Every execution
/// carries the same outcome: success with exit code 0, or the failure set by
/// [`RecordingExecutor::replying_failed`].
pub struct RecordingExecutor<C> {
    commands: Mutex<Vec<C>>,
    replies: Mutex<VecDeque<String>>,
    default_stdout: String,
    exit_code: Option<i32>,
}

/// Fake for direct executors
pub type DirectFake = RecordingExecutor<ArgvCommand>;

/// Fake for orchestration executors
pub type OrchestratedFake = RecordingExecutor<ModuleCommand>;

impl<C: CommandEncoding> RecordingExecutor<C> {
    pub fn new() -> Self {
        Self::replying("")
    }

    pub fn replying(stdout: &str) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            default_stdout: stdout.to_string(),
            exit_code: Some(0),
        }
    }

    /// Executions fail with `exit_code` while still returning `stdout`
    pub fn replying_failed(stdout: &str, exit_code: Option<i32>) -> Self {
        Self {
            exit_code,
            ..Self::replying(stdout)
        }
    }

    pub fn push_reply(&self, stdout: &str) {
        self.replies.lock().unwrap().push_back(stdout.to_string());
    }

    pub fn commands(&self) -> Vec<C> {
        self.commands.lock().unwrap().clone()
    }

    pub fn last_command(&self) -> C {
        self.commands
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no command recorded")
    }
}

#[async_trait]
impl<C: CommandEncoding + 'static> Executor for RecordingExecutor<C> {
    type Command = C;

    async fn execute(&self, command: &C) -> Execution {
        self.commands.lock().unwrap().push(command.clone());
        let stdout = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_stdout.clone());
        let success = self.exit_code == Some(0);
        let stderr = if success { "" } else { "command failed" };
        Execution::new(success, stdout, stderr, self.exit_code)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Port probe that fails a fixed number of times before succeeding
pub struct FlakyProbe {
    failures: usize,
    calls: AtomicUsize,
    ports: Mutex<Vec<u16>>,
}

impl FlakyProbe {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            ports: Mutex::new(Vec::new()),
        }
    }

    pub fn always_up() -> Self {
        Self::failing(0)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn probed_ports(&self) -> Vec<u16> {
        self.ports.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortProbe for FlakyProbe {
    async fn is_tcp_port_available(&self, port: u16, _host: &str) -> bool {
        self.ports.lock().unwrap().push(port);
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        call > self.failures
    }
}

/// Shared state behind every client produced by [`FakeFactory`]
#[derive(Default)]
pub struct FakeBroker {
    pub addresses: Mutex<Vec<AddressInfo>>,
    pub queues: Mutex<Vec<QueueInfo>>,
    pub fail_listing: Mutex<bool>,
    pub connects: AtomicUsize,
    pub calls: AtomicUsize,
    pub mutations: Mutex<Vec<String>>,
}

impl FakeBroker {
    pub fn with_topology(addresses: Vec<AddressInfo>, queues: Vec<QueueInfo>) -> Arc<Self> {
        let broker = Self::default();
        *broker.addresses.lock().unwrap() = addresses;
        *broker.queues.lock().unwrap() = queues;
        Arc::new(broker)
    }

    pub fn set_queues(&self, queues: Vec<QueueInfo>) {
        *self.queues.lock().unwrap() = queues;
    }

    pub fn set_failing(&self, failing: bool) {
        *self.fail_listing.lock().unwrap() = failing;
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn record(&self, mutation: String) -> ManagementResponse<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.mutations.lock().unwrap().push(mutation);
        ManagementResponse::ok(Value::Null)
    }
}

pub struct FakeClient {
    broker: Arc<FakeBroker>,
}

#[async_trait]
impl ManagementClient for FakeClient {
    async fn list_queues(&self) -> ManagementResponse<Vec<QueueInfo>> {
        self.broker.calls.fetch_add(1, Ordering::SeqCst);
        if *self.broker.fail_listing.lock().unwrap() {
            return ManagementResponse::failed("HTTP 503");
        }
        ManagementResponse::ok(self.broker.queues.lock().unwrap().clone())
    }

    async fn list_addresses(&self) -> ManagementResponse<Vec<AddressInfo>> {
        self.broker.calls.fetch_add(1, Ordering::SeqCst);
        if *self.broker.fail_listing.lock().unwrap() {
            return ManagementResponse::failed("HTTP 503");
        }
        ManagementResponse::ok(self.broker.addresses.lock().unwrap().clone())
    }

    async fn create_address(&self, name: &str, routing_types: &str) -> ManagementResponse<Value> {
        self.broker
            .record(format!("create_address {} {}", name, routing_types))
    }

    async fn delete_address(&self, name: &str, force: bool) -> ManagementResponse<Value> {
        self.broker.record(format!("delete_address {} {}", name, force))
    }

    async fn create_queue(
        &self,
        address: &str,
        queue: &str,
        durable: bool,
        routing_type: &str,
    ) -> ManagementResponse<Value> {
        self.broker.record(format!(
            "create_queue {} {} {} {}",
            address, queue, durable, routing_type
        ))
    }

    async fn delete_queue(&self, name: &str, remove_consumers: bool) -> ManagementResponse<Value> {
        self.broker
            .record(format!("delete_queue {} {}", name, remove_consumers))
    }
}

/// Factory handing out [`FakeClient`]s over one [`FakeBroker`]
pub struct FakeFactory {
    pub broker: Arc<FakeBroker>,
}

impl ManagementClientFactory for FakeFactory {
    fn connect(&self, _connection: &BrokerConnection) -> HarnessResult<Box<dyn ManagementClient>> {
        self.broker.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeClient {
            broker: Arc::clone(&self.broker),
        }))
    }
}

pub fn address_info(name: &str, routing_types: &str) -> AddressInfo {
    AddressInfo {
        name: name.to_string(),
        routing_types: RoutingTypesField::One(routing_types.to_string()),
    }
}

pub fn queue_info(name: &str, routing_type: &str, address: &str, message_count: u64) -> QueueInfo {
    QueueInfo {
        name: name.to_string(),
        routing_type: routing_type.to_string(),
        address: address.to_string(),
        message_count,
    }
}
