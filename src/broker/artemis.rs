// Copyright (c) 2025 - Cowboy AI, Inc.
//! Artemis topology reconciler
//!
//! Caches the broker's addresses and queues as an [`Arc<TopologySnapshot>`]
//! and rebuilds it on demand from the management API. Mutations are passed
//! straight through to the broker; the cache only changes on refresh.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument, Span};

use super::route::RoutingType;
use super::topology::{Address, Queue, TopologySnapshot};
use crate::errors::{HarnessError, HarnessResult};
use crate::management::{
    BrokerConnection, ManagementClient, ManagementClientFactory, ManagementResponse,
};
use crate::protocol::Protocol;

/// Reconciler for one Artemis broker
pub struct Artemis {
    connection: BrokerConnection,
    factory: Arc<dyn ManagementClientFactory>,
    snapshot: Arc<TopologySnapshot>,
    span: Span,
}

impl Artemis {
    pub const IMPLEMENTATION: &'static str = "artemis";

    pub fn new(connection: BrokerConnection, factory: Arc<dyn ManagementClientFactory>) -> Self {
        let span = info_span!(
            "broker",
            name = %connection.broker_name,
            host = %connection.host
        );
        Self {
            connection,
            factory,
            snapshot: Arc::new(TopologySnapshot::default()),
            span,
        }
    }

    /// Reconciler talking to the broker's Jolokia endpoint
    #[cfg(feature = "jolokia")]
    pub fn jolokia(config: &crate::config::ArtemisConfig) -> Self {
        Self::new(
            config.connection(),
            Arc::new(crate::management::JolokiaClientFactory),
        )
    }

    /// Parent logging span for this broker's operations
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn name(&self) -> &str {
        &self.connection.broker_name
    }

    pub fn connection(&self) -> &BrokerConnection {
        &self.connection
    }

    pub fn supported_protocols(&self) -> &'static [Protocol] {
        &Protocol::ALL
    }

    /// Currently cached snapshot
    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Queues of the broker, refreshed when asked or when none are cached
    pub async fn queues(&mut self, refresh: bool) -> HarnessResult<&[Arc<Queue>]> {
        if refresh || self.snapshot.queues().is_empty() {
            self.refresh().await?;
        }
        Ok(self.snapshot.queues())
    }

    /// Addresses of the broker, refreshed when asked or when none are cached
    pub async fn addresses(&mut self, refresh: bool) -> HarnessResult<&[Arc<Address>]> {
        if refresh || self.snapshot.addresses().is_empty() {
            self.refresh().await?;
        }
        Ok(self.snapshot.addresses())
    }

    /// Rebuild the snapshot from the live broker
    ///
    /// Returns `Ok(false)` when a listing call failed and the previous
    /// snapshot was kept. An inconsistent listing is an error and also keeps
    /// the previous snapshot.
    pub async fn refresh(&mut self) -> HarnessResult<bool> {
        let span = self.span.clone();
        async {
            let client = self.management_client()?;

            let addresses = client.list_addresses().await;
            if !addresses.success {
                warn!("Unable to retrieve addresses: {}", addresses.error_message());
                return Ok(false);
            }

            let queues = client.list_queues().await;
            if !queues.success {
                warn!("Unable to retrieve queues: {}", queues.error_message());
                return Ok(false);
            }

            let snapshot = TopologySnapshot::build(
                addresses.data.as_deref().unwrap_or_default(),
                queues.data.as_deref().unwrap_or_default(),
            )?;

            info!(
                "Topology refreshed: {} addresses, {} queues",
                snapshot.addresses().len(),
                snapshot.queues().len()
            );
            self.snapshot = Arc::new(snapshot);
            Ok(true)
        }
        .instrument(span)
        .await
    }

    /// Create an address; `Both` creates it with both routing types
    pub async fn create_address(
        &self,
        name: &str,
        routing_type: RoutingType,
    ) -> HarnessResult<ManagementResponse<Value>> {
        async {
            debug!("Creating address {} ({})", name, routing_type);
            let client = self.management_client()?;
            Ok(client.create_address(name, routing_type.wire_value()).await)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Create a queue bound to `address`
    ///
    /// Queues cannot use `Both`; that is rejected before contacting the broker.
    pub async fn create_queue(
        &self,
        address: &str,
        queue: &str,
        routing_type: RoutingType,
        durable: bool,
    ) -> HarnessResult<ManagementResponse<Value>> {
        if !routing_type.is_queue_type() {
            return Err(HarnessError::InvalidArgument(format!(
                "queue {} can only use ANYCAST or MULTICAST routing type",
                queue
            )));
        }

        async {
            debug!("Creating queue {} on {} ({})", queue, address, routing_type);
            let client = self.management_client()?;
            Ok(client
                .create_queue(address, queue, durable, routing_type.wire_value())
                .await)
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn delete_address(
        &self,
        name: &str,
        force: bool,
    ) -> HarnessResult<ManagementResponse<Value>> {
        async {
            debug!("Deleting address {}", name);
            let client = self.management_client()?;
            Ok(client.delete_address(name, force).await)
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn delete_queue(
        &self,
        name: &str,
        remove_consumers: bool,
    ) -> HarnessResult<ManagementResponse<Value>> {
        async {
            debug!("Deleting queue {}", name);
            let client = self.management_client()?;
            Ok(client.delete_queue(name, remove_consumers).await)
        }
        .instrument(self.span.clone())
        .await
    }

    fn management_client(&self) -> HarnessResult<Box<dyn ManagementClient>> {
        self.factory.connect(&self.connection)
    }
}
