// Copyright (c) 2025 - Cowboy AI, Inc.
//! Broker topology model and snapshot construction

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::route::RoutingType;
use crate::errors::{HarnessError, HarnessResult};
use crate::management::{AddressInfo, QueueInfo};

/// A message-holding entity bound to exactly one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Queue {
    name: String,
    routing_type: RoutingType,
    address: String,
    message_count: u64,
}

impl Queue {
    /// Create a queue bound to `address`; `Both` is rejected
    pub fn new(
        name: impl Into<String>,
        routing_type: RoutingType,
        address: impl Into<String>,
    ) -> HarnessResult<Self> {
        let name = name.into();
        if !routing_type.is_queue_type() {
            return Err(HarnessError::InvalidArgument(format!(
                "queue {} can only use ANYCAST or MULTICAST routing type",
                name
            )));
        }
        Ok(Self {
            name,
            routing_type,
            address: address.into(),
            message_count: 0,
        })
    }

    pub fn with_message_count(mut self, message_count: u64) -> Self {
        self.message_count = message_count;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routing_type(&self) -> RoutingType {
        self.routing_type
    }

    /// Name of the owning address; resolve through [`TopologySnapshot::address_of`]
    pub fn address_name(&self) -> &str {
        &self.address
    }

    /// Point-in-time message count
    pub fn message_count(&self) -> u64 {
        self.message_count
    }
}

/// A named routing entity owning zero or more queues
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    name: String,
    routing_type: RoutingType,
    queues: Vec<Arc<Queue>>,
}

impl Address {
    pub fn new(name: impl Into<String>, routing_type: RoutingType) -> Self {
        Self {
            name: name.into(),
            routing_type,
            queues: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routing_type(&self) -> RoutingType {
        self.routing_type
    }

    /// Queues bound to this address, in discovery order
    pub fn queues(&self) -> &[Arc<Queue>] {
        &self.queues
    }
}

/// Consistent view of a broker's addresses and queues
///
/// Every queue's address resolves to an address of the same snapshot.
/// Snapshots are immutable; a refresh builds a new one.
#[derive(Debug, Default)]
pub struct TopologySnapshot {
    addresses: Vec<Arc<Address>>,
    queues: Vec<Arc<Queue>>,
    by_name: HashMap<String, Arc<Address>>,
}

impl TopologySnapshot {
    /// Join address and queue listings into a snapshot
    ///
    /// Addresses are indexed first; a queue naming an address missing from
    /// the listing is a [`HarnessError::DataInconsistency`].
    pub fn build(addresses: &[AddressInfo], queues: &[QueueInfo]) -> HarnessResult<Self> {
        let mut built: Vec<Address> = Vec::with_capacity(addresses.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(addresses.len());

        if addresses.is_empty() {
            debug!("No addresses available");
        }
        for info in addresses {
            debug!(
                "Address found: {} - routingType: {}",
                info.name, info.routing_types
            );
            let routing_type = RoutingType::from_advertised(&info.routing_types.to_string())?;
            index.insert(info.name.as_str(), built.len());
            built.push(Address::new(info.name.clone(), routing_type));
        }

        if queues.is_empty() {
            debug!("No queues available");
        }
        let mut queue_list = Vec::with_capacity(queues.len());
        for info in queues {
            debug!(
                "Queue found: {} - routingType: {}",
                info.name, info.routing_type
            );
            let routing_type = RoutingType::from_advertised(&info.routing_type)?;
            let slot = *index.get(info.address.as_str()).ok_or_else(|| {
                HarnessError::DataInconsistency {
                    queue: info.name.clone(),
                    address: info.address.clone(),
                }
            })?;

            let queue = Arc::new(
                Queue::new(info.name.clone(), routing_type, info.address.clone())?
                    .with_message_count(info.message_count),
            );
            built[slot].queues.push(Arc::clone(&queue));
            queue_list.push(queue);
        }

        let addresses: Vec<Arc<Address>> = built.into_iter().map(Arc::new).collect();
        let by_name = addresses
            .iter()
            .map(|address| (address.name.clone(), Arc::clone(address)))
            .collect();

        Ok(Self {
            addresses,
            queues: queue_list,
            by_name,
        })
    }

    pub fn addresses(&self) -> &[Arc<Address>] {
        &self.addresses
    }

    pub fn queues(&self) -> &[Arc<Queue>] {
        &self.queues
    }

    /// Look up an address by name
    pub fn address(&self, name: &str) -> Option<&Arc<Address>> {
        self.by_name.get(name)
    }

    /// Resolve a queue's owning address
    pub fn address_of(&self, queue: &Queue) -> Option<&Arc<Address>> {
        self.address(queue.address_name())
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::RoutingTypesField;

    fn address(name: &str, routing: &str) -> AddressInfo {
        AddressInfo {
            name: name.to_string(),
            routing_types: RoutingTypesField::One(routing.to_string()),
        }
    }

    fn queue(name: &str, routing: &str, address: &str, count: u64) -> QueueInfo {
        QueueInfo {
            name: name.to_string(),
            routing_type: routing.to_string(),
            address: address.to_string(),
            message_count: count,
        }
    }

    #[test]
    fn test_queues_attach_to_addresses_in_order() {
        let snapshot = TopologySnapshot::build(
            &[address("orders", "ANYCAST"), address("events", "MULTICAST")],
            &[
                queue("orders.a", "ANYCAST", "orders", 1),
                queue("events.sub", "MULTICAST", "events", 0),
                queue("orders.b", "ANYCAST", "orders", 2),
            ],
        )
        .unwrap();

        let orders = snapshot.address("orders").unwrap();
        let names: Vec<_> = orders.queues().iter().map(|q| q.name()).collect();
        assert_eq!(names, vec!["orders.a", "orders.b"]);
        assert_eq!(snapshot.queues().len(), 3);
        assert_eq!(snapshot.addresses()[1].routing_type(), RoutingType::Multicast);
    }

    #[test]
    fn test_unknown_address_is_inconsistency() {
        let result = TopologySnapshot::build(
            &[address("orders", "ANYCAST")],
            &[queue("lost", "ANYCAST", "missing", 0)],
        );

        match result {
            Err(HarnessError::DataInconsistency { queue, address }) => {
                assert_eq!(queue, "lost");
                assert_eq!(address, "missing");
            }
            other => panic!("expected inconsistency, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_routing_type_propagates() {
        let result = TopologySnapshot::build(&[address("orders", "SIDEWAYS")], &[]);
        assert!(matches!(result, Err(HarnessError::MalformedRoutingType(_))));
    }

    #[test]
    fn test_empty_listing() {
        let snapshot = TopologySnapshot::build(&[], &[]).unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.address("anything").is_none());
    }

    #[test]
    fn test_queue_rejects_both() {
        assert!(Queue::new("q", RoutingType::Both, "a").is_err());
        assert!(Queue::new("q", RoutingType::Multicast, "a").is_ok());
    }
}
