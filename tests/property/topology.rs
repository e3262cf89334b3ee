// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Topology Snapshots

use messaging_harness::broker::TopologySnapshot;
use messaging_harness::errors::HarnessError;
use messaging_harness::management::{AddressInfo, QueueInfo, RoutingTypesField};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn routing() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("ANYCAST"), Just("MULTICAST")]
}

/// Distinct address names with queues that only reference them
fn consistent_listing() -> impl Strategy<Value = (Vec<AddressInfo>, Vec<QueueInfo>)> {
    proptest::collection::btree_set("[a-z]{1,8}", 1..6).prop_flat_map(|names: BTreeSet<String>| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        (
            proptest::collection::vec(routing(), count),
            proptest::collection::vec((0..count, routing(), 0u64..1000), 0..12),
        )
            .prop_map(move |(address_routing, queues)| {
                let addresses = names
                    .iter()
                    .zip(address_routing)
                    .map(|(name, routing)| AddressInfo {
                        name: name.clone(),
                        routing_types: RoutingTypesField::One(routing.to_string()),
                    })
                    .collect();
                let queues = queues
                    .into_iter()
                    .enumerate()
                    .map(|(i, (slot, routing, count))| QueueInfo {
                        name: format!("q{}", i),
                        routing_type: routing.to_string(),
                        address: names[slot].clone(),
                        message_count: count,
                    })
                    .collect();
                (addresses, queues)
            })
    })
}

proptest! {
    /// Every queue of a built snapshot belongs to exactly its own address
    #[test]
    fn prop_queues_resolve_to_owning_address((addresses, queues) in consistent_listing()) {
        let snapshot = TopologySnapshot::build(&addresses, &queues).unwrap();

        prop_assert_eq!(snapshot.queues().len(), queues.len());
        for queue in snapshot.queues() {
            let owner = snapshot.address_of(queue).unwrap();
            prop_assert_eq!(owner.name(), queue.address_name());
            prop_assert!(owner.queues().iter().any(|q| Arc::ptr_eq(q, queue)));
        }

        let attached: usize = snapshot.addresses().iter().map(|a| a.queues().len()).sum();
        prop_assert_eq!(attached, queues.len());
    }

    /// A single dangling queue fails the whole build
    #[test]
    fn prop_dangling_queue_is_rejected((addresses, mut queues) in consistent_listing()) {
        queues.push(QueueInfo {
            name: "dangling".to_string(),
            routing_type: "ANYCAST".to_string(),
            address: "NOT-AN-ADDRESS".to_string(),
            message_count: 0,
        });

        let result = TopologySnapshot::build(&addresses, &queues);
        let is_inconsistency = matches!(result, Err(HarnessError::DataInconsistency { .. }));
        prop_assert!(is_inconsistency);
    }
}
