// Copyright (c) 2025 - Cowboy AI, Inc.
//! Broker Topology
//!
//! Read model of a broker's addresses and queues, plus the reconciler that
//! keeps it in step with the live broker through the management API.
//!
//! ```text
//! ManagementClient ──list_addresses──┐
//!                  ──list_queues─────┼──▶ TopologySnapshot ──▶ Artemis cache
//!                                    │     (addresses ◀── queues)
//! ```
//!
//! A snapshot is built completely before it replaces the cached one, so
//! readers never observe a queue whose address is missing.

pub mod artemis;
pub mod route;
pub mod topology;

pub use artemis::Artemis;
pub use route::RoutingType;
pub use topology::{Address, Queue, TopologySnapshot};
