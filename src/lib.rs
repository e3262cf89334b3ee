//! Messaging infrastructure test harness
//!
//! This crate drives messaging brokers under test: it runs commands on target
//! hosts through pluggable executors, controls broker services and waits for
//! them to become reachable, and reconciles a read model of broker topology
//! (addresses and queues) through the broker's management API.

pub mod broker;
pub mod client;
pub mod command;
pub mod config;
pub mod errors;
pub mod executor;
pub mod management;
pub mod protocol;
pub mod service;

// Re-export commonly used types
pub use broker::{Address, Artemis, Queue, RoutingType, TopologySnapshot};
pub use command::{ArgvCommand, CommandEncoding, CommandOptions, ModuleCommand};
pub use config::ArtemisConfig;
pub use errors::{HarnessError, HarnessResult};
pub use executor::{Execution, Executor, ExecutorKind};
pub use management::{ManagementClient, ManagementClientFactory, ManagementResponse};
pub use protocol::Protocol;
pub use service::{
    PersistentService, Service, ServiceArtemis, ServiceStatus, ServiceSystem, ServiceSystemState,
};
