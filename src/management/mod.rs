// Copyright (c) 2025 - Cowboy AI, Inc.
//! Broker Management Client Adapter
//!
//! Contract for a remote management API able to list, create and delete
//! broker addresses and queues. Every call returns a [`ManagementResponse`]:
//! failures are reported through `success == false` plus an error text, never
//! raised.
//!
//! Clients are cheap and stateless. Callers obtain a fresh one from a
//! [`ManagementClientFactory`] for every logical operation instead of pooling
//! them.
//!
//! # Data shape
//!
//! ```text
//! address: {"name": "A1", "routingTypes": "ANYCAST"}
//! queue:   {"name": "Q1", "routingType": "ANYCAST", "address": "A1", "messageCount": 5}
//! ```

#[cfg(feature = "jolokia")]
pub mod jolokia;

#[cfg(feature = "jolokia")]
pub use jolokia::{JolokiaClient, JolokiaClientFactory};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::HarnessResult;

/// Outcome of one management call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ManagementResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Error text, or a placeholder when the adapter gave none
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("no error detail")
    }
}

/// Advertised routing types of an address: a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutingTypesField {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for RoutingTypesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingTypesField::One(value) => write!(f, "{}", value),
            RoutingTypesField::Many(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// Address entry as returned by `list_addresses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub name: String,

    #[serde(rename = "routingTypes")]
    pub routing_types: RoutingTypesField,
}

/// Queue entry as returned by `list_queues`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueInfo {
    pub name: String,

    #[serde(rename = "routingType")]
    pub routing_type: String,

    pub address: String,

    #[serde(rename = "messageCount", default, deserialize_with = "count_from_number_or_string")]
    pub message_count: u64,
}

/// Artemis renders every field of its list views as a string
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Remote management API of a broker
#[async_trait]
pub trait ManagementClient: Send + Sync {
    async fn list_queues(&self) -> ManagementResponse<Vec<QueueInfo>>;

    async fn list_addresses(&self) -> ManagementResponse<Vec<AddressInfo>>;

    /// `routing_types` is the wire form, e.g. `"ANYCAST, MULTICAST"`
    async fn create_address(
        &self,
        name: &str,
        routing_types: &str,
    ) -> ManagementResponse<serde_json::Value>;

    async fn delete_address(&self, name: &str, force: bool)
        -> ManagementResponse<serde_json::Value>;

    async fn create_queue(
        &self,
        address: &str,
        queue: &str,
        durable: bool,
        routing_type: &str,
    ) -> ManagementResponse<serde_json::Value>;

    async fn delete_queue(
        &self,
        name: &str,
        remove_consumers: bool,
    ) -> ManagementResponse<serde_json::Value>;
}

/// Connection parameters of a broker's management endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConnection {
    pub broker_name: String,
    pub host: String,
    pub web_port: u16,
    pub user: String,
    pub password: String,
    pub management_path: String,
    pub timeout: Duration,
}

/// Produces a fresh management client bound to a connection
pub trait ManagementClientFactory: Send + Sync {
    fn connect(&self, connection: &BrokerConnection) -> HarnessResult<Box<dyn ManagementClient>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_info_single_routing_type() {
        let info: AddressInfo =
            serde_json::from_value(json!({"name": "A1", "routingTypes": "ANYCAST"})).unwrap();

        assert_eq!(info.name, "A1");
        assert_eq!(info.routing_types, RoutingTypesField::One("ANYCAST".into()));
    }

    #[test]
    fn test_address_info_routing_type_list() {
        let info: AddressInfo = serde_json::from_value(
            json!({"name": "A2", "routingTypes": ["MULTICAST", "ANYCAST"]}),
        )
        .unwrap();

        assert_eq!(info.routing_types.to_string(), "MULTICAST, ANYCAST");
    }

    #[test]
    fn test_queue_info_fields() {
        let info: QueueInfo = serde_json::from_value(json!({
            "name": "Q1",
            "routingType": "ANYCAST",
            "address": "A1",
            "messageCount": 5,
            "durable": true
        }))
        .unwrap();

        assert_eq!(info.address, "A1");
        assert_eq!(info.message_count, 5);
    }

    #[test]
    fn test_queue_info_string_count() {
        let info: QueueInfo = serde_json::from_value(json!({
            "name": "DLQ",
            "routingType": "ANYCAST",
            "address": "DLQ",
            "messageCount": "12"
        }))
        .unwrap();

        assert_eq!(info.message_count, 12);
    }

    #[test]
    fn test_failed_response() {
        let response: ManagementResponse<()> = ManagementResponse::failed("HTTP 401");
        assert!(!response.success);
        assert_eq!(response.error_message(), "HTTP 401");
    }
}
