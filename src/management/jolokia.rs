// Copyright (c) 2025 - Cowboy AI, Inc.

//! Artemis Jolokia Management Client
//!
//! Implements [`ManagementClient`] on top of the Jolokia HTTP bridge exposed
//! by the Artemis web console. Every operation is a JMX `exec` request
//! against the broker MBean:
//!
//! ```text
//! list_addresses  = exec listAddresses(java.lang.String,int,int)
//! list_queues     = exec listQueues(java.lang.String,int,int)
//! create_address  = exec createAddress(java.lang.String,java.lang.String)
//! delete_address  = exec deleteAddress(java.lang.String,boolean)
//! create_queue    = exec createQueue(java.lang.String,java.lang.String,boolean,java.lang.String)
//! delete_queue    = exec destroyQueue(java.lang.String,boolean)
//! ```
//!
//! List operations answer with a JSON document encoded as a string inside
//! the Jolokia `value` field: `{"data": [...], "count": N}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use messaging_harness::config::ArtemisConfig;
//! use messaging_harness::management::{JolokiaClient, ManagementClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ArtemisConfig::default();
//!     let client = JolokiaClient::new(&config.connection())?;
//!
//!     let queues = client.list_queues().await;
//!     println!("{:?}", queues.data);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::future::Future;
use tracing::{debug, warn};

use super::{
    AddressInfo, BrokerConnection, ManagementClient, ManagementClientFactory, ManagementResponse,
    QueueInfo,
};
use crate::errors::{HarnessError, HarnessResult};

/// Page size requested from list operations
const LIST_PAGE_SIZE: u64 = 1000;

/// Empty filter accepted by `listAddresses` / `listQueues`
const NO_FILTER: &str = r#"{"field":"","operation":"","value":""}"#;

/// Jolokia client bound to one broker
pub struct JolokiaClient {
    endpoint: String,
    mbean: String,
    user: String,
    password: String,
    client: Client,
}

impl JolokiaClient {
    /// Create a client for the broker described by `connection`
    pub fn new(connection: &BrokerConnection) -> HarnessResult<Self> {
        let origin = format!("http://{}", connection.host);
        let endpoint = format!(
            "http://{}:{}/{}/",
            connection.host,
            connection.web_port,
            connection.management_path.trim_matches('/')
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&origin)
                .map_err(|e| HarnessError::Management(format!("Invalid origin header: {}", e)))?,
        );

        let client = Client::builder()
            .timeout(connection.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                HarnessError::Management(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            endpoint,
            mbean: broker_mbean(&connection.broker_name),
            user: connection.user.clone(),
            password: connection.password.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exec(&self, operation: &str, arguments: Vec<Value>) -> ManagementResponse<Value> {
        let body = exec_body(&self.mbean, operation, arguments);
        debug!("Jolokia exec {} on {}", operation, self.endpoint);

        let response = match self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Jolokia request {} failed: {}", operation, e);
                return ManagementResponse::failed(format!("Jolokia request failed: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ManagementResponse::failed(format!("Jolokia returned {}: {}", status, body));
        }

        match response.json::<Value>().await {
            Ok(body) => parse_exec_response(body),
            Err(e) => ManagementResponse::failed(format!("Invalid Jolokia response: {}", e)),
        }
    }

    async fn list_page<T: DeserializeOwned>(
        &self,
        operation: &str,
        page: u64,
    ) -> Result<ListPage<T>, String> {
        let response = self
            .exec(
                operation,
                vec![json!(NO_FILTER), json!(page), json!(LIST_PAGE_SIZE)],
            )
            .await;

        if !response.success {
            return Err(response.error_message().to_string());
        }
        decode_list_page(response.data.as_ref().unwrap_or(&Value::Null))
    }

    async fn list<T: DeserializeOwned>(&self, operation: &str) -> ManagementResponse<Vec<T>> {
        match collect_pages(|page| self.list_page(operation, page)).await {
            Ok(items) => ManagementResponse::ok(items),
            Err(e) => ManagementResponse::failed(e),
        }
    }
}

/// Object name of the broker MBean
fn broker_mbean(broker_name: &str) -> String {
    format!("org.apache.activemq.artemis:broker=\"{}\"", broker_name)
}

fn exec_body(mbean: &str, operation: &str, arguments: Vec<Value>) -> Value {
    json!({
        "type": "exec",
        "mbean": mbean,
        "operation": operation,
        "arguments": arguments,
    })
}

/// Interpret the Jolokia envelope (`status`, `value`, `error`)
fn parse_exec_response(body: Value) -> ManagementResponse<Value> {
    let status = body["status"].as_u64().unwrap_or(0);
    if status != 200 {
        let error = body["error"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Jolokia status {}", status));
        return ManagementResponse::failed(error);
    }

    ManagementResponse::ok(body.get("value").cloned().unwrap_or(Value::Null))
}

/// One page of a list operation
#[derive(Debug)]
struct ListPage<T> {
    data: Vec<T>,
    /// Total number of entries on the broker, when reported
    count: Option<usize>,
}

/// Decode a list page, which may arrive JSON-encoded inside a string
fn decode_list_page<T: DeserializeOwned>(value: &Value) -> Result<ListPage<T>, String> {
    let page = match value {
        Value::String(text) => serde_json::from_str::<Value>(text)
            .map_err(|e| format!("Invalid list page: {}", e))?,
        Value::Null => {
            return Ok(ListPage {
                data: Vec::new(),
                count: None,
            })
        }
        other => other.clone(),
    };

    let data = match page.get("data") {
        Some(data) => serde_json::from_value(data.clone())
            .map_err(|e| format!("Invalid list entry: {}", e))?,
        None => Vec::new(),
    };
    let count = match page.get("count") {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as usize),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };

    Ok(ListPage { data, count })
}

/// Fetch pages starting at 1 until the reported total is collected
///
/// A listing without a total is a single page. A page that comes back
/// empty before the total is reached fails the whole listing.
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, String>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<ListPage<T>, String>>,
{
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let ListPage { data, count } = fetch(page).await?;
        let fetched = data.len();
        items.extend(data);

        let Some(total) = count else {
            return Ok(items);
        };
        if items.len() >= total {
            return Ok(items);
        }
        if fetched == 0 {
            return Err(format!(
                "Listing truncated: {} of {} entries after page {}",
                items.len(),
                total,
                page
            ));
        }
        debug!("Fetched page {} ({} of {} entries)", page, items.len(), total);
        page += 1;
    }
}

#[async_trait]
impl ManagementClient for JolokiaClient {
    async fn list_queues(&self) -> ManagementResponse<Vec<QueueInfo>> {
        self.list("listQueues(java.lang.String,int,int)").await
    }

    async fn list_addresses(&self) -> ManagementResponse<Vec<AddressInfo>> {
        self.list("listAddresses(java.lang.String,int,int)").await
    }

    async fn create_address(
        &self,
        name: &str,
        routing_types: &str,
    ) -> ManagementResponse<Value> {
        self.exec(
            "createAddress(java.lang.String,java.lang.String)",
            vec![json!(name), json!(routing_types)],
        )
        .await
    }

    async fn delete_address(&self, name: &str, force: bool) -> ManagementResponse<Value> {
        self.exec(
            "deleteAddress(java.lang.String,boolean)",
            vec![json!(name), json!(force)],
        )
        .await
    }

    async fn create_queue(
        &self,
        address: &str,
        queue: &str,
        durable: bool,
        routing_type: &str,
    ) -> ManagementResponse<Value> {
        self.exec(
            "createQueue(java.lang.String,java.lang.String,boolean,java.lang.String)",
            vec![json!(address), json!(queue), json!(durable), json!(routing_type)],
        )
        .await
    }

    async fn delete_queue(&self, name: &str, remove_consumers: bool) -> ManagementResponse<Value> {
        self.exec(
            "destroyQueue(java.lang.String,boolean)",
            vec![json!(name), json!(remove_consumers)],
        )
        .await
    }
}

/// Factory creating a new [`JolokiaClient`] per operation
#[derive(Debug, Clone, Copy, Default)]
pub struct JolokiaClientFactory;

impl ManagementClientFactory for JolokiaClientFactory {
    fn connect(&self, connection: &BrokerConnection) -> HarnessResult<Box<dyn ManagementClient>> {
        Ok(Box::new(JolokiaClient::new(connection)?))
    }
}
