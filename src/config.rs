// Copyright (c) 2025 - Cowboy AI, Inc.
//! Harness configuration
//!
//! Settings are plain serde structs with defaults, loadable from JSON or
//! from environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{HarnessError, HarnessResult};
use crate::management::BrokerConnection;
use crate::service::{ReadinessPolicy, StatusPatterns};

/// Configuration of an Artemis broker node and its service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtemisConfig {
    /// Broker name as registered in JMX
    #[serde(default = "default_broker_name")]
    pub broker_name: String,

    /// Host running the broker
    #[serde(default = "default_host")]
    pub host: String,

    /// Messaging (acceptor) port
    #[serde(default = "default_messaging_port")]
    pub messaging_port: u16,

    /// Web console / management port
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// Broker instance directory
    #[serde(default = "default_broker_path")]
    pub broker_path: PathBuf,

    /// OS user owning the broker instance
    #[serde(default = "default_service_user")]
    pub service_user: String,

    /// Management API user
    #[serde(default = "default_user")]
    pub user: String,

    /// Management API password
    #[serde(default = "default_password")]
    pub password: String,

    /// Path of the Jolokia endpoint below the web port
    #[serde(default = "default_management_path")]
    pub management_path: String,

    /// Timeout for service commands and management calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub readiness: ReadinessPolicy,

    #[serde(default)]
    pub status_patterns: StatusPatterns,
}

fn default_broker_name() -> String {
    "amq".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_messaging_port() -> u16 {
    61616
}

fn default_web_port() -> u16 {
    8161
}

fn default_broker_path() -> PathBuf {
    PathBuf::from("/opt/artemis")
}

fn default_service_user() -> String {
    "jamq".to_string()
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

fn default_management_path() -> String {
    "console/jolokia".to_string()
}

fn default_timeout_secs() -> u64 {
    90
}

impl Default for ArtemisConfig {
    fn default() -> Self {
        Self {
            broker_name: default_broker_name(),
            host: default_host(),
            messaging_port: default_messaging_port(),
            web_port: default_web_port(),
            broker_path: default_broker_path(),
            service_user: default_service_user(),
            user: default_user(),
            password: default_password(),
            management_path: default_management_path(),
            timeout_secs: default_timeout_secs(),
            readiness: ReadinessPolicy::default(),
            status_patterns: StatusPatterns::default(),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> HarnessResult<T> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| HarnessError::Configuration(format!("{} has invalid value {:?}", key, value))),
        Err(_) => Ok(default),
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

impl ArtemisConfig {
    /// Parse configuration from JSON, filling in defaults
    pub fn from_json(json: &str) -> HarnessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from `ARTEMIS_*` environment variables
    pub fn from_env() -> HarnessResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            broker_name: env_string("ARTEMIS_BROKER_NAME", defaults.broker_name),
            host: env_string("ARTEMIS_HOST", defaults.host),
            messaging_port: env_parse("ARTEMIS_PORT", defaults.messaging_port)?,
            web_port: env_parse("ARTEMIS_WEB_PORT", defaults.web_port)?,
            broker_path: std::env::var("ARTEMIS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.broker_path),
            service_user: env_string("ARTEMIS_SERVICE_USER", defaults.service_user),
            user: env_string("ARTEMIS_USER", defaults.user),
            password: env_string("ARTEMIS_PASSWORD", defaults.password),
            management_path: env_string("ARTEMIS_MANAGEMENT_PATH", defaults.management_path),
            timeout_secs: env_parse("ARTEMIS_TIMEOUT_SECS", defaults.timeout_secs)?,
            readiness: defaults.readiness,
            status_patterns: defaults.status_patterns,
        })
    }

    /// Path of the `artemis-service` script
    pub fn service_path(&self) -> PathBuf {
        self.broker_path.join("bin").join("artemis-service")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Management connection parameters for this broker
    pub fn connection(&self) -> BrokerConnection {
        BrokerConnection {
            broker_name: self.broker_name.clone(),
            host: self.host.clone(),
            web_port: self.web_port,
            user: self.user.clone(),
            password: self.password.clone(),
            management_path: self.management_path.clone(),
            timeout: self.timeout(),
        }
    }
}
