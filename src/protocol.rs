// Copyright (c) 2025 - Cowboy AI, Inc.
//! Messaging protocols spoken by brokers and clients

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire protocol with its conventional port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Amqp10,
    Mqtt,
    Stomp,
    Openwire,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [
        Protocol::Amqp10,
        Protocol::Mqtt,
        Protocol::Stomp,
        Protocol::Openwire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Amqp10 => "AMQP 1.0",
            Protocol::Mqtt => "MQTT",
            Protocol::Stomp => "STOMP",
            Protocol::Openwire => "OpenWire",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Amqp10 => 5672,
            Protocol::Mqtt => 1883,
            Protocol::Stomp => 61613,
            Protocol::Openwire => 61616,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
