// Copyright (c) 2025 - Cowboy AI, Inc.
//! Routing type taxonomy
//!
//! `Anycast` is point-to-point, `Multicast` is fan-out. `Both` is the union
//! of the two and only exists as creation intent for addresses: discovery
//! never produces it and queues never carry it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{HarnessError, HarnessResult};

/// Delivery semantics of an address or queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingType {
    Anycast,
    Multicast,
    Both,
}

/// Split a routing type value such as `"[ANYCAST, MULTICAST]"` into tokens
fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

fn single(token: &str) -> Option<RoutingType> {
    match token.to_uppercase().as_str() {
        "ANYCAST" => Some(RoutingType::Anycast),
        "MULTICAST" => Some(RoutingType::Multicast),
        _ => None,
    }
}

impl RoutingType {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anycast => "ANYCAST",
            Self::Multicast => "MULTICAST",
            Self::Both => "BOTH",
        }
    }

    /// Value expected by the broker management API
    pub fn wire_value(&self) -> &'static str {
        match self {
            Self::Anycast => "ANYCAST",
            Self::Multicast => "MULTICAST",
            Self::Both => "ANYCAST, MULTICAST",
        }
    }

    /// Whether queues may use this routing type
    pub fn is_queue_type(&self) -> bool {
        !matches!(self, Self::Both)
    }

    /// Parse a routing type advertised by a broker
    ///
    /// Tolerates case, brackets, whitespace and lists, and yields the first
    /// recognized single routing type; never `Both`.
    pub fn from_advertised(value: &str) -> HarnessResult<Self> {
        tokens(value)
            .find_map(single)
            .ok_or_else(|| HarnessError::MalformedRoutingType(value.to_string()))
    }
}

impl FromStr for RoutingType {
    type Err = HarnessError;

    /// Parse routing type intent: `ANYCAST`, `MULTICAST`, `BOTH`, or a list
    /// naming both single types
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut anycast = false;
        let mut multicast = false;

        for token in tokens(s) {
            match token.to_uppercase().as_str() {
                "ANYCAST" => anycast = true,
                "MULTICAST" => multicast = true,
                "BOTH" => {
                    anycast = true;
                    multicast = true;
                }
                _ => return Err(HarnessError::MalformedRoutingType(s.to_string())),
            }
        }

        match (anycast, multicast) {
            (true, true) => Ok(Self::Both),
            (true, false) => Ok(Self::Anycast),
            (false, true) => Ok(Self::Multicast),
            (false, false) => Err(HarnessError::MalformedRoutingType(s.to_string())),
        }
    }
}

impl fmt::Display for RoutingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
