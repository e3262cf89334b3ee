// Copyright (c) 2025 - Cowboy AI, Inc.
//! Broker URLs of the form `scheme://[user[:pass]@]host[:port][/path][?query][#fragment]`

use std::borrow::Cow;
use std::fmt;
use ::url::Url;

use crate::errors::{HarnessError, HarnessResult};
use crate::protocol::Protocol;

pub const DEFAULT_SCHEME: &str = "amqp";
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Parsed broker URL
///
/// Credentials are kept percent-encoded as written; see
/// [`BrokerUrl::username`] for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerUrl {
    raw: String,
    scheme: String,
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl BrokerUrl {
    pub fn parse(raw: &str) -> HarnessResult<Self> {
        let normalized: Cow<'_, str> = if raw.starts_with("//") {
            Cow::Owned(format!("{}:{}", DEFAULT_SCHEME, raw))
        } else if !raw.contains("://") {
            Cow::Owned(format!("{}://{}", DEFAULT_SCHEME, raw))
        } else {
            Cow::Borrowed(raw)
        };

        let url = Url::parse(&normalized)?;

        Ok(Self {
            raw: raw.to_string(),
            scheme: url.scheme().to_string(),
            username: Some(url.username())
                .filter(|user| !user.is_empty())
                .map(str::to_string),
            password: url.password().map(str::to_string),
            host: url
                .host_str()
                .filter(|host| !host.is_empty())
                .map(str::to_string),
            port: url.port(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        })
    }

    /// The URL exactly as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| Protocol::Amqp10.default_port())
    }

    /// Path including the leading slash, empty when absent
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path followed by `?query` and `#fragment` when present
    pub fn address(&self) -> String {
        let mut address = self.path.clone();
        if let Some(query) = &self.query {
            address.push('?');
            address.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            address.push('#');
            address.push_str(fragment);
        }
        address
    }

    /// Username, percent-decoded when `unquote` is set
    pub fn username(&self, unquote: bool) -> HarnessResult<Option<String>> {
        decode(self.username.as_deref(), unquote)
    }

    /// Password, percent-decoded when `unquote` is set
    pub fn password(&self, unquote: bool) -> HarnessResult<Option<String>> {
        decode(self.password.as_deref(), unquote)
    }

    /// `scheme://host:port` with defaults filled in
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host(), self.port())
    }

    /// Authority section as written: `[user[:pass]@]host[:port]`
    pub fn netloc(&self) -> String {
        let mut netloc = String::new();
        if let Some(user) = &self.username {
            netloc.push_str(user);
            if let Some(password) = &self.password {
                netloc.push(':');
                netloc.push_str(password);
            }
            netloc.push('@');
        }
        if let Some(host) = &self.host {
            netloc.push_str(host);
        }
        if let Some(port) = self.port {
            netloc.push_str(&format!(":{}", port));
        }
        netloc
    }
}

fn decode(value: Option<&str>, unquote: bool) -> HarnessResult<Option<String>> {
    match value {
        Some(value) if unquote => urlencoding::decode(value)
            .map(|decoded| Some(decoded.into_owned()))
            .map_err(|e| HarnessError::InvalidUrl(format!("{}: {}", value, e))),
        Some(value) => Ok(Some(value.to_string())),
        None => Ok(None),
    }
}

impl fmt::Display for BrokerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
