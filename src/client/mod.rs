// Copyright (c) 2025 - Cowboy AI, Inc.
//! External Messaging Clients
//!
//! Drives the command-line test clients installed on a node (Qpid JMS,
//! Proton Python and Rhea) through an [`Executor`]. Each client builds its
//! command line from the broker URL, authentication and SSL settings, and
//! the message to send.
//!
//! ```text
//! Java    cli-qpid-jms sender|connector --broker scheme://host:port --conn-username ..
//! Python  cli-proton-python-sender|connector --broker-url <url as given> ..
//! NodeJS  cli-rhea-sender|connector --broker <netloc> --address <path?query#fragment> ..
//! ```

pub mod url;

pub use self::url::BrokerUrl;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument, Span};

use crate::command::{CommandEncoding, CommandOptions};
use crate::errors::{HarnessError, HarnessResult};
use crate::executor::{Execution, Executor};
use crate::protocol::Protocol;

/// Language runtime of an external client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientRuntime {
    Java,
    Python,
    NodeJs,
}

impl ClientRuntime {
    pub fn implementation(&self) -> &'static str {
        match self {
            ClientRuntime::Java => "java",
            ClientRuntime::Python => "python",
            ClientRuntime::NodeJs => "nodejs",
        }
    }

    /// Whether the client expects percent-decoded credentials
    pub fn unquotes_credentials(&self) -> bool {
        matches!(self, ClientRuntime::Java)
    }

    pub fn supported_protocols(&self) -> &'static [Protocol] {
        &[Protocol::Amqp10]
    }
}

/// What an external client does when run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientRole {
    Sender,
    Connector,
}

impl fmt::Display for ClientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientRole::Sender => write!(f, "sender"),
            ClientRole::Connector => write!(f, "connector"),
        }
    }
}

/// SSL material handed to a client
///
/// Java clients use the keystore fields, the others the PEM files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslAuth {
    pub pem_file: Option<String>,
    pub key_file: Option<String>,
    pub keystore: Option<String>,
    pub keystore_pass: Option<String>,
    pub keystore_alias: Option<String>,
}

/// A command-line messaging client run through an executor
pub struct ExternalClient<E: Executor> {
    name: String,
    runtime: ClientRuntime,
    role: ClientRole,
    executor: Arc<E>,
    url: Option<BrokerUrl>,
    auth_mechs: Option<String>,
    ssl: Option<SslAuth>,
    message_body: Option<String>,
    options: CommandOptions,
    span: Span,
}

impl<E: Executor> ExternalClient<E> {
    pub fn new(name: impl Into<String>, runtime: ClientRuntime, role: ClientRole, executor: Arc<E>) -> Self {
        let name = name.into();
        let span = info_span!("client", name = %name, runtime = runtime.implementation());
        Self {
            name,
            runtime,
            role,
            executor,
            url: None,
            auth_mechs: None,
            ssl: None,
            message_body: None,
            options: CommandOptions::default(),
            span,
        }
    }

    pub fn sender(name: impl Into<String>, runtime: ClientRuntime, executor: Arc<E>) -> Self {
        Self::new(name, runtime, ClientRole::Sender, executor)
    }

    pub fn connector(name: impl Into<String>, runtime: ClientRuntime, executor: Arc<E>) -> Self {
        Self::new(name, runtime, ClientRole::Connector, executor)
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runtime(&self) -> ClientRuntime {
        self.runtime
    }

    pub fn role(&self) -> ClientRole {
        self.role
    }

    pub fn set_url(&mut self, url: &str) -> HarnessResult<()> {
        self.url = Some(BrokerUrl::parse(url)?);
        Ok(())
    }

    /// SASL mechanisms to offer; ignored by NodeJS clients
    pub fn set_auth_mechs(&mut self, mechs: impl Into<String>) {
        self.auth_mechs = Some(mechs.into());
    }

    pub fn set_ssl_auth(&mut self, ssl: SslAuth) {
        self.ssl = Some(ssl);
    }

    fn program(&self) -> Vec<String> {
        match self.runtime {
            ClientRuntime::Java => vec!["cli-qpid-jms".to_string(), self.role.to_string()],
            ClientRuntime::Python => vec![format!("cli-proton-python-{}", self.role)],
            ClientRuntime::NodeJs => vec![format!("cli-rhea-{}", self.role)],
        }
    }

    /// Full command line for the current settings
    pub fn argv(&self) -> HarnessResult<Vec<String>> {
        let mut argv = self.program();
        let mut flag = |name: &str, value: &str| {
            argv.push(name.to_string());
            argv.push(value.to_string());
        };

        if let Some(url) = &self.url {
            match self.runtime {
                ClientRuntime::Java => {
                    let unquote = self.runtime.unquotes_credentials();
                    flag("--broker", &url.endpoint());
                    if let Some(user) = url.username(unquote)? {
                        flag("--conn-username", &user);
                    }
                    if let Some(password) = url.password(unquote)? {
                        flag("--conn-password", &password);
                    }
                    if self.role == ClientRole::Sender {
                        flag("--address", url.path().trim_start_matches('/'));
                    }
                }
                ClientRuntime::Python => flag("--broker-url", url.as_str()),
                ClientRuntime::NodeJs => {
                    flag("--broker", &url.netloc());
                    let address = url.address();
                    if !address.is_empty() {
                        flag("--address", &address);
                    }
                }
            }
        }

        if let Some(mechs) = &self.auth_mechs {
            match self.runtime {
                ClientRuntime::Java => flag("--conn-auth-mechanisms", mechs),
                ClientRuntime::Python => flag("--conn-allowed-mechs", mechs),
                ClientRuntime::NodeJs => {}
            }
        }

        if let Some(ssl) = &self.ssl {
            match self.runtime {
                ClientRuntime::Java => {
                    if let Some(keystore) = &ssl.keystore {
                        flag("--conn-ssl-keystore-location", keystore);
                    }
                    if let Some(pass) = &ssl.keystore_pass {
                        flag("--conn-ssl-keystore-password", pass);
                    }
                    if let Some(alias) = &ssl.keystore_alias {
                        flag("--conn-ssl-key-alias", alias);
                    }
                    flag("--conn-ssl-verify-host", "false");
                    flag("--conn-ssl-trust-all", "true");
                }
                ClientRuntime::Python | ClientRuntime::NodeJs => {
                    if let Some(pem) = &ssl.pem_file {
                        flag("--conn-ssl-certificate", pem);
                    }
                    if let Some(key) = &ssl.key_file {
                        flag("--conn-ssl-private-key", key);
                    }
                    if self.runtime == ClientRuntime::NodeJs {
                        flag("--conn-ssl", "true");
                    }
                }
            }
        }

        if let Some(body) = &self.message_body {
            flag("--msg-content", body);
        }

        Ok(argv)
    }

    async fn run(&self) -> HarnessResult<Execution> {
        let argv = self.argv()?;
        debug!("Running {}", argv.join(" "));
        let command = E::Command::program(argv, self.options);
        Ok(self.executor.execute(&command).await)
    }

    /// Send one message body
    pub async fn send(&mut self, body: impl Into<String>) -> HarnessResult<Execution> {
        if self.role != ClientRole::Sender {
            return Err(HarnessError::InvalidArgument(format!(
                "{} is a {}, not a sender",
                self.name, self.role
            )));
        }
        self.message_body = Some(body.into());

        let span = self.span.clone();
        async {
            let execution = self.run().await?;
            info!(
                "Sender {} finished: success={}",
                self.name,
                execution.completed_successfully()
            );
            Ok(execution)
        }
        .instrument(span)
        .await
    }

    /// Open a connection to the broker and report whether it succeeded
    pub async fn connect(&self) -> HarnessResult<bool> {
        async {
            let execution = self.run().await?;
            Ok(execution.completed_successfully())
        }
        .instrument(self.span.clone())
        .await
    }
}
