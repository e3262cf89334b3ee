// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Descriptors
//!
//! A command is an immutable description of an invocable operation plus its
//! execution parameters. Commands come in two encodings, one per executor
//! kind:
//!
//! ```text
//! Direct        → ArgvCommand   ["service", "qdrouterd", "start"]
//! Orchestrated  → ModuleCommand ("service", "name=qdrouterd state=started")
//! ```
//!
//! Each [`Executor`](crate::executor::Executor) names the encoding it accepts
//! as an associated type, so pairing a command with the wrong backend does
//! not compile. Code that needs to build commands for an unknown executor
//! goes through [`CommandEncoding`], the factory keyed on the same tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::executor::ExecutorKind;
use crate::service::ServiceSystemState;

/// Default command timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Execution parameters shared by every command encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOptions {
    /// Capture standard output
    pub stdout: bool,

    /// Capture standard error
    pub stderr: bool,

    /// Leave the process running independently of the harness
    pub daemon: bool,

    /// Upper bound on how long execution may block
    pub timeout: Duration,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            stdout: true,
            stderr: true,
            daemon: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CommandOptions {
    /// Capture stdout only, with the given timeout
    pub fn stdout_only(timeout: Duration) -> Self {
        Self {
            stdout: true,
            stderr: false,
            daemon: false,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn daemonized(mut self) -> Self {
        self.daemon = true;
        self
    }
}

/// Factory for commands of one encoding
///
/// Implemented by each concrete command type; the associated `KIND` ties the
/// encoding to the executor kind that accepts it.
pub trait CommandEncoding: fmt::Debug + Clone + Send + Sync + Sized {
    /// Executor kind this encoding belongs to
    const KIND: ExecutorKind;

    /// Encode a plain program invocation
    fn program(argv: Vec<String>, options: CommandOptions) -> Self;

    /// Encode a service state change for a system service manager
    fn service_state(service: &str, state: ServiceSystemState, options: CommandOptions) -> Self;

    /// Execution parameters of this command
    fn options(&self) -> &CommandOptions;
}

/// Argument-vector command for direct execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgvCommand {
    pub argv: Vec<String>,
    pub options: CommandOptions,
}

impl ArgvCommand {
    pub fn new<I, S>(argv: I, options: CommandOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Program name (first element of the vector)
    pub fn program_name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments following the program name
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }
}

impl CommandEncoding for ArgvCommand {
    const KIND: ExecutorKind = ExecutorKind::Direct;

    fn program(argv: Vec<String>, options: CommandOptions) -> Self {
        Self { argv, options }
    }

    fn service_state(service: &str, state: ServiceSystemState, options: CommandOptions) -> Self {
        Self::new(["service", service, state.label(Self::KIND)], options)
    }

    fn options(&self) -> &CommandOptions {
        &self.options
    }
}

impl fmt::Display for ArgvCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Quote an argument so a POSIX shell or shlex splitter sees one word
pub(crate) fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| {
                c.is_ascii_alphanumeric()
                    || matches!(c, '-' | '_' | '.' | '/' | '=' | ':' | ',' | '@' | '%' | '+')
            });
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Orchestration-module command (module name plus parameter string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCommand {
    pub module: String,
    pub params: String,
    pub options: CommandOptions,
}

impl ModuleCommand {
    /// Module used to run arbitrary programs on the target host
    pub const COMMAND_MODULE: &'static str = "command";

    /// Module used to drive system services
    pub const SERVICE_MODULE: &'static str = "service";

    pub fn new(module: impl Into<String>, params: impl Into<String>, options: CommandOptions) -> Self {
        Self {
            module: module.into(),
            params: params.into(),
            options,
        }
    }
}

impl CommandEncoding for ModuleCommand {
    const KIND: ExecutorKind = ExecutorKind::Orchestrated;

    fn program(argv: Vec<String>, options: CommandOptions) -> Self {
        let params = argv
            .iter()
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(Self::COMMAND_MODULE, params, options)
    }

    fn service_state(service: &str, state: ServiceSystemState, options: CommandOptions) -> Self {
        Self::new(
            Self::SERVICE_MODULE,
            format!("name={} state={}", service, state.label(Self::KIND)),
            options,
        )
    }

    fn options(&self) -> &CommandOptions {
        &self.options
    }
}

impl fmt::Display for ModuleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-m {} -a '{}'", self.module, self.params)
    }
}
