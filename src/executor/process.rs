// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared process runner for process-backed executors

use chrono::Utc;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::Execution;
use crate::command::CommandOptions;

fn stdio_for(capture: bool) -> Stdio {
    if capture {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

/// Run an argument vector as a child process honoring capture, daemon and
/// timeout options
pub(crate) async fn run_process(argv: &[String], options: &CommandOptions) -> Execution {
    let started_at = Utc::now();
    let clock = Instant::now();

    let Some((program, args)) = argv.split_first() else {
        return Execution::failed(started_at, clock.elapsed(), "empty argument vector".into());
    };

    // Daemons outlive the harness, so their streams are never piped.
    let capture_stdout = options.stdout && !options.daemon;
    let capture_stderr = options.stderr && !options.daemon;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(stdio_for(capture_stdout))
        .stderr(stdio_for(capture_stderr))
        .kill_on_drop(!options.daemon);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!("Unable to spawn {}: {}", program, e);
            return Execution::failed(
                started_at,
                clock.elapsed(),
                format!("failed to spawn {}: {}", program, e),
            );
        }
    };

    if options.daemon {
        debug!("Spawned daemon {} (pid {:?})", program, child.id());
        return Execution::spawned(started_at, clock.elapsed());
    }

    match tokio::time::timeout(options.timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let execution = Execution::finished(
                started_at,
                clock.elapsed(),
                output.status.code(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            );
            debug!(
                "Executed {} (id {}) exit code {:?} in {:?}",
                program,
                execution.id(),
                execution.exit_code(),
                execution.elapsed()
            );
            execution
        }
        Ok(Err(e)) => Execution::failed(
            started_at,
            clock.elapsed(),
            format!("failed waiting for {}: {}", program, e),
        ),
        Err(_) => {
            // Dropping the wait future kills the child (kill_on_drop).
            warn!("{} exceeded timeout of {:?}", program, options.timeout);
            Execution::timed_out(started_at, clock.elapsed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_argv_fails() {
        let execution = run_process(&[], &CommandOptions::default()).await;
        assert!(!execution.completed_successfully());
        assert!(execution.read_stderr().contains("empty"));
    }

    #[tokio::test]
    async fn test_missing_program_is_reported_not_raised() {
        let execution = run_process(
            &argv(&["definitely-not-a-real-program-4242"]),
            &CommandOptions::default(),
        )
        .await;

        assert!(!execution.completed_successfully());
        assert!(execution.read_stderr().contains("failed to spawn"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let execution = run_process(&argv(&["echo", "hello"]), &CommandOptions::default()).await;

        assert!(execution.completed_successfully());
        assert_eq!(execution.read_stdout().trim(), "hello");
        assert_eq!(execution.exit_code(), Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_uncaptured_stdout_is_empty() {
        let options = CommandOptions {
            stdout: false,
            ..CommandOptions::default()
        };
        let execution = run_process(&argv(&["echo", "hello"]), &options).await;

        assert!(execution.completed_successfully());
        assert!(execution.read_stdout().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_yields_unsuccessful_execution() {
        let options = CommandOptions::default().with_timeout(Duration::from_millis(100));
        let execution = run_process(&argv(&["sleep", "5"]), &options).await;

        assert!(!execution.completed_successfully());
        assert!(execution.is_timed_out());
    }
}
