// nmcli abstraction layer
// All knowledge of nmcli's terse output format lives under this module

use async_trait::async_trait;
use log::{debug, info};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

use crate::config::Config;
use crate::error::{Error, Result};

pub mod types;
pub mod wifi;

#[cfg(test)]
pub(crate) mod testing;

pub use types::*;

/// Raw result of a finished child process
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput>;
}

/// Spawns real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the future on timeout must not leave nmcli behind
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Main NetworkManager client, talking to nmcli
#[derive(Clone)]
pub struct NMClient {
    runner: Arc<dyn CommandRunner>,
    program: String,
    timeout: Duration,
}

impl NMClient {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        program: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            timeout,
        }
    }

    /// Create a client that spawns the nmcli binary named in the config
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ProcessRunner),
            config.nmcli_path.clone(),
            config.command_timeout(),
        )
    }

    /// Run nmcli and return its cleaned stdout.
    ///
    /// With `fields`, nmcli is asked for terse output restricted to those
    /// fields (`-t -f a,b,c`), which is what every parser in [`wifi`]
    /// expects. nmcli escapes colons inside values with a backslash; all
    /// backslashes are removed so values like BSSIDs come back verbatim.
    pub async fn nmcli(&self, args: &[&str], fields: Option<&[&str]>) -> Result<String> {
        let mut command: Vec<String> = Vec::with_capacity(args.len() + 3);
        if let Some(fields) = fields.filter(|f| !f.is_empty()) {
            command.push("-t".to_string());
            command.push("-f".to_string());
            command.push(fields.join(","));
        }
        command.extend(args.iter().map(|arg| arg.to_string()));

        let command_line = format!("{} {}", self.program, command.join(" "));
        info!("> {}", command_line);

        let run = self.runner.run(&self.program, &command);
        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(output) => output?,
            Err(_) => {
                return Err(Error::Timeout {
                    command: command_line,
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.success {
            return Err(Error::Execution(output.stderr.trim().to_string()));
        }

        let text = clean_output(&output.stdout);
        debug!("{}", text);
        Ok(text)
    }
}

fn clean_output(raw: &str) -> String {
    raw.trim().replace('\\', "")
}
