//! Invocation of the external `nockchain-wallet` binary.
//!
//! The tool is a black box: one call in, raw stdout out. Failure is a hard
//! `WalletError::Gateway` (missing binary, non-zero exit, timeout) or
//! `WalletError::Internal` for spawn errors that fit no category; neither
//! is retried here.

use std::io::ErrorKind;
use std::time::Duration;

use tokio::process::Command;

use crate::error::WalletError;

#[derive(Clone, Debug)]
pub struct CommandGateway {
    binary: String,
    timeout: Duration,
}

impl CommandGateway {
    pub fn new(binary: String, timeout: Duration) -> Self {
        Self { binary, timeout }
    }

    /// Run the wallet binary with the given arguments and return trimmed
    /// stdout. Stderr is captured and carried inside the error on a
    /// non-zero exit.
    pub async fn run(&self, args: &[&str]) -> Result<String, WalletError> {
        log::debug!("Running: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Err(_) => {
                return Err(WalletError::Gateway(format!(
                    "Command timed out after {} seconds: {} {}",
                    self.timeout.as_secs(),
                    self.binary,
                    args.join(" ")
                )))
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(WalletError::Gateway(format!(
                    "{} not found. Please ensure it's installed and in your PATH.",
                    self.binary
                )))
            }
            Ok(Err(e)) => {
                return Err(WalletError::Internal(format!(
                    "Unexpected error running {}: {}",
                    self.binary, e
                )))
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WalletError::Gateway(format!(
                "Command failed: {} {}\nError: {}",
                self.binary,
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
