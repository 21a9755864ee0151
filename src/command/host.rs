//! Operating-system seam for the executor
//!
//! Everything that touches the host (processes, the default browser, the
//! power state) goes through `Host`, so the dispatch rules can be exercised
//! without launching anything.

use std::process::{Command, Stdio};
use std::thread;

use crate::command::platform::LaunchCommand;
use crate::core::error::{NovaError, Result};

pub trait Host: Send + Sync {
    /// Start a process and return without waiting for it
    fn spawn_detached(&self, command: &LaunchCommand) -> Result<()>;

    /// Open `url` in the default external viewer
    fn open_url(&self, url: &str) -> Result<()>;

    /// Run a command to completion
    fn run_blocking(&self, command: &LaunchCommand) -> Result<()>;
}

/// Performs real side effects on this machine
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn spawn_detached(&self, command: &LaunchCommand) -> Result<()> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| NovaError::ExternalLaunch(format!("{}: {}", command, e)))?;

        // Reaped on a side thread; the exit status is only logged.
        let label = command.to_string();
        let reaper = thread::Builder::new()
            .name("nova-reaper".into())
            .spawn(move || match child.wait() {
                Ok(status) if !status.success() => {
                    tracing::warn!("{} exited with {}", label, status);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Could not wait on {}: {}", label, e),
            });
        if let Err(e) = reaper {
            tracing::debug!("No reaper thread for {}: {}", command, e);
        }

        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        webbrowser::open(url)
            .map_err(|e| NovaError::ExternalLaunch(format!("open {}: {}", url, e)))
    }

    fn run_blocking(&self, command: &LaunchCommand) -> Result<()> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|e| NovaError::ExternalLaunch(format!("{}: {}", command, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(NovaError::ExternalLaunch(format!(
                "{} exited with {}",
                command, status
            )))
        }
    }
}

/// Logs what would happen and does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunHost;

impl Host for DryRunHost {
    fn spawn_detached(&self, command: &LaunchCommand) -> Result<()> {
        tracing::info!("[dry-run] would spawn: {}", command);
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::info!("[dry-run] would open: {}", url);
        Ok(())
    }

    fn run_blocking(&self, command: &LaunchCommand) -> Result<()> {
        tracing::info!("[dry-run] would run: {}", command);
        Ok(())
    }
}
