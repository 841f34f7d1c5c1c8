//! LOVE runtime launcher backed by a child process.

use std::process::{Command, Stdio};

use gamehub_hub_games::{GameRuntime, GamesError, LaunchTarget};

/// Spawns `command [args…] [game path]`, detached from the hub.
#[derive(Debug, Clone)]
pub struct ProcessRuntime {
    command: String,
    args: Vec<String>,
}

impl ProcessRuntime {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    fn command_for(&self, target: &LaunchTarget) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        if let LaunchTarget::Game(entry) = target {
            cmd.arg(entry.path());
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl GameRuntime for ProcessRuntime {
    fn launch(&self, target: &LaunchTarget) -> Result<(), GamesError> {
        let child = self
            .command_for(target)
            .spawn()
            .map_err(|e| GamesError::Runtime(format!("{}: {e}", self.command)))?;

        tracing::info!(
            command = %self.command,
            target = %target,
            pid = ?child.id(),
            "runtime started"
        );
        Ok(())
    }
}
