use crate::error::{DoveError, Result};
use crate::process::{CommandRunner, Invocation};
use std::process::Command;
use tracing::debug;

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    /// Spawn the program in the invocation's working directory and wait for it.
    ///
    /// # Returns
    /// * `Ok(())` if the command exits with code 0
    /// * `Err` if the program cannot be started or exits unsuccessfully
    fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!(
            command = %invocation,
            cwd = %invocation.working_dir.display(),
            "spawning command"
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()
            .map_err(|e| {
                DoveError::process(invocation.to_string(), format!("failed to start: {}", e), None)
            })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(DoveError::process(
                invocation.to_string(),
                reason,
                status.code(),
            ));
        }

        Ok(())
    }
}
