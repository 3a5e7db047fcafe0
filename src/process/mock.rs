use crate::error::{DoveError, Result};
use crate::process::{CommandRunner, Invocation};
use std::sync::Mutex;

/// Command runner that records invocations instead of spawning them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner where every command exits with `code`
    pub fn failing(code: i32) -> Self {
        RecordingRunner {
            invocations: Mutex::new(Vec::new()),
            exit_code: Some(code),
        }
    }

    /// All invocations seen so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        if let Ok(mut seen) = self.invocations.lock() {
            seen.push(invocation.clone());
        }
        match self.exit_code {
            Some(code) => Err(DoveError::process(
                invocation.to_string(),
                format!("exited with code {}", code),
                Some(code),
            )),
            None => Ok(()),
        }
    }
}
