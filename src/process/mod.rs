//! Subprocess invocation for the container tool
//!
//! Commands are described by an [Invocation] and executed by a [CommandRunner].
//! The concrete implementations are:
//!
//! - [system::SystemRunner]: spawns the real program and waits for it
//! - [mock::RecordingRunner]: records invocations for tests without spawning anything

pub mod engine;
pub mod mock;
pub mod system;

pub use engine::Engine;
pub use mock::RecordingRunner;
pub use system::SystemRunner;

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// A program, its arguments and the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, working_dir: &Path) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an [Invocation] to completion.
///
/// Implementations must block until the command finishes and map a spawn
/// failure or a non-zero exit to [crate::error::DoveError::ProcessFailure].
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("docker", Path::new("/work"))
            .arg("push")
            .args(["--quiet", "app:1.0.0"]);
        assert_eq!(inv.to_string(), "docker push --quiet app:1.0.0");
        assert_eq!(inv.working_dir, PathBuf::from("/work"));
    }
}
