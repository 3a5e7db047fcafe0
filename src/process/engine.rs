use crate::process::Invocation;
use std::path::Path;

/// Default container tool
pub const DEFAULT_ENGINE: &str = "docker";

/// Builds command lines for a docker-compatible container tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    pub program: String,
}

impl Engine {
    pub fn new(program: impl Into<String>) -> Self {
        Engine {
            program: program.into(),
        }
    }

    /// `<engine> build ARGS... -t TAG CONTEXT`
    pub fn build(&self, working_dir: &Path, args: &[String], tag: &str, context: &str) -> Invocation {
        Invocation::new(self.program.as_str(), working_dir)
            .arg("build")
            .args(args.iter().cloned())
            .args(["-t", tag, context])
    }

    /// `<engine> tag SOURCE TAG`
    pub fn tag(&self, working_dir: &Path, source: &str, tag: &str) -> Invocation {
        Invocation::new(self.program.as_str(), working_dir).args(["tag", source, tag])
    }

    /// `<engine> push ARGS... TAG`
    pub fn push(&self, working_dir: &Path, args: &[String], tag: &str) -> Invocation {
        Invocation::new(self.program.as_str(), working_dir)
            .arg("push")
            .args(args.iter().cloned())
            .arg(tag)
    }

    /// `<engine> save -o FILE TAG`
    pub fn save(&self, working_dir: &Path, file: &str, tag: &str) -> Invocation {
        Invocation::new(self.program.as_str(), working_dir).args(["save", "-o", file, tag])
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(DEFAULT_ENGINE)
    }
}
