//! Subcommand workflows
//!
//! Every workflow follows the same shape: load the config, compute the new
//! version and tag, run at most one container command, then persist. Saving is
//! always the last step so a failure earlier leaves the stored config as it was.
//!
//! Nothing here parses arguments or prints errors; the binary owns that.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigStore, VersionConfig};
use crate::domain::{TagTemplate, Version};
use crate::error::{DoveError, Result};
use crate::process::{CommandRunner, Engine};
use crate::ui;

/// Options for `build`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    /// Version positions to bump before building
    pub positions: Vec<usize>,
    /// Extra arguments passed to `<engine> build`
    pub args: Vec<String>,
    /// Alternate format to tag with
    pub alternate: Option<String>,
    /// Build context, relative to the working directory
    pub context: String,
}

/// Everything a workflow needs, passed in explicitly
#[derive(Debug)]
pub struct Session<R: CommandRunner> {
    pub store: ConfigStore,
    pub engine: Engine,
    pub runner: R,
    pub working_dir: PathBuf,
}

impl<R: CommandRunner> Session<R> {
    pub fn new(store: ConfigStore, engine: Engine, runner: R, working_dir: &Path) -> Self {
        Session {
            store,
            engine,
            runner,
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Write a fresh config, replacing any existing one.
    ///
    /// The template must render with the initial version.
    pub fn init(&self, template: &str, initial: &str) -> Result<VersionConfig> {
        let config = VersionConfig::new(template, Version::parse(initial));
        let tag = config.render(None)?;
        debug!(%tag, "template validated");
        self.store.save(&config)?;
        Ok(config)
    }

    /// Build the image with the current (optionally bumped) tag
    pub fn build(&self, options: &BuildOptions) -> Result<String> {
        let config = self.store.load()?;
        let next = bumped(&config, &options.positions)?;
        let tag = next.render(options.alternate.as_deref())?;

        ui::display_status(&format!("Using tag: [{}]", tag));
        let invocation = self
            .engine
            .build(&self.working_dir, &options.args, &tag, &options.context);
        self.runner.run(&invocation)?;

        self.persist_if_changed(&config, &next)?;
        Ok(tag)
    }

    /// Tag an existing image with the current (optionally bumped) tag
    pub fn tag(&self, source: &str, positions: &[usize], alternate: Option<&str>) -> Result<String> {
        let config = self.store.load()?;
        let next = bumped(&config, positions)?;
        let tag = next.render(alternate)?;

        ui::display_status(&format!("Using tag: [{}]", tag));
        self.runner
            .run(&self.engine.tag(&self.working_dir, source, &tag))?;

        self.persist_if_changed(&config, &next)?;
        Ok(tag)
    }

    /// Push the image carrying the stored tag
    pub fn push(&self, args: &[String], alternate: Option<&str>) -> Result<String> {
        let tag = self.store.load()?.render(alternate)?;
        ui::display_status(&format!("Pushing image: [{}]", tag));
        self.runner
            .run(&self.engine.push(&self.working_dir, args, &tag))?;
        Ok(tag)
    }

    /// Save the image carrying the stored tag to `file`
    pub fn save(&self, file: &str, alternate: Option<&str>) -> Result<String> {
        let tag = self.store.load()?.render(alternate)?;
        ui::display_status(&format!("Saving image: [{}] to {}", tag, file));
        self.runner
            .run(&self.engine.save(&self.working_dir, file, &tag))?;
        Ok(tag)
    }

    /// Current tag, or just the version string when `version_only` is set
    pub fn get(&self, alternate: Option<&str>, version_only: bool) -> Result<String> {
        let config = self.store.load()?;
        if version_only {
            return Ok(config.version.to_string());
        }
        config.render(alternate)
    }

    /// Bump the stored version and return the new tag
    pub fn bump(&self, positions: &[usize], alternate: Option<&str>) -> Result<String> {
        let config = self.store.load()?;
        let next = config.with_version(config.version.bump(positions)?);
        self.commit(next, alternate)
    }

    /// Reset positions of the stored version to `0` and return the new tag
    pub fn reset(&self, positions: &[usize], alternate: Option<&str>) -> Result<String> {
        let config = self.store.load()?;
        let next = config.with_version(config.version.reset(positions)?);
        self.commit(next, alternate)
    }

    pub fn alternates(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.store.load()?.alternate_formats)
    }

    /// Register `format` under `name`, replacing an existing entry.
    ///
    /// Returns the template previously stored under that name, if any.
    pub fn add_alternate(&self, name: &str, format: &str) -> Result<Option<String>> {
        let mut config = self.store.load()?;
        TagTemplate::new(format).render(config.version.components())?;
        let previous = config
            .alternate_formats
            .insert(name.to_string(), format.to_string());
        self.store.save(&config)?;
        Ok(previous)
    }

    /// Remove the alternate `name` and return its template
    pub fn remove_alternate(&self, name: &str) -> Result<String> {
        let mut config = self.store.load()?;
        let removed = config
            .alternate_formats
            .remove(name)
            .ok_or_else(|| DoveError::alternate_not_found(name))?;
        self.store.save(&config)?;
        Ok(removed)
    }

    fn commit(&self, next: VersionConfig, alternate: Option<&str>) -> Result<String> {
        let tag = next.render(alternate)?;
        self.store.save(&next)?;
        Ok(tag)
    }

    fn persist_if_changed(&self, before: &VersionConfig, after: &VersionConfig) -> Result<()> {
        if before != after {
            self.store.save(after)?;
        }
        Ok(())
    }
}

fn bumped(config: &VersionConfig, positions: &[usize]) -> Result<VersionConfig> {
    if positions.is_empty() {
        return Ok(config.clone());
    }
    let version = config.version.bump(positions)?;
    debug!(from = %config.version, to = %version, "bumped version");
    Ok(config.with_version(version))
}
