//! Fluent resolution chain layering defaults, file, and environment sources.
//!
//! The chain is strictly linear: the first failing step records its error
//! and every later step becomes a no-op, so `build` surfaces exactly one
//! error and never returns a partially resolved value.

mod duration;
mod env_file;
mod env_map;
mod overlay;


use crate::ConfigError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub use env_map::{EnvBind, EnvField, EnvSlot};

/// Validation hook run once at the end of resolution.
pub trait Validate {
    /// Check record-level invariants, returning a descriptive error on failure.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Generic builder resolving a configuration value from layered sources.
///
/// Sources are applied in call order onto the default value passed to
/// [`ConfigBuilder::new`]; later sources win field by field. Typical order
/// is defaults, then [`load_file`](ConfigBuilder::load_file), then
/// [`with_env`](ConfigBuilder::with_env).
pub struct ConfigBuilder<T> {
    config: T,
    err: Option<ConfigError>,
    env_prefix: String,
    env_files: Vec<String>,
}

impl<T> ConfigBuilder<T>
where
    T: Serialize + DeserializeOwned + EnvBind + Validate,
{
    /// Start a chain from a fully populated default configuration.
    pub fn new(default_config: T) -> Self {
        Self {
            config: default_config,
            err: None,
            env_prefix: String::new(),
            env_files: Vec::new(),
        }
    }

    /// Set the prefix prepended to every bound environment-variable name.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Set the candidate env file names searched in ancestor directories.
    ///
    /// Order matters: within one directory, earlier names win for any key
    /// they both define.
    pub fn env_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Overlay a JSON file onto the current value.
    ///
    /// Only keys present in the document change; everything else keeps its
    /// current value. `None` or an empty path is a no-op.
    pub fn load_file(mut self, path: Option<&Path>) -> Self {
        if self.err.is_some() {
            return self;
        }
        let Some(path) = path.filter(|path| !path.as_os_str().is_empty()) else {
            return self;
        };
        if let Err(err) = overlay::overlay_from_file(&mut self.config, path) {
            self.err = Some(err);
        }
        self
    }

    /// Load ancestor env files, then overlay process environment variables
    /// onto the current value.
    pub fn with_env(mut self) -> Self {
        if self.err.is_some() {
            return self;
        }
        if let Err(err) = env_file::load_env_from_ancestors(&self.env_files) {
            self.err = Some(err);
            return self;
        }
        self.apply_lookup(&|key| std::env::var(key).ok())
    }

    /// Overlay environment values from an injected lookup, skipping env file
    /// discovery. Intended for tests and embedding.
    pub fn with_env_lookup(self, lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        if self.err.is_some() {
            return self;
        }
        self.apply_lookup(lookup)
    }

    fn apply_lookup(mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        if let Err(err) = env_map::apply_env(&mut self.config, &self.env_prefix, lookup) {
            self.err = Some(err);
        }
        self
    }

    /// Validate and return the final configuration, or the first error
    /// recorded anywhere in the chain.
    pub fn build(self) -> Result<T, ConfigError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        self.config.validate()?;
        Ok(self.config)
    }
}
