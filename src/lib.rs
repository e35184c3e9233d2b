//! Layered configuration resolution for Fulcrum services.
//!
//! Resolves a strongly-typed configuration value by layering four sources,
//! lowest precedence first: compiled-in defaults, an optional JSON file,
//! dotenv files discovered in ancestor directories, and process environment
//! variables. The result is validated once before it is returned.
//!
//! ```no_run
//! use fulcrum_config::{ConfigBuilder, ConfigError, EnvBind, EnvField, EnvSlot, Validate};
//! use serde::{Deserialize, Serialize};
//! use std::path::Path;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct AppConfig {
//!     name: String,
//!     port: u16,
//! }
//!
//! impl EnvBind for AppConfig {
//!     fn env_fields(&mut self) -> Vec<EnvField<'_>> {
//!         vec![
//!             EnvField::bound("name", "NAME", EnvSlot::String(&mut self.name)),
//!             EnvField::bound("port", "PORT", EnvSlot::U16(&mut self.port)),
//!         ]
//!     }
//! }
//!
//! impl Validate for AppConfig {
//!     fn validate(&self) -> Result<(), ConfigError> {
//!         if self.name.is_empty() {
//!             return Err(ConfigError::Invalid("name cannot be empty".to_string()));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let config = ConfigBuilder::new(AppConfig { name: "app".to_string(), port: 8080 })
//!     .env_prefix("APP_")
//!     .env_files([".env"])
//!     .load_file(Some(Path::new("config.json")))
//!     .with_env()
//!     .build()?;
//! # Ok::<(), ConfigError>(())
//! ```

mod builder;
mod error;
mod model;

/// Resolution chain, environment binding seams, and the validation hook.
pub use builder::{ConfigBuilder, EnvBind, EnvField, EnvSlot, Validate};
/// Public error type returned by config resolution and validation APIs.
pub use error::ConfigError;
/// Ready-made configuration sections shared by Fulcrum services.
pub use model::*;
