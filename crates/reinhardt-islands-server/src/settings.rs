//! Server settings.
//!
//! Settings come from a TOML document or from the environment:
//!
//! ```toml
//! mode = "production"
//! default_location = "/"
//! ```
//!
//! The runtime mode follows the `REINHARDT_ENV` profile variable. Only an
//! explicit production profile disables per-resolution cache eviction.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Environment variable selecting the runtime profile.
pub const ENV_VAR: &str = "REINHARDT_ENV";

/// Runtime mode controlling component cache freshness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RuntimeMode {
	/// Every resolution evicts and reloads the component module.
	#[default]
	Development,
	/// Resolutions reuse the cached module for the process lifetime.
	Production,
}

impl RuntimeMode {
	/// Parses a profile name. Anything other than `production`/`prod` is development.
	pub fn parse(value: &str) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"production" | "prod" => Self::Production,
			_ => Self::Development,
		}
	}

	/// Reads the mode from `REINHARDT_ENV`, defaulting to development.
	pub fn from_env() -> Self {
		env::var(ENV_VAR)
			.map(|value| Self::parse(&value))
			.unwrap_or_default()
	}

	/// Returns `true` if resolutions must evict cached modules first.
	pub fn evicts_on_resolve(self) -> bool {
		self == Self::Development
	}
}

impl From<String> for RuntimeMode {
	fn from(value: String) -> Self {
		Self::parse(&value)
	}
}

/// Settings for the server renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	/// Runtime mode.
	pub mode: RuntimeMode,
	/// Location used by routed renders that do not supply one.
	pub default_location: String,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			mode: RuntimeMode::default(),
			default_location: "/".to_string(),
		}
	}
}

impl ServerSettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the runtime mode.
	pub fn mode(mut self, mode: RuntimeMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the default routing location.
	pub fn default_location(mut self, location: impl Into<String>) -> Self {
		self.default_location = location.into();
		self
	}

	/// Reads settings from the environment.
	pub fn from_env() -> Self {
		Self::default().mode(RuntimeMode::from_env())
	}

	/// Parses settings from a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}
}
