//! Client settings.

use reinhardt_islands_core::DEFAULT_ROOT_ELEMENT_ID;
use serde::{Deserialize, Serialize};

/// Settings for the client reviver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
	/// Element id used by root revival when none is given.
	pub root_element_id: String,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			root_element_id: DEFAULT_ROOT_ELEMENT_ID.to_string(),
		}
	}
}

impl ClientSettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the default root element id.
	pub fn root_element_id(mut self, id: impl Into<String>) -> Self {
		self.root_element_id = id.into();
		self
	}

	/// Parses settings from a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(source)
	}
}
