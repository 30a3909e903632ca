//! Server-side error types.
//!
//! None of these ever cross the render boundary: [`ServerRenderer`] converts
//! them into an [`ErrorInfo`] inside a failed [`RenderResult`].
//!
//! [`ServerRenderer`]: crate::renderer::ServerRenderer
//! [`RenderResult`]: reinhardt_islands_core::RenderResult

use reinhardt_islands_core::{ErrorInfo, Fault, PayloadError};
use thiserror::Error;

/// Kind reported for component identifiers that cannot be resolved.
pub const RESOLUTION_ERROR_KIND: &str = "ResolutionError";

/// Kind reported when props cannot be encoded into a marker payload.
pub const PAYLOAD_ERROR_KIND: &str = "PayloadError";

/// Result type for resolution operations.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// A component identifier could not be turned into a component definition.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolutionError {
	/// The identifier is empty or escapes the component root.
	#[error("invalid component identifier '{identifier}': {reason}")]
	InvalidIdentifier {
		/// The identifier as given.
		identifier: String,
		/// Why it was rejected.
		reason: &'static str,
	},

	/// No module is registered for the identifier.
	#[error("cannot find component module '{0}'")]
	NotFound(String),

	/// The module exports neither a component nor a default component.
	#[error("component module '{identifier}' has no default export (exports: [{}])", .exports.join(", "))]
	MissingDefaultExport {
		/// The canonical identifier.
		identifier: String,
		/// The names the module does export.
		exports: Vec<String>,
	},

	/// Evaluating the module failed.
	#[error("failed to load component module '{identifier}': {fault}")]
	LoadFailed {
		/// The canonical identifier.
		identifier: String,
		/// The fault raised while loading.
		#[source]
		fault: Fault,
	},
}

impl ResolutionError {
	/// The kind reported in [`ErrorInfo::kind`].
	///
	/// Load failures report the kind of the underlying fault; everything else
	/// reports [`RESOLUTION_ERROR_KIND`].
	pub fn kind(&self) -> &str {
		match self {
			Self::LoadFailed { fault, .. } => fault.kind(),
			_ => RESOLUTION_ERROR_KIND,
		}
	}
}

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The settings file is not valid TOML for [`ServerSettings`].
	///
	/// [`ServerSettings`]: crate::settings::ServerSettings
	#[error("TOML parse error: {0}")]
	TomlParse(#[from] toml::de::Error),
}

/// Anything that can go wrong inside the render boundary.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
	#[error(transparent)]
	Resolution(#[from] ResolutionError),

	#[error(transparent)]
	Render(#[from] Fault),

	#[error(transparent)]
	Payload(#[from] PayloadError),
}

impl RenderError {
	pub(crate) fn kind(&self) -> &str {
		match self {
			Self::Resolution(err) => err.kind(),
			Self::Render(fault) => fault.kind(),
			Self::Payload(_) => PAYLOAD_ERROR_KIND,
		}
	}

	pub(crate) fn into_error_info(self) -> ErrorInfo {
		match self {
			Self::Resolution(ResolutionError::LoadFailed { fault, .. }) | Self::Render(fault) => {
				ErrorInfo::from_fault(&fault)
			}
			Self::Resolution(err) => {
				ErrorInfo::from_fault(&Fault::new(RESOLUTION_ERROR_KIND, err.to_string()))
			}
			Self::Payload(err) => ErrorInfo::from_fault(&Fault::new(PAYLOAD_ERROR_KIND, err.to_string())),
		}
	}
}
