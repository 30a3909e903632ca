//! Protocol error types.

use thiserror::Error;

/// Errors raised while encoding or decoding a props payload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PayloadError {
	/// The payload attribute is absent from the element.
	#[error("props payload attribute is absent")]
	Missing,

	/// The payload is not valid JSON.
	#[error("malformed props payload: {0}")]
	Malformed(#[source] serde_json::Error),

	/// The payload is valid JSON but not an object.
	#[error("props payload must be a JSON object, found {0}")]
	NotAnObject(&'static str),

	/// The props could not be serialized.
	#[error("failed to serialize props payload: {0}")]
	Serialize(#[source] serde_json::Error),
}

/// A wire-level render result that breaks the markup/error pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRenderResult {
	/// Both `markup` and `error` were present.
	#[error("render result carries both markup and an error")]
	Both,

	/// Neither `markup` nor `error` was present.
	#[error("render result carries neither markup nor an error")]
	Neither,
}
