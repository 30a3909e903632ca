//! Client revival errors.
//!
//! Unlike server faults, these are never swallowed: a malformed or mismatched
//! page means the server and client builds disagree, and revival stops at the
//! first problem.

use reinhardt_islands_core::{Fault, PayloadError};
use thiserror::Error;

/// Result type for revival operations.
pub type ReviveResult<T> = Result<T, ReviveError>;

/// Errors raised while reviving server-rendered markup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReviveError {
	/// A flagged element's props payload could not be parsed.
	#[error("failed to parse props payload of {element}: {source}")]
	PayloadParse {
		/// Description of the offending element.
		element: String,
		/// The underlying payload error.
		#[source]
		source: PayloadError,
	},

	/// The component mapper has no entry for an identifier.
	#[error("unknown component '{0}'")]
	UnknownComponent(String),

	/// The named root element is absent from the document.
	#[error("root element '#{0}' not found")]
	RootNotFound(String),

	/// A flagged element carries no component identifier.
	#[error("{0} is flagged as server-rendered but has no data-component attribute")]
	MissingIdentifier(String),

	/// The hydration collaborator failed.
	#[error("hydration of '{component}' failed: {fault}")]
	Hydration {
		/// The component being revived.
		component: String,
		/// The fault raised by the collaborator.
		#[source]
		fault: Fault,
	},
}
