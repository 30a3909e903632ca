//! The structured result of a server render.
//!
//! Every server entry point returns a [`RenderResult`] instead of raising, so
//! the HTTP layer always has something to turn into a page or an error page.
//! On the wire a result keeps the shape
//!
//! ```json
//! {"markup": "<div>…</div>", "componentName": "Greeting", "error": null}
//! {"markup": null, "componentName": null, "error": {"type": "TypeError", "message": "…", "stack": "…"}}
//! ```
//!
//! and deserialization rejects values that carry both or neither of
//! `markup` and `error`.

use serde::{Deserialize, Serialize};

use crate::error::InvalidRenderResult;
use crate::fault::Fault;
use crate::props::Props;

/// The original request, attached to errors from the non-routed render path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderArgs {
	/// The requested component path.
	pub component_path: String,
	/// The requested props.
	pub props: Props,
}

/// Diagnostic information about a failed render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
	/// The concrete kind of the failure.
	#[serde(rename = "type")]
	pub kind: String,
	/// The failure message.
	pub message: String,
	/// The captured stack trace.
	pub stack: String,
	/// The original request, when the render path reports it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<RenderArgs>,
}

impl ErrorInfo {
	/// Creates error information from a captured fault.
	pub fn from_fault(fault: &Fault) -> Self {
		Self {
			kind: fault.kind().to_string(),
			message: fault.message().to_string(),
			stack: fault.stack().to_string(),
			args: None,
		}
	}

	/// Attaches the original request.
	pub fn with_args(mut self, args: RenderArgs) -> Self {
		self.args = Some(args);
		self
	}
}

impl From<Fault> for ErrorInfo {
	fn from(fault: Fault) -> Self {
		Self::from_fault(&fault)
	}
}

/// Outcome of a server render: markup or an error, never both, never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RenderResultWire", try_from = "RenderResultWire")]
pub enum RenderResult {
	/// The component rendered.
	Success {
		/// The rendered markup.
		markup: String,
		/// The component's declared name.
		component_name: String,
	},
	/// The render failed.
	Failure {
		/// What went wrong.
		error: ErrorInfo,
	},
}

impl RenderResult {
	/// Creates a successful result.
	pub fn success(markup: impl Into<String>, component_name: impl Into<String>) -> Self {
		Self::Success {
			markup: markup.into(),
			component_name: component_name.into(),
		}
	}

	/// Creates a failed result.
	pub fn failure(error: ErrorInfo) -> Self {
		Self::Failure { error }
	}

	/// Returns `true` if the render succeeded.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// The rendered markup, if any.
	pub fn markup(&self) -> Option<&str> {
		match self {
			Self::Success { markup, .. } => Some(markup),
			Self::Failure { .. } => None,
		}
	}

	/// The declared component name, if the render succeeded.
	pub fn component_name(&self) -> Option<&str> {
		match self {
			Self::Success { component_name, .. } => Some(component_name),
			Self::Failure { .. } => None,
		}
	}

	/// The error, if the render failed.
	pub fn error(&self) -> Option<&ErrorInfo> {
		match self {
			Self::Success { .. } => None,
			Self::Failure { error } => Some(error),
		}
	}

	/// Transforms the markup of a successful result; failures pass through.
	pub fn map_markup<F>(self, f: F) -> Self
	where
		F: FnOnce(String) -> String,
	{
		match self {
			Self::Success {
				markup,
				component_name,
			} => Self::Success {
				markup: f(markup),
				component_name,
			},
			failure => failure,
		}
	}
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderResultWire {
	markup: Option<String>,
	component_name: Option<String>,
	error: Option<ErrorInfo>,
}

impl From<RenderResult> for RenderResultWire {
	fn from(result: RenderResult) -> Self {
		match result {
			RenderResult::Success {
				markup,
				component_name,
			} => Self {
				markup: Some(markup),
				component_name: Some(component_name),
				error: None,
			},
			RenderResult::Failure { error } => Self {
				markup: None,
				component_name: None,
				error: Some(error),
			},
		}
	}
}

impl TryFrom<RenderResultWire> for RenderResult {
	type Error = InvalidRenderResult;

	fn try_from(wire: RenderResultWire) -> Result<Self, Self::Error> {
		match (wire.markup, wire.error) {
			(Some(markup), None) => Ok(Self::Success {
				markup,
				component_name: wire.component_name.unwrap_or_default(),
			}),
			(None, Some(error)) => Ok(Self::Failure { error }),
			(Some(_), Some(_)) => Err(InvalidRenderResult::Both),
			(None, None) => Err(InvalidRenderResult::Neither),
		}
	}
}
