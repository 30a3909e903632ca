//! Props payloads.
//!
//! Props travel from the server to the client as a JSON object serialized
//! into the `data-props` attribute. Only plain JSON data is representable, so
//! a payload always round-trips without loss.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// A JSON object of component props.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
	/// Creates empty props.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a prop, returning the updated props.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	/// Inserts a prop, returning the previous value for the key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Gets a prop by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Returns the number of props.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` if there are no props.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Consumes the props, returning the underlying JSON object.
	pub fn into_inner(self) -> Map<String, Value> {
		self.0
	}

	/// Deserializes the props into a typed struct.
	pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		serde_json::from_value(Value::Object(self.0.clone()))
	}

	/// Serializes the props into the payload carried by `data-props`.
	pub fn to_payload(&self) -> Result<String, PayloadError> {
		serde_json::to_string(&self.0).map_err(PayloadError::Serialize)
	}

	/// Parses a `data-props` payload.
	///
	/// A `null` payload yields empty props; any other non-object value is rejected.
	pub fn from_payload(payload: &str) -> Result<Self, PayloadError> {
		let value: Value = serde_json::from_str(payload).map_err(PayloadError::Malformed)?;
		Self::try_from(value)
	}
}

impl From<Map<String, Value>> for Props {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

impl TryFrom<Value> for Props {
	type Error = PayloadError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			Value::Null => Ok(Self::new()),
			Value::Bool(_) => Err(PayloadError::NotAnObject("boolean")),
			Value::Number(_) => Err(PayloadError::NotAnObject("number")),
			Value::String(_) => Err(PayloadError::NotAnObject("string")),
			Value::Array(_) => Err(PayloadError::NotAnObject("array")),
		}
	}
}

impl From<Props> for Value {
	fn from(props: Props) -> Self {
		Value::Object(props.0)
	}
}
