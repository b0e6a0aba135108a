/// Failures surfaced by builders and the JSON import boundary.
///
/// Range clamping and the projector's generic-Object fallback are documented
/// defaults, not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A value fails a type or shape check, such as an array handed to a
	/// functional property or a bare number on an object property.
	#[error("invalid type: {0}")]
	InvalidType(&'static str),

	/// Domain validation failure on an otherwise well-typed value.
	#[error("invalid value: {0}")]
	InvalidValue(String),

	/// A builder call contradicts earlier calls on the same builder, such as
	/// mixing ordered and unordered collection items.
	#[error("state conflict: {0}")]
	StateConflict(&'static str),

	/// The input document could not be interpreted as an Activity Streams
	/// JSON object.
	#[error("import failed: {0}")]
	Import(String),
}

pub type Result<T> = std::result::Result<T, Error>;
