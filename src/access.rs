use std::fmt;

use thiserror::Error;

/// Classification tag of a single host value.
///
/// Exactly one tag applies to a value at a given instant. Classification is
/// read fresh at every decision point and never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
	/// The runtime `undefined` value.
	Undefined,
	/// The runtime `null` value.
	Null,
	/// A boolean primitive.
	Boolean,
	/// A double-precision number primitive.
	Number,
	/// A string primitive.
	String,
	/// A plain object with named properties.
	Object,
	/// An array object with indexed elements.
	Array,
	/// A callable function object.
	Function,
	/// A symbol primitive.
	Symbol,
	/// An arbitrary-precision integer primitive.
	Bigint,
	/// A host-opaque wrapped value.
	External,
}

impl ValueType {
	/// Short lowercase tag name used in diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Boolean => "boolean",
			Self::Number => "number",
			Self::String => "string",
			Self::Object => "object",
			Self::Array => "array",
			Self::Function => "function",
			Self::Symbol => "symbol",
			Self::Bigint => "bigint",
			Self::External => "external",
		}
	}

	/// Whether this tag counts as nil.
	///
	/// One uniform policy across all container kinds: both `null` and
	/// `undefined` are nil.
	pub fn is_nil(self) -> bool {
		matches!(self, Self::Null | Self::Undefined)
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Fault reported by a value access layer call.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HostError {
	/// Host-provided failure description.
	pub message: String,
}

impl HostError {
	/// Host error with the given failure description.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

/// Read primitives over an opaque host value graph.
///
/// Implementations bind an environment handle and expose classification,
/// structural reads, and scalar conversions over borrowed value handles.
/// Handles are only valid for the duration of the decode call that produced
/// them; the decode machinery never stores one past that call.
///
/// Every method may fail with a propagated host fault; callers must not
/// assume success.
pub trait ValueAccess {
	/// Opaque borrowed handle to one node of the value graph.
	type Value: Copy;

	/// Classify a value into exactly one type tag.
	fn classify(&self, value: Self::Value) -> Result<ValueType, HostError>;

	/// Own-property name handles of an object, in insertion order.
	fn property_names(&self, object: Self::Value) -> Result<Vec<Self::Value>, HostError>;

	/// Whether `object` has `name` as an own property, regardless of whether
	/// its value is null or undefined.
	fn has_named_property(&self, object: Self::Value, name: &str) -> Result<bool, HostError>;

	/// Value of a named property.
	///
	/// Absence is not an error: an absent name yields the runtime's
	/// `undefined` value.
	fn named_property(&self, object: Self::Value, name: &str) -> Result<Self::Value, HostError>;

	/// Element of an array-shaped value at a zero-based index.
	fn element(&self, array: Self::Value, index: usize) -> Result<Self::Value, HostError>;

	/// Element count of an array-shaped value.
	///
	/// Fails when the value has no usable length; the sequential container
	/// treats that as a count of zero.
	fn length(&self, array: Self::Value) -> Result<usize, HostError>;

	/// Runtime ToNumber coercion.
	///
	/// Numeric-literal strings parse, booleans become 0/1, null becomes 0.
	/// A non-coercible value either fails or yields NaN, matching the
	/// runtime's own conversion.
	fn coerce_to_number(&self, value: Self::Value) -> Result<f64, HostError>;

	/// Strict boolean extraction; fails unless the value is boolean-typed.
	fn as_boolean(&self, value: Self::Value) -> Result<bool, HostError>;

	/// Strict string extraction; fails unless the value is string-typed.
	fn as_string(&self, value: Self::Value) -> Result<String, HostError>;

	/// Truncating integer extraction; fails unless the value is number-typed.
	fn as_integer(&self, value: Self::Value) -> Result<i64, HostError>;
}
