use std::fmt;

use thiserror::Error;

use crate::access::{HostError, ValueType};
use crate::path::CodingPath;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding a host value graph.
///
/// There is no local recovery inside the decode machinery: any error aborts
/// the decode of the entire root value and is surfaced to the caller,
/// annotated with the coding path at the failure point.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// A value's classified type cannot produce the requested scalar kind.
	#[error("cannot coerce {got} to {expected} at {path}")]
	Coercion {
		/// Requested scalar kind.
		expected: &'static str,
		/// Classified type of the offending value.
		got: ValueType,
		/// Decode location of the failed read.
		path: CodingPath,
	},
	/// An enumerated property name cannot map to a string field identifier.
	#[error("property name of type {got} is not a usable key at {path}")]
	KeyConversion {
		/// Classified type of the offending name handle.
		got: ValueType,
		/// Decode location of the enumerated object.
		path: CodingPath,
	},
	/// A named property is absent under [`MissingKeyPolicy::Error`].
	///
	/// [`MissingKeyPolicy::Error`]: crate::MissingKeyPolicy::Error
	#[error("key not found: {key} at {path}")]
	KeyNotFound {
		/// Requested property name.
		key: String,
		/// Decode location of the object that was missing the key.
		path: CodingPath,
	},
	/// An underlying value access layer call reported a fault.
	#[error("host fault at {path}: {source}")]
	Host {
		/// Decode location of the failed call.
		path: CodingPath,
		/// Propagated host fault.
		#[source]
		source: HostError,
	},
	/// Recursive descent exceeded the configured depth limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Free-form failure raised by a `Deserialize` implementation.
	#[error("{0}")]
	Message(String),
}

impl DecodeError {
	pub(crate) fn coercion(expected: &'static str, got: ValueType, path: &CodingPath) -> Self {
		Self::Coercion {
			expected,
			got,
			path: path.clone(),
		}
	}

	pub(crate) fn host(path: &CodingPath, source: HostError) -> Self {
		Self::Host { path: path.clone(), source }
	}

	/// Coding path of the failure point, when the error carries one.
	pub fn path(&self) -> Option<&CodingPath> {
		match self {
			Self::Coercion { path, .. } | Self::KeyConversion { path, .. } | Self::KeyNotFound { path, .. } | Self::Host { path, .. } => {
				Some(path)
			}
			Self::DepthExceeded { .. } | Self::Message(_) => None,
		}
	}
}

impl serde::de::Error for DecodeError {
	fn custom<T: fmt::Display>(msg: T) -> Self {
		Self::Message(msg.to_string())
	}
}
