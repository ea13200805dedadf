use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::access::ValueAccess;
use crate::error::{DecodeError, Result};
use crate::keyed::KeyedContainer;
use crate::path::CodingPath;
use crate::single::SingleValueContainer;
use crate::unkeyed::UnkeyedContainer;

/// Policy for named-property lookups that find no own property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
	/// An absent key reads as the runtime's `undefined` value, so a direct
	/// scalar decode of a genuinely absent key fails with a coercion error
	/// rather than a key-not-found error. This is the default and matches
	/// the host runtime's own lookup behavior.
	#[default]
	Undefined,
	/// An absent key fails the lookup itself with
	/// [`DecodeError::KeyNotFound`].
	Error,
}

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursive descent depth through nested target types.
	pub max_depth: u32,
	/// Handling of named-property lookups for absent keys.
	pub missing_keys: MissingKeyPolicy,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			missing_keys: MissingKeyPolicy::Undefined,
		}
	}
}

/// Caller-supplied contextual data, passed unchanged through every recursive
/// decode call.
///
/// Stores at most one value per type; decode logic with access to a
/// [`Decoder`] or container can read it back by type.
#[derive(Default)]
pub struct UserInfo {
	entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl UserInfo {
	/// Empty context bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Store one value, replacing any previous value of the same type.
	pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
		self.entries.insert(TypeId::of::<T>(), Box::new(value));
	}

	/// Retrieve a previously stored value by type.
	pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
		self.entries.get(&TypeId::of::<T>()).and_then(|entry| entry.downcast_ref())
	}
}

/// Decode entry point bound to one environment handle and one value.
///
/// Construction validates nothing and builds no container; the target type's
/// decode logic selects one of the three container kinds, and shape
/// mismatches surface lazily when a concrete field or element is read.
pub struct Decoder<'a, A: ValueAccess> {
	access: &'a A,
	value: A::Value,
	path: CodingPath,
	options: &'a DecodeOptions,
	userinfo: &'a UserInfo,
	depth: u32,
}

impl<'a, A: ValueAccess> Decoder<'a, A> {
	/// Decoder over a root value at the empty coding path.
	pub fn new(access: &'a A, value: A::Value, options: &'a DecodeOptions, userinfo: &'a UserInfo) -> Self {
		Self {
			access,
			value,
			path: CodingPath::root(),
			options,
			userinfo,
			depth: 0,
		}
	}

	/// Decoder for one recursive descent step; fails once the configured
	/// depth ceiling is crossed.
	pub(crate) fn descend(
		access: &'a A,
		value: A::Value,
		path: CodingPath,
		options: &'a DecodeOptions,
		userinfo: &'a UserInfo,
		depth: u32,
	) -> Result<Self> {
		if depth > options.max_depth {
			return Err(DecodeError::DepthExceeded { max_depth: options.max_depth });
		}
		Ok(Self {
			access,
			value,
			path,
			options,
			userinfo,
			depth,
		})
	}

	/// Environment handle the decoder reads through.
	pub fn access(&self) -> &'a A {
		self.access
	}

	/// Value this decoder is bound to.
	pub fn value(&self) -> A::Value {
		self.value
	}

	/// Decode location of this decoder.
	pub fn path(&self) -> &CodingPath {
		&self.path
	}

	/// Active options.
	pub fn options(&self) -> &'a DecodeOptions {
		self.options
	}

	/// Caller-supplied context bag.
	pub fn userinfo(&self) -> &'a UserInfo {
		self.userinfo
	}

	/// Named-field view over this decoder's value.
	pub fn keyed(&self) -> KeyedContainer<'a, A> {
		KeyedContainer::new(self.access, self.value, self.path.clone(), self.options, self.userinfo, self.depth)
	}

	/// Sequential view over this decoder's value.
	pub fn unkeyed(&self) -> UnkeyedContainer<'a, A> {
		UnkeyedContainer::new(self.access, self.value, self.path.clone(), self.options, self.userinfo, self.depth)
	}

	/// Single-scalar view over this decoder's value.
	pub fn single_value(&self) -> SingleValueContainer<'a, A> {
		SingleValueContainer::new(self.access, self.value, self.path.clone(), self.options, self.userinfo, self.depth)
	}
}

/// Decode a root value into `T` with default options and an empty context.
pub fn decode<T, A>(access: &A, root: A::Value) -> Result<T>
where
	T: DeserializeOwned,
	A: ValueAccess,
{
	decode_with(access, root, &DecodeOptions::default(), &UserInfo::new())
}

/// Decode a root value into `T` with explicit options and caller context.
pub fn decode_with<T, A>(access: &A, root: A::Value, options: &DecodeOptions, userinfo: &UserInfo) -> Result<T>
where
	T: DeserializeOwned,
	A: ValueAccess,
{
	T::deserialize(Decoder::new(access, root, options, userinfo))
}
