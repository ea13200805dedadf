use serde::de::DeserializeOwned;

use crate::access::{ValueAccess, ValueType};
use crate::coerce;
use crate::decoder::{DecodeOptions, Decoder, MissingKeyPolicy, UserInfo};
use crate::error::{DecodeError, Result};
use crate::path::CodingPath;
use crate::unkeyed::UnkeyedContainer;

/// Named-field view over one object-shaped value.
///
/// Existence and nilness are independent questions: [`contains`] answers
/// whether a name is an own property at all, [`decode_nil`] whether its value
/// classifies as null or undefined.
///
/// [`contains`]: KeyedContainer::contains
/// [`decode_nil`]: KeyedContainer::decode_nil
pub struct KeyedContainer<'a, A: ValueAccess> {
	access: &'a A,
	value: A::Value,
	path: CodingPath,
	options: &'a DecodeOptions,
	userinfo: &'a UserInfo,
	depth: u32,
}

impl<'a, A: ValueAccess> KeyedContainer<'a, A> {
	pub(crate) fn new(
		access: &'a A,
		value: A::Value,
		path: CodingPath,
		options: &'a DecodeOptions,
		userinfo: &'a UserInfo,
		depth: u32,
	) -> Self {
		Self {
			access,
			value,
			path,
			options,
			userinfo,
			depth,
		}
	}

	/// Decode location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Own-property names in the host runtime's insertion order.
	///
	/// A one-shot snapshot at call time; the set is not cached and could
	/// differ on a second call if the underlying object mutates. A property
	/// name that is not string-typed (for example a symbol) fails with
	/// [`DecodeError::KeyConversion`].
	pub fn all_keys(&self) -> Result<Vec<String>> {
		let names = self
			.access
			.property_names(self.value)
			.map_err(|err| DecodeError::host(&self.path, err))?;
		let mut keys = Vec::with_capacity(names.len());
		for name in names {
			let tag = coerce::classify(self.access, name, &self.path)?;
			if tag != ValueType::String {
				return Err(DecodeError::KeyConversion {
					got: tag,
					path: self.path.clone(),
				});
			}
			keys.push(self.access.as_string(name).map_err(|err| DecodeError::host(&self.path, err))?);
		}
		Ok(keys)
	}

	/// Whether the object has `key` as an own property, even when its value
	/// is null or undefined.
	pub fn contains(&self, key: &str) -> Result<bool> {
		self.access
			.has_named_property(self.value, key)
			.map_err(|err| DecodeError::host(&self.path, err))
	}

	/// Whether the value at `key` classifies as null or undefined.
	pub fn decode_nil(&self, key: &str) -> Result<bool> {
		let value = self.lookup(key)?;
		coerce::is_nil(self.access, value, &self.path.child_key(key))
	}

	/// Boolean at `key`; strict, no coercion.
	pub fn decode_bool(&self, key: &str) -> Result<bool> {
		let value = self.lookup(key)?;
		coerce::boolean(self.access, value, &self.path.child_key(key))
	}

	/// Number at `key` via runtime ToNumber coercion.
	pub fn decode_f64(&self, key: &str) -> Result<f64> {
		let value = self.lookup(key)?;
		coerce::number(self.access, value, &self.path.child_key(key))
	}

	/// Signed integer at `key`: coerced number, truncated and range-checked.
	pub fn decode_i64(&self, key: &str) -> Result<i64> {
		let value = self.lookup(key)?;
		coerce::integer(self.access, value, &self.path.child_key(key))
	}

	/// Unsigned integer at `key`: coerced number, truncated and range-checked.
	pub fn decode_u64(&self, key: &str) -> Result<u64> {
		let value = self.lookup(key)?;
		coerce::unsigned(self.access, value, &self.path.child_key(key))
	}

	/// String at `key`; strict, no coercion.
	pub fn decode_string(&self, key: &str) -> Result<String> {
		let value = self.lookup(key)?;
		coerce::string(self.access, value, &self.path.child_key(key))
	}

	/// Decode the value at `key` into a nested target type.
	pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
		T::deserialize(self.decoder_for(key)?)
	}

	/// Fresh decoder over the value at `key`, coding path extended by `key`.
	///
	/// This is the delegation seam: nested containers and caller-driven
	/// (super-decoder style) decoding all go through it.
	pub fn decoder_for(&self, key: &str) -> Result<Decoder<'a, A>> {
		let value = self.lookup(key)?;
		Decoder::descend(
			self.access,
			value,
			self.path.child_key(key),
			self.options,
			self.userinfo,
			self.depth + 1,
		)
	}

	/// Keyed sub-container over the value at `key`.
	pub fn nested_keyed(&self, key: &str) -> Result<KeyedContainer<'a, A>> {
		Ok(self.decoder_for(key)?.keyed())
	}

	/// Sequential sub-container over the value at `key`.
	pub fn nested_unkeyed(&self, key: &str) -> Result<UnkeyedContainer<'a, A>> {
		Ok(self.decoder_for(key)?.unkeyed())
	}

	fn lookup(&self, key: &str) -> Result<A::Value> {
		if self.options.missing_keys == MissingKeyPolicy::Error && !self.contains(key)? {
			return Err(DecodeError::KeyNotFound {
				key: key.to_owned(),
				path: self.path.clone(),
			});
		}
		self.access
			.named_property(self.value, key)
			.map_err(|err| DecodeError::host(&self.path, err))
	}
}
