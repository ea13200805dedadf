use serde::de::DeserializeOwned;

use crate::access::ValueAccess;
use crate::coerce;
use crate::decoder::{DecodeOptions, Decoder, UserInfo};
use crate::error::Result;
use crate::path::CodingPath;

/// Single-scalar view over one value.
///
/// Decodes the value the container is bound to, or hands the same value off
/// to a nested target type's own decode logic. No key or index exists at
/// this level, so descent does not extend the coding path.
pub struct SingleValueContainer<'a, A: ValueAccess> {
	access: &'a A,
	value: A::Value,
	path: CodingPath,
	options: &'a DecodeOptions,
	userinfo: &'a UserInfo,
	depth: u32,
}

impl<'a, A: ValueAccess> SingleValueContainer<'a, A> {
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

	/// Whether the value classifies as null or undefined.
	pub fn decode_nil(&self) -> Result<bool> {
		coerce::is_nil(self.access, self.value, &self.path)
	}

	/// Boolean value; strict, no coercion.
	pub fn decode_bool(&self) -> Result<bool> {
		coerce::boolean(self.access, self.value, &self.path)
	}

	/// Number value via runtime ToNumber coercion.
	pub fn decode_f64(&self) -> Result<f64> {
		coerce::number(self.access, self.value, &self.path)
	}

	/// Signed integer value: coerced number, truncated and range-checked.
	pub fn decode_i64(&self) -> Result<i64> {
		coerce::integer(self.access, self.value, &self.path)
	}

	/// Unsigned integer value: coerced number, truncated and range-checked.
	pub fn decode_u64(&self) -> Result<u64> {
		coerce::unsigned(self.access, self.value, &self.path)
	}

	/// String value; strict, fails unless the value is already string-typed.
	pub fn decode_string(&self) -> Result<String> {
		coerce::string(self.access, self.value, &self.path)
	}

	/// Decode this value into a nested target type at the same coding path.
	pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
		T::deserialize(Decoder::descend(
			self.access,
			self.value,
			self.path.clone(),
			self.options,
			self.userinfo,
			self.depth + 1,
		)?)
	}
}

#[cfg(test)]
mod tests {
	use crate::decoder::{DecodeOptions, Decoder, UserInfo};
	use crate::error::DecodeError;
	use crate::memory::MemoryEnv;

	#[test]
	fn nil_covers_null_and_undefined() {
		let mut env = MemoryEnv::new();
		let null = env.null();
		let undefined = env.undefined();
		let zero = env.number(0.0);
		let options = DecodeOptions::default();
		let userinfo = UserInfo::new();

		assert!(Decoder::new(&env, null, &options, &userinfo).single_value().decode_nil().expect("nil check succeeds"));
		assert!(
			Decoder::new(&env, undefined, &options, &userinfo)
				.single_value()
				.decode_nil()
				.expect("nil check succeeds")
		);
		assert!(!Decoder::new(&env, zero, &options, &userinfo).single_value().decode_nil().expect("nil check succeeds"));
	}

	#[test]
	fn string_decode_is_strict() {
		let mut env = MemoryEnv::new();
		let value = env.number(3.5);
		let options = DecodeOptions::default();
		let userinfo = UserInfo::new();

		let single = Decoder::new(&env, value, &options, &userinfo).single_value();
		let err = single.decode_string().expect_err("number is not a string");
		assert!(matches!(err, DecodeError::Coercion { expected: "string", .. }));
	}

	#[test]
	fn number_decode_coerces_like_the_runtime() {
		let mut env = MemoryEnv::new();
		let value = env.string("42");
		let options = DecodeOptions::default();
		let userinfo = UserInfo::new();

		let single = Decoder::new(&env, value, &options, &userinfo).single_value();
		assert_eq!(single.decode_f64().expect("string coerces"), 42.0);
		assert_eq!(single.decode_i64().expect("string coerces"), 42);
	}
}
