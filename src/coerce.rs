//! Scalar coercion rules shared by all three container kinds.
//!
//! Numeric coercion mirrors the host runtime: numeric-literal strings parse,
//! booleans become 0/1, null becomes 0, undefined is a decode failure.
//! Boolean and string extraction are strict.

use crate::access::{ValueAccess, ValueType};
use crate::error::{DecodeError, Result};
use crate::path::CodingPath;

/// Classify a value, wrapping host faults with the decode location.
pub(crate) fn classify<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<ValueType> {
	access.classify(value).map_err(|err| DecodeError::host(path, err))
}

/// Whether a value classifies as nil (null or undefined).
pub(crate) fn is_nil<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<bool> {
	Ok(classify(access, value, path)?.is_nil())
}

/// Runtime ToNumber coercion gated on the value's classification.
pub(crate) fn number<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<f64> {
	let tag = classify(access, value, path)?;
	coerced_number(access, value, tag, path)
}

fn coerced_number<A: ValueAccess>(access: &A, value: A::Value, tag: ValueType, path: &CodingPath) -> Result<f64> {
	match tag {
		ValueType::Number | ValueType::String | ValueType::Boolean | ValueType::Null => {
			let n = access.coerce_to_number(value).map_err(|err| DecodeError::host(path, err))?;
			// A genuine NaN number passes through; a string that failed to
			// parse does not.
			if n.is_nan() && tag != ValueType::Number {
				return Err(DecodeError::coercion("number", tag, path));
			}
			Ok(n)
		}
		other => Err(DecodeError::coercion("number", other, path)),
	}
}

/// Signed integer from a coerced number: truncated and range-checked.
pub(crate) fn integer<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<i64> {
	let tag = classify(access, value, path)?;
	let n = coerced_number(access, value, tag, path)?;
	if !n.is_finite() {
		return Err(DecodeError::coercion("integer", tag, path));
	}
	let truncated = n.trunc();
	// i64::MAX as f64 rounds up to 2^63, one past the maximum.
	if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
		return Err(DecodeError::coercion("integer", tag, path));
	}
	if tag == ValueType::Number {
		return access.as_integer(value).map_err(|err| DecodeError::host(path, err));
	}
	Ok(truncated as i64)
}

/// Unsigned integer from a coerced number: truncated and range-checked.
pub(crate) fn unsigned<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<u64> {
	let tag = classify(access, value, path)?;
	let n = coerced_number(access, value, tag, path)?;
	if !n.is_finite() {
		return Err(DecodeError::coercion("unsigned integer", tag, path));
	}
	let truncated = n.trunc();
	// u64::MAX as f64 rounds up to 2^64, one past the maximum.
	if truncated < 0.0 || truncated >= u64::MAX as f64 {
		return Err(DecodeError::coercion("unsigned integer", tag, path));
	}
	Ok(truncated as u64)
}

/// Strict boolean extraction; no coercion.
pub(crate) fn boolean<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<bool> {
	let tag = classify(access, value, path)?;
	if tag != ValueType::Boolean {
		return Err(DecodeError::coercion("boolean", tag, path));
	}
	access.as_boolean(value).map_err(|err| DecodeError::host(path, err))
}

/// Strict string extraction; no coercion.
pub(crate) fn string<A: ValueAccess>(access: &A, value: A::Value, path: &CodingPath) -> Result<String> {
	let tag = classify(access, value, path)?;
	if tag != ValueType::String {
		return Err(DecodeError::coercion("string", tag, path));
	}
	access.as_string(value).map_err(|err| DecodeError::host(path, err))
}

#[cfg(test)]
mod tests {
	use super::{boolean, integer, number, string, unsigned};
	use crate::error::DecodeError;
	use crate::memory::MemoryEnv;
	use crate::path::CodingPath;

	#[test]
	fn numeric_string_parses() {
		let mut env = MemoryEnv::new();
		let value = env.string("3.5");
		let n = number(&env, value, &CodingPath::root()).expect("string coerces");
		assert_eq!(n, 3.5);
	}

	#[test]
	fn boolean_coerces_to_one() {
		let mut env = MemoryEnv::new();
		let value = env.boolean(true);
		assert_eq!(number(&env, value, &CodingPath::root()).expect("bool coerces"), 1.0);
	}

	#[test]
	fn null_coerces_to_zero() {
		let mut env = MemoryEnv::new();
		let value = env.null();
		assert_eq!(number(&env, value, &CodingPath::root()).expect("null coerces"), 0.0);
	}

	#[test]
	fn undefined_fails_numeric_coercion() {
		let env = MemoryEnv::new();
		let value = env.undefined();
		let err = number(&env, value, &CodingPath::root()).expect_err("undefined must not coerce");
		assert!(matches!(err, DecodeError::Coercion { expected: "number", .. }));
	}

	#[test]
	fn non_numeric_string_fails() {
		let mut env = MemoryEnv::new();
		let value = env.string("not a number");
		let err = number(&env, value, &CodingPath::root()).expect_err("garbage string must not coerce");
		assert!(matches!(err, DecodeError::Coercion { .. }));
	}

	#[test]
	fn object_fails_numeric_coercion() {
		let mut env = MemoryEnv::new();
		let value = env.object(&[]);
		let err = number(&env, value, &CodingPath::root()).expect_err("object has no coercion hook");
		assert!(matches!(err, DecodeError::Coercion { .. }));
	}

	#[test]
	fn integer_truncates_fractional_strings() {
		let mut env = MemoryEnv::new();
		let value = env.string("7.9");
		assert_eq!(integer(&env, value, &CodingPath::root()).expect("string coerces"), 7);
	}

	#[test]
	fn integer_rejects_non_finite() {
		let mut env = MemoryEnv::new();
		let value = env.string("Infinity");
		let err = integer(&env, value, &CodingPath::root()).expect_err("infinity is not an integer");
		assert!(matches!(err, DecodeError::Coercion { expected: "integer", .. }));
	}

	#[test]
	fn integer_rejects_two_to_the_sixty_third() {
		let mut env = MemoryEnv::new();
		let value = env.number(9_223_372_036_854_775_808.0);
		let err = integer(&env, value, &CodingPath::root()).expect_err("2^63 is one past the signed maximum");
		assert!(matches!(err, DecodeError::Coercion { expected: "integer", .. }));
	}

	#[test]
	fn integer_accepts_the_extreme_representable_values() {
		let mut env = MemoryEnv::new();
		let min = env.number(i64::MIN as f64);
		assert_eq!(integer(&env, min, &CodingPath::root()).expect("i64::MIN is in range"), i64::MIN);

		// Largest f64 below 2^63.
		let high = env.number(9_223_372_036_854_774_784.0);
		assert_eq!(integer(&env, high, &CodingPath::root()).expect("value is in range"), 9_223_372_036_854_774_784);
	}

	#[test]
	fn unsigned_rejects_two_to_the_sixty_fourth() {
		let mut env = MemoryEnv::new();
		let value = env.number(18_446_744_073_709_551_616.0);
		let err = unsigned(&env, value, &CodingPath::root()).expect_err("2^64 is one past the unsigned maximum");
		assert!(matches!(err, DecodeError::Coercion { expected: "unsigned integer", .. }));
	}

	#[test]
	fn boolean_extraction_is_strict() {
		let mut env = MemoryEnv::new();
		let value = env.number(1.0);
		let err = boolean(&env, value, &CodingPath::root()).expect_err("number is not a boolean");
		assert!(matches!(err, DecodeError::Coercion { expected: "boolean", .. }));
	}

	#[test]
	fn string_extraction_is_strict() {
		let mut env = MemoryEnv::new();
		let value = env.number(3.0);
		let err = string(&env, value, &CodingPath::root()).expect_err("number is not a string");
		assert!(matches!(err, DecodeError::Coercion { expected: "string", .. }));
	}
}
