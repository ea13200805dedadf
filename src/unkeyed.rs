use serde::de::DeserializeOwned;

use crate::access::ValueAccess;
use crate::coerce;
use crate::decoder::{DecodeOptions, Decoder, UserInfo};
use crate::error::{DecodeError, Result};
use crate::keyed::KeyedContainer;
use crate::path::CodingPath;

/// Sequential view over one array-shaped value.
///
/// The element count is read once at construction; a value with no usable
/// length decodes as an empty sequence. Host faults raised while reading the
/// length are absorbed the same way, so a broken length never aborts the
/// decode. Every decode advances a monotonic cursor by one, and the coding
/// path of each descent carries the element index.
pub struct UnkeyedContainer<'a, A: ValueAccess> {
	access: &'a A,
	value: A::Value,
	path: CodingPath,
	options: &'a DecodeOptions,
	userinfo: &'a UserInfo,
	depth: u32,
	count: usize,
	index: usize,
}

impl<'a, A: ValueAccess> UnkeyedContainer<'a, A> {
	pub(crate) fn new(
		access: &'a A,
		value: A::Value,
		path: CodingPath,
		options: &'a DecodeOptions,
		userinfo: &'a UserInfo,
		depth: u32,
	) -> Self {
		let count = access.length(value).unwrap_or(0);
		Self {
			access,
			value,
			path,
			options,
			userinfo,
			depth,
			count,
			index: 0,
		}
	}

	/// Decode location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Element count read at construction.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Cursor position of the next element.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Whether the cursor has consumed every element.
	pub fn is_at_end(&self) -> bool {
		self.index == self.count
	}

	/// Whether the element at the cursor classifies as null or undefined.
	///
	/// Advances the cursor only when the element is nil, so a false answer
	/// leaves the element available for a typed decode.
	pub fn decode_nil(&mut self) -> Result<bool> {
		let path = self.path.child_index(self.index);
		let value = self
			.access
			.element(self.value, self.index)
			.map_err(|err| DecodeError::host(&path, err))?;
		let nil = coerce::is_nil(self.access, value, &path)?;
		if nil {
			self.index += 1;
		}
		Ok(nil)
	}

	/// Boolean element at the cursor; strict. Advances the cursor.
	pub fn decode_bool(&mut self) -> Result<bool> {
		let (value, path) = self.advance()?;
		coerce::boolean(self.access, value, &path)
	}

	/// Number element at the cursor via runtime ToNumber coercion. Advances
	/// the cursor.
	pub fn decode_f64(&mut self) -> Result<f64> {
		let (value, path) = self.advance()?;
		coerce::number(self.access, value, &path)
	}

	/// Signed integer element at the cursor. Advances the cursor.
	pub fn decode_i64(&mut self) -> Result<i64> {
		let (value, path) = self.advance()?;
		coerce::integer(self.access, value, &path)
	}

	/// Unsigned integer element at the cursor. Advances the cursor.
	pub fn decode_u64(&mut self) -> Result<u64> {
		let (value, path) = self.advance()?;
		coerce::unsigned(self.access, value, &path)
	}

	/// String element at the cursor; strict. Advances the cursor.
	pub fn decode_string(&mut self) -> Result<String> {
		let (value, path) = self.advance()?;
		coerce::string(self.access, value, &path)
	}

	/// Decode the element at the cursor into a nested target type. Advances
	/// the cursor.
	pub fn decode<T: DeserializeOwned>(&mut self) -> Result<T> {
		T::deserialize(self.decoder()?)
	}

	/// Fresh decoder over the element at the cursor, coding path extended by
	/// its index. Advances the cursor.
	pub fn decoder(&mut self) -> Result<Decoder<'a, A>> {
		let (value, path) = self.advance()?;
		Decoder::descend(self.access, value, path, self.options, self.userinfo, self.depth + 1)
	}

	/// Keyed sub-container over the element at the cursor. Advances the
	/// cursor.
	pub fn nested_keyed(&mut self) -> Result<KeyedContainer<'a, A>> {
		Ok(self.decoder()?.keyed())
	}

	/// Sequential sub-container over the element at the cursor. Advances the
	/// cursor.
	pub fn nested_unkeyed(&mut self) -> Result<UnkeyedContainer<'a, A>> {
		Ok(self.decoder()?.unkeyed())
	}

	fn advance(&mut self) -> Result<(A::Value, CodingPath)> {
		let path = self.path.child_index(self.index);
		let value = self
			.access
			.element(self.value, self.index)
			.map_err(|err| DecodeError::host(&path, err))?;
		self.index += 1;
		Ok((value, path))
	}
}
