//! serde driver over the container machinery.
//!
//! [`Decoder`] implements [`serde::de::Deserializer`], so any `Deserialize`
//! target type selects its container kind through the usual serde calls:
//! structs and maps read through the keyed container, sequences through the
//! unkeyed container, scalars through the single-value container. Each
//! nested descent builds a fresh decoder with an extended coding path.

use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};

use crate::access::{ValueAccess, ValueType};
use crate::coerce;
use crate::decoder::Decoder;
use crate::error::{DecodeError, Result};
use crate::keyed::KeyedContainer;
use crate::unkeyed::UnkeyedContainer;

impl<'a, A: ValueAccess> Decoder<'a, A> {
	fn tag(&self) -> Result<ValueType> {
		coerce::classify(self.access(), self.value(), self.path())
	}

	fn narrow<T: TryFrom<i64>>(&self, n: i64, expected: &'static str) -> Result<T> {
		T::try_from(n).map_err(|_| DecodeError::coercion(expected, ValueType::Number, self.path()))
	}

	fn narrow_unsigned<T: TryFrom<u64>>(&self, n: u64, expected: &'static str) -> Result<T> {
		T::try_from(n).map_err(|_| DecodeError::coercion(expected, ValueType::Number, self.path()))
	}
}

impl<'de, 'a, A: ValueAccess> de::Deserializer<'de> for Decoder<'a, A> {
	type Error = DecodeError;

	fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.tag()? {
			ValueType::Undefined | ValueType::Null => visitor.visit_unit(),
			ValueType::Boolean => visitor.visit_bool(self.single_value().decode_bool()?),
			ValueType::Number => visitor.visit_f64(self.single_value().decode_f64()?),
			ValueType::String => visitor.visit_string(self.single_value().decode_string()?),
			ValueType::Array => self.deserialize_seq(visitor),
			ValueType::Object => self.deserialize_map(visitor),
			other => Err(DecodeError::coercion("decodable value", other, self.path())),
		}
	}

	fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_bool(self.single_value().decode_bool()?)
	}

	fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_i64()?;
		visitor.visit_i8(self.narrow(n, "i8")?)
	}

	fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_i64()?;
		visitor.visit_i16(self.narrow(n, "i16")?)
	}

	fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_i64()?;
		visitor.visit_i32(self.narrow(n, "i32")?)
	}

	fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i64(self.single_value().decode_i64()?)
	}

	fn deserialize_i128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i128(i128::from(self.single_value().decode_i64()?))
	}

	fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_u64()?;
		visitor.visit_u8(self.narrow_unsigned(n, "u8")?)
	}

	fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_u64()?;
		visitor.visit_u16(self.narrow_unsigned(n, "u16")?)
	}

	fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let n = self.single_value().decode_u64()?;
		visitor.visit_u32(self.narrow_unsigned(n, "u32")?)
	}

	fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u64(self.single_value().decode_u64()?)
	}

	fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u128(u128::from(self.single_value().decode_u64()?))
	}

	fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_f32(self.single_value().decode_f64()? as f32)
	}

	fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_f64(self.single_value().decode_f64()?)
	}

	fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let text = self.single_value().decode_string()?;
		let mut chars = text.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => visitor.visit_char(c),
			_ => Err(DecodeError::coercion("single-character string", ValueType::String, self.path())),
		}
	}

	fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_string(self.single_value().decode_string()?)
	}

	fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_string(self.single_value().decode_string()?)
	}

	fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		if self.tag()?.is_nil() {
			visitor.visit_none()
		} else {
			visitor.visit_some(self)
		}
	}

	fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let tag = self.tag()?;
		if tag.is_nil() {
			visitor.visit_unit()
		} else {
			Err(DecodeError::coercion("null", tag, self.path()))
		}
	}

	fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		self.deserialize_unit(visitor)
	}

	fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		visitor.visit_newtype_struct(self)
	}

	fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let tag = self.tag()?;
		if tag != ValueType::Array {
			return Err(DecodeError::coercion("array", tag, self.path()));
		}
		visitor.visit_seq(SeqDriver { elements: self.unkeyed() })
	}

	fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_tuple_struct<V: Visitor<'de>>(self, _name: &'static str, _len: usize, visitor: V) -> Result<V::Value> {
		self.deserialize_seq(visitor)
	}

	fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		let tag = self.tag()?;
		if tag != ValueType::Object {
			return Err(DecodeError::coercion("object", tag, self.path()));
		}
		let fields = self.keyed();
		let keys = fields.all_keys()?;
		visitor.visit_map(MapDriver {
			fields,
			keys: keys.into_iter(),
			pending: None,
		})
	}

	fn deserialize_struct<V: Visitor<'de>>(
		self,
		_name: &'static str,
		_fields: &'static [&'static str],
		visitor: V,
	) -> Result<V::Value> {
		self.deserialize_map(visitor)
	}

	fn deserialize_enum<V: Visitor<'de>>(
		self,
		_name: &'static str,
		_variants: &'static [&'static str],
		visitor: V,
	) -> Result<V::Value> {
		match self.tag()? {
			ValueType::String => visitor.visit_enum(self.single_value().decode_string()?.into_deserializer()),
			ValueType::Object => {
				let fields = self.keyed();
				let keys = fields.all_keys()?;
				let [variant] = keys.as_slice() else {
					return Err(DecodeError::coercion("single-key variant object", ValueType::Object, self.path()));
				};
				let payload = fields.decoder_for(variant)?;
				visitor.visit_enum(EnumDriver {
					variant: variant.clone(),
					payload,
				})
			}
			other => Err(DecodeError::coercion("string or single-key object", other, self.path())),
		}
	}

	fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_str(visitor)
	}

	fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_any(visitor)
	}
}

struct SeqDriver<'a, A: ValueAccess> {
	elements: UnkeyedContainer<'a, A>,
}

impl<'de, 'a, A: ValueAccess> de::SeqAccess<'de> for SeqDriver<'a, A> {
	type Error = DecodeError;

	fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
		if self.elements.is_at_end() {
			return Ok(None);
		}
		seed.deserialize(self.elements.decoder()?).map(Some)
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.elements.count().saturating_sub(self.elements.index()))
	}
}

struct MapDriver<'a, A: ValueAccess> {
	fields: KeyedContainer<'a, A>,
	keys: std::vec::IntoIter<String>,
	pending: Option<String>,
}

impl<'de, 'a, A: ValueAccess> de::MapAccess<'de> for MapDriver<'a, A> {
	type Error = DecodeError;

	fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
		match self.keys.next() {
			Some(key) => {
				self.pending = Some(key.clone());
				seed.deserialize(key.into_deserializer()).map(Some)
			}
			None => Ok(None),
		}
	}

	fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
		let key = self
			.pending
			.take()
			.ok_or_else(|| DecodeError::Message("map value requested before its key".to_owned()))?;
		seed.deserialize(self.fields.decoder_for(&key)?)
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.keys.len())
	}
}

struct EnumDriver<'a, A: ValueAccess> {
	variant: String,
	payload: Decoder<'a, A>,
}

impl<'de, 'a, A: ValueAccess> de::EnumAccess<'de> for EnumDriver<'a, A> {
	type Error = DecodeError;
	type Variant = VariantDriver<'a, A>;

	fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
		let variant = seed.deserialize(self.variant.into_deserializer())?;
		Ok((variant, VariantDriver { payload: self.payload }))
	}
}

struct VariantDriver<'a, A: ValueAccess> {
	payload: Decoder<'a, A>,
}

impl<'de, 'a, A: ValueAccess> de::VariantAccess<'de> for VariantDriver<'a, A> {
	type Error = DecodeError;

	fn unit_variant(self) -> Result<()> {
		de::Deserializer::deserialize_unit(self.payload, de::IgnoredAny).map(|_| ())
	}

	fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
		seed.deserialize(self.payload)
	}

	fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_seq(self.payload, visitor)
	}

	fn struct_variant<V: Visitor<'de>>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_map(self.payload, visitor)
	}
}

#[cfg(test)]
mod tests {
	use serde::Deserialize;

	use crate::decoder::decode;
	use crate::error::DecodeError;
	use crate::memory::MemoryEnv;

	#[derive(Debug, Deserialize, PartialEq)]
	#[serde(rename_all = "lowercase")]
	enum Mode {
		Read,
		Write(u32),
	}

	#[test]
	fn string_decodes_a_unit_variant() {
		let mut env = MemoryEnv::new();
		let root = env.string("read");
		assert_eq!(decode::<Mode, _>(&env, root).expect("variant decodes"), Mode::Read);
	}

	#[test]
	fn single_key_object_decodes_a_newtype_variant() {
		let mut env = MemoryEnv::new();
		let payload = env.number(9.0);
		let root = env.object(&[("write", payload)]);
		assert_eq!(decode::<Mode, _>(&env, root).expect("variant decodes"), Mode::Write(9));
	}

	#[test]
	fn narrowing_out_of_range_fails() {
		let mut env = MemoryEnv::new();
		let root = env.number(300.0);
		let err = decode::<u8, _>(&env, root).expect_err("300 does not fit u8");
		assert!(matches!(err, DecodeError::Coercion { expected: "u8", .. }));
	}

	#[test]
	fn char_requires_a_single_character() {
		let mut env = MemoryEnv::new();
		let ok = env.string("x");
		let bad = env.string("xy");
		assert_eq!(decode::<char, _>(&env, ok).expect("char decodes"), 'x');
		assert!(decode::<char, _>(&env, bad).is_err());
	}
}
