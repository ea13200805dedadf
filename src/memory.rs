//! In-memory value graph implementing [`ValueAccess`].
//!
//! Backs the crate's tests and host-free embedding. Object properties keep
//! insertion order and numeric coercion follows the runtime's ToNumber rules,
//! so decodes behave the same as against a live environment.

use crate::access::{HostError, ValueAccess, ValueType};

/// Handle to one node of a [`MemoryEnv`] value graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Val(usize);

#[derive(Debug, Clone)]
enum Node {
	Undefined,
	Null,
	Boolean(bool),
	Number(f64),
	Str(String),
	Array(Vec<Val>),
	Object(Vec<(Val, Val)>),
	Function,
	Symbol(String),
	Bigint(i64),
	External,
}

/// In-memory value graph with an arena of nodes.
///
/// Build values with the constructor methods, then decode against `&self`.
/// Handle `Val(0)` is the canonical `undefined` value.
#[derive(Debug)]
pub struct MemoryEnv {
	nodes: Vec<Node>,
}

impl Default for MemoryEnv {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryEnv {
	/// Empty graph holding only the canonical `undefined` value.
	pub fn new() -> Self {
		Self {
			nodes: vec![Node::Undefined],
		}
	}

	fn push(&mut self, node: Node) -> Val {
		let id = self.nodes.len();
		self.nodes.push(node);
		Val(id)
	}

	/// The `undefined` value.
	pub fn undefined(&self) -> Val {
		Val(0)
	}

	/// The `null` value.
	pub fn null(&mut self) -> Val {
		self.push(Node::Null)
	}

	/// A boolean primitive.
	pub fn boolean(&mut self, value: bool) -> Val {
		self.push(Node::Boolean(value))
	}

	/// A number primitive.
	pub fn number(&mut self, value: f64) -> Val {
		self.push(Node::Number(value))
	}

	/// A string primitive.
	pub fn string(&mut self, value: &str) -> Val {
		self.push(Node::Str(value.to_owned()))
	}

	/// A symbol primitive with a description.
	pub fn symbol(&mut self, description: &str) -> Val {
		self.push(Node::Symbol(description.to_owned()))
	}

	/// A bigint primitive.
	pub fn bigint(&mut self, value: i64) -> Val {
		self.push(Node::Bigint(value))
	}

	/// A function object.
	pub fn function(&mut self) -> Val {
		self.push(Node::Function)
	}

	/// A host-opaque external value.
	pub fn external(&mut self) -> Val {
		self.push(Node::External)
	}

	/// An array of elements.
	pub fn array(&mut self, elements: Vec<Val>) -> Val {
		self.push(Node::Array(elements))
	}

	/// An object with string-named properties in the given insertion order.
	pub fn object(&mut self, properties: &[(&str, Val)]) -> Val {
		let mut props = Vec::with_capacity(properties.len());
		for (name, value) in properties {
			let name = self.string(name);
			props.push((name, *value));
		}
		self.push(Node::Object(props))
	}

	/// An object whose property names are arbitrary value handles, for
	/// example symbols.
	pub fn object_raw(&mut self, properties: Vec<(Val, Val)>) -> Val {
		self.push(Node::Object(properties))
	}

	/// Import a `serde_json::Value` tree, preserving object member order.
	pub fn from_json(&mut self, json: &serde_json::Value) -> Val {
		match json {
			serde_json::Value::Null => self.null(),
			serde_json::Value::Bool(value) => self.boolean(*value),
			serde_json::Value::Number(value) => {
				let n = value.as_f64().unwrap_or(f64::NAN);
				self.number(n)
			}
			serde_json::Value::String(value) => {
				let value = value.clone();
				self.push(Node::Str(value))
			}
			serde_json::Value::Array(items) => {
				let mut elements = Vec::with_capacity(items.len());
				for item in items {
					elements.push(self.from_json(item));
				}
				self.array(elements)
			}
			serde_json::Value::Object(members) => {
				let mut props = Vec::with_capacity(members.len());
				for (name, member) in members {
					let value = self.from_json(member);
					let name = self.string(name);
					props.push((name, value));
				}
				self.push(Node::Object(props))
			}
		}
	}

	fn node(&self, value: Val) -> Result<&Node, HostError> {
		self.nodes.get(value.0).ok_or_else(|| HostError::new("invalid value handle"))
	}

	fn name_matches(&self, handle: Val, name: &str) -> bool {
		matches!(self.nodes.get(handle.0), Some(Node::Str(own)) if own == name)
	}
}

impl ValueAccess for MemoryEnv {
	type Value = Val;

	fn classify(&self, value: Val) -> Result<ValueType, HostError> {
		Ok(match self.node(value)? {
			Node::Undefined => ValueType::Undefined,
			Node::Null => ValueType::Null,
			Node::Boolean(_) => ValueType::Boolean,
			Node::Number(_) => ValueType::Number,
			Node::Str(_) => ValueType::String,
			Node::Array(_) => ValueType::Array,
			Node::Object(_) => ValueType::Object,
			Node::Function => ValueType::Function,
			Node::Symbol(_) => ValueType::Symbol,
			Node::Bigint(_) => ValueType::Bigint,
			Node::External => ValueType::External,
		})
	}

	fn property_names(&self, object: Val) -> Result<Vec<Val>, HostError> {
		match self.node(object)? {
			Node::Object(props) => Ok(props.iter().map(|(name, _)| *name).collect()),
			_ => Err(HostError::new("object expected")),
		}
	}

	fn has_named_property(&self, object: Val, name: &str) -> Result<bool, HostError> {
		match self.node(object)? {
			Node::Object(props) => Ok(props.iter().any(|(own, _)| self.name_matches(*own, name))),
			_ => Err(HostError::new("object expected")),
		}
	}

	fn named_property(&self, object: Val, name: &str) -> Result<Val, HostError> {
		match self.node(object)? {
			Node::Object(props) => Ok(props
				.iter()
				.find(|(own, _)| self.name_matches(*own, name))
				.map(|(_, value)| *value)
				.unwrap_or(self.undefined())),
			_ => Err(HostError::new("object expected")),
		}
	}

	fn element(&self, array: Val, index: usize) -> Result<Val, HostError> {
		match self.node(array)? {
			Node::Array(elements) => Ok(elements.get(index).copied().unwrap_or(self.undefined())),
			_ => Err(HostError::new("array expected")),
		}
	}

	fn length(&self, array: Val) -> Result<usize, HostError> {
		match self.node(array)? {
			Node::Array(elements) => Ok(elements.len()),
			// String lengths count UTF-16 code units, matching the runtime.
			Node::Str(value) => Ok(value.encode_utf16().count()),
			_ => Err(HostError::new("value has no length")),
		}
	}

	fn coerce_to_number(&self, value: Val) -> Result<f64, HostError> {
		Ok(match self.node(value)? {
			Node::Number(n) => *n,
			Node::Boolean(b) => {
				if *b {
					1.0
				} else {
					0.0
				}
			}
			Node::Null => 0.0,
			Node::Str(s) => {
				let trimmed = s.trim();
				if trimmed.is_empty() {
					0.0
				} else {
					trimmed.parse().unwrap_or(f64::NAN)
				}
			}
			Node::Undefined | Node::Object(_) | Node::Array(_) | Node::Function | Node::External => f64::NAN,
			Node::Symbol(description) => {
				return Err(HostError::new(format!("cannot convert symbol ({description}) to a number")));
			}
			Node::Bigint(n) => return Err(HostError::new(format!("cannot convert bigint {n} to a number"))),
		})
	}

	fn as_boolean(&self, value: Val) -> Result<bool, HostError> {
		match self.node(value)? {
			Node::Boolean(b) => Ok(*b),
			_ => Err(HostError::new("boolean expected")),
		}
	}

	fn as_string(&self, value: Val) -> Result<String, HostError> {
		match self.node(value)? {
			Node::Str(s) => Ok(s.clone()),
			_ => Err(HostError::new("string expected")),
		}
	}

	fn as_integer(&self, value: Val) -> Result<i64, HostError> {
		match self.node(value)? {
			Node::Number(n) if n.is_finite() => Ok(n.trunc() as i64),
			Node::Number(_) => Ok(0),
			_ => Err(HostError::new("number expected")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::MemoryEnv;
	use crate::access::{ValueAccess, ValueType};

	#[test]
	fn classification_covers_every_tag() {
		let mut env = MemoryEnv::new();
		let cases = [
			(env.undefined(), ValueType::Undefined),
			(env.null(), ValueType::Null),
			(env.boolean(true), ValueType::Boolean),
			(env.number(1.5), ValueType::Number),
			(env.string("x"), ValueType::String),
			(env.array(vec![]), ValueType::Array),
			(env.object(&[]), ValueType::Object),
			(env.function(), ValueType::Function),
			(env.symbol("s"), ValueType::Symbol),
			(env.bigint(9), ValueType::Bigint),
			(env.external(), ValueType::External),
		];
		for (value, expected) in cases {
			assert_eq!(env.classify(value).expect("classification succeeds"), expected);
		}
	}

	#[test]
	fn string_length_counts_utf16_code_units() {
		let mut env = MemoryEnv::new();
		let clef = env.string("\u{1D11E}");
		assert_eq!(env.length(clef).expect("strings have a length"), 2);
		let mixed = env.string("a\u{1D11E}b");
		assert_eq!(env.length(mixed).expect("strings have a length"), 4);
	}

	#[test]
	fn absent_property_reads_as_undefined() {
		let mut env = MemoryEnv::new();
		let root = env.object(&[]);
		let value = env.named_property(root, "missing").expect("lookup succeeds");
		assert_eq!(env.classify(value).expect("classification succeeds"), ValueType::Undefined);
	}

	#[test]
	fn empty_string_coerces_to_zero() {
		let mut env = MemoryEnv::new();
		let value = env.string("  ");
		assert_eq!(env.coerce_to_number(value).expect("string coerces"), 0.0);
	}

	#[test]
	fn from_json_preserves_member_order() {
		let mut env = MemoryEnv::new();
		let root = env.from_json(&serde_json::json!({"b": 1, "a": 2}));
		let names = env.property_names(root).expect("names enumerate");
		let names: Vec<String> = names.iter().map(|name| env.as_string(*name).expect("name is a string")).collect();
		assert_eq!(names, vec!["b".to_owned(), "a".to_owned()]);
	}

	#[test]
	fn bigint_coercion_faults() {
		let mut env = MemoryEnv::new();
		let value = env.bigint(10);
		assert!(env.coerce_to_number(value).is_err());
	}
}
