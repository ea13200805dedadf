#![allow(missing_docs)]

use jsde::memory::MemoryEnv;
use jsde::{DecodeError, DecodeOptions, Decoder, UserInfo};
use serde::Deserialize;

#[test]
fn keyed_container_answers_the_spec_questions() {
	let mut env = MemoryEnv::new();
	let undefined = env.undefined();
	let null = env.null();
	let n = env.string("3.5");
	let root = env.object(&[("gone", undefined), ("empty", null), ("n", n)]);
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let keyed = Decoder::new(&env, root, &options, &userinfo).keyed();

	assert_eq!(
		keyed.all_keys().expect("keys enumerate"),
		vec!["gone".to_owned(), "empty".to_owned(), "n".to_owned()]
	);
	assert!(keyed.contains("gone").expect("lookup succeeds"));
	assert!(keyed.contains("empty").expect("lookup succeeds"));
	assert!(!keyed.contains("absent").expect("lookup succeeds"));
	assert!(keyed.decode_nil("gone").expect("nil check succeeds"));
	assert!(keyed.decode_nil("empty").expect("nil check succeeds"));
	assert!(!keyed.decode_nil("n").expect("nil check succeeds"));
	assert_eq!(keyed.decode_f64("n").expect("string coerces"), 3.5);
	assert_eq!(keyed.decode_i64("n").expect("string coerces"), 3);
}

#[test]
fn scalar_coercion_matches_the_runtime_table() {
	let mut env = MemoryEnv::new();
	let s = env.string("3.5");
	let t = env.boolean(true);
	let null = env.null();
	let undefined = env.undefined();
	let root = env.object(&[("s", s), ("t", t), ("null", null), ("undefined", undefined)]);
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let keyed = Decoder::new(&env, root, &options, &userinfo).keyed();
	assert_eq!(keyed.decode_f64("s").expect("string coerces"), 3.5);
	assert_eq!(keyed.decode_f64("t").expect("true coerces"), 1.0);
	assert_eq!(keyed.decode_f64("null").expect("null coerces"), 0.0);
	let err = keyed.decode_f64("undefined").expect_err("undefined must not coerce");
	assert!(matches!(err, DecodeError::Coercion { expected: "number", .. }));
}

#[test]
fn unkeyed_container_drives_a_monotonic_cursor() {
	#[derive(Debug, Deserialize, PartialEq)]
	struct Item {
		id: f64,
	}

	let mut env = MemoryEnv::new();
	let root = env.from_json(&serde_json::json!([{"id": 1}, {"id": 2}, {"id": 3}]));
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let mut items = Decoder::new(&env, root, &options, &userinfo).unkeyed();
	assert_eq!(items.count(), 3);

	let mut decoded = Vec::new();
	while !items.is_at_end() {
		decoded.push(items.decode::<Item>().expect("element decodes"));
	}
	assert_eq!(decoded, vec![Item { id: 1.0 }, Item { id: 2.0 }, Item { id: 3.0 }]);
	assert!(items.is_at_end());
}

#[test]
fn delegation_through_decoder_for_reaches_nested_logic() {
	#[derive(Debug, Deserialize, PartialEq)]
	struct Inner {
		leaf: String,
	}

	let mut env = MemoryEnv::new();
	let root = env.from_json(&serde_json::json!({"inner": {"leaf": "ok"}}));
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let keyed = Decoder::new(&env, root, &options, &userinfo).keyed();
	let delegate = keyed.decoder_for("inner").expect("delegate builds");
	assert_eq!(delegate.path().to_string(), "$.inner");

	let inner = Inner::deserialize(delegate).expect("delegate decodes");
	assert_eq!(inner, Inner { leaf: "ok".to_owned() });
}

#[test]
fn single_value_container_hands_off_at_the_same_path() {
	let mut env = MemoryEnv::new();
	let root = env.string("solo");
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let single = Decoder::new(&env, root, &options, &userinfo).single_value();
	assert_eq!(single.coding_path().to_string(), "$");
	assert_eq!(single.decode::<String>().expect("string decodes"), "solo");
}

#[test]
fn reading_fields_of_a_non_object_propagates_the_host_fault() {
	let mut env = MemoryEnv::new();
	let root = env.number(7.0);
	let options = DecodeOptions::default();
	let userinfo = UserInfo::new();

	let keyed = Decoder::new(&env, root, &options, &userinfo).keyed();
	let err = keyed.all_keys().expect_err("numbers have no own properties");
	assert!(matches!(err, DecodeError::Host { .. }));
}
