use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::ipc::{DataType, DecodeOptions, Item, ItemRef, LaunchData, LaunchError, Value, decode_item, encode_message};

fn decode(item: &LaunchData) -> Value {
	decode_item(item, &DecodeOptions::default()).expect("decode succeeds")
}

fn map(entries: &[(&str, Value)]) -> Value {
	Value::Map(entries.iter().map(|(key, value)| ((*key).to_owned(), value.clone())).collect())
}

/// Tree that can hold a node with a raw tag from a newer protocol revision.
enum Mixed {
	Dict(Vec<(&'static str, Mixed)>),
	List(Vec<Mixed>),
	Int(i64),
	Foreign(u32),
}

impl Item for Mixed {
	fn view(&self) -> crate::ipc::Result<ItemRef<'_, Self>> {
		Ok(match self {
			Self::Dict(entries) => ItemRef::Dictionary(entries.iter().map(|(key, value)| (Cow::Borrowed(*key), value)).collect()),
			Self::List(items) => ItemRef::Array(items.iter().collect()),
			Self::Int(value) => ItemRef::Integer(*value),
			Self::Foreign(tag) => return Err(DataType::try_from(*tag).expect_err("tag is outside the known set")),
		})
	}
}

#[test]
fn dictionary_decodes_to_map_with_same_keys() {
	let item = LaunchData::dictionary([
		("Label", LaunchData::string("com.example.agent").expect("string")),
		("PID", LaunchData::Integer(412)),
		("OnDemand", LaunchData::Bool(true)),
		("Nested", LaunchData::dictionary([("Inner", LaunchData::Real(1.5))])),
	]);

	let expected = map(&[
		("Label", Value::from("com.example.agent")),
		("PID", Value::Integer(412)),
		("OnDemand", Value::Bool(true)),
		("Nested", map(&[("Inner", Value::Float(1.5))])),
	]);
	assert_eq!(decode(&item), expected);
}

#[test]
fn empty_dictionary_decodes_to_empty_map() {
	assert_eq!(decode(&LaunchData::Dictionary(Vec::new())), Value::Map(BTreeMap::new()));
}

#[test]
fn duplicate_dictionary_keys_keep_last_value() {
	let item = LaunchData::dictionary([("k", LaunchData::Integer(1)), ("k", LaunchData::Integer(2))]);
	assert_eq!(decode(&item), map(&[("k", Value::Integer(2))]));
}

#[test]
fn array_preserves_element_order() {
	let item = LaunchData::array([
		LaunchData::string("a").expect("string"),
		LaunchData::Integer(7),
		LaunchData::array([LaunchData::Bool(false)]),
	]);

	assert_eq!(
		decode(&item),
		Value::Array(vec![Value::from("a"), Value::Integer(7), Value::Array(vec![Value::Bool(false)])])
	);
}

#[test]
fn bool_payloads_map_directly() {
	assert_eq!(decode(&LaunchData::Bool(true)), Value::Bool(true));
	assert_eq!(decode(&LaunchData::Bool(false)), Value::Bool(false));
}

#[test]
fn fd_integer_and_errno_share_integer_representation() {
	assert_eq!(decode(&LaunchData::Fd(5)), Value::Integer(5));
	assert_eq!(decode(&LaunchData::Integer(-9)), Value::Integer(-9));
	assert_eq!(decode(&LaunchData::Errno(3)), Value::Integer(3));
}

#[test]
fn string_and_opaque_share_string_representation() {
	let text = decode(&LaunchData::string("abc").expect("string"));
	let opaque = decode(&LaunchData::opaque(b"abc".to_vec()));
	assert_eq!(text, opaque);
}

#[test]
fn opaque_copies_exactly_declared_length() {
	let item = LaunchData::Opaque {
		bytes: b"abc\0defgh".to_vec(),
		len: 6,
	};
	assert_eq!(decode(&item), Value::String(b"abc\0de".to_vec()));
}

#[test]
fn opaque_length_past_buffer_is_clamped() {
	let item = LaunchData::Opaque { bytes: b"ab".to_vec(), len: 10 };
	assert_eq!(decode(&item), Value::String(b"ab".to_vec()));
}

#[test]
fn machport_decodes_to_null() {
	assert_eq!(decode(&LaunchData::MachPort(0)), Value::Null);
	assert_eq!(decode(&LaunchData::MachPort(u32::MAX)), Value::Null);
}

#[test]
fn machport_inside_dictionary_becomes_null_entry() {
	let item = LaunchData::dictionary([("Port", LaunchData::MachPort(0x1503))]);
	assert_eq!(decode(&item), map(&[("Port", Value::Null)]));
}

#[test]
fn unknown_tag_fails_with_observed_tag() {
	let err = decode_item(&Mixed::Foreign(42), &DecodeOptions::default()).expect_err("unknown tag should fail");
	assert!(matches!(err, LaunchError::UnknownVariant { tag: 42 }));
	assert_eq!(err.to_string(), "unknown item type 42");
}

#[test]
fn unknown_tag_inside_dictionary_fails_whole_decode() {
	let item = Mixed::Dict(vec![("PID", Mixed::Int(1)), ("Future", Mixed::Foreign(77)), ("Status", Mixed::Int(0))]);

	let result = decode_item(&item, &DecodeOptions::default());
	assert!(matches!(result, Err(LaunchError::UnknownVariant { tag: 77 })), "got {result:?}");
}

#[test]
fn unknown_tag_deep_in_array_fails_whole_decode() {
	let item = Mixed::List(vec![
		Mixed::Int(1),
		Mixed::Dict(vec![("ok", Mixed::Int(2)), ("bad", Mixed::Foreign(11))]),
		Mixed::Int(3),
	]);

	let result = decode_item(&item, &DecodeOptions::default());
	assert!(matches!(result, Err(LaunchError::UnknownVariant { tag: 11 })), "got {result:?}");
}

#[test]
fn depth_limit_rejects_deep_trees() {
	let mut item = LaunchData::Integer(1);
	for _ in 0..4 {
		item = LaunchData::array([item]);
	}

	let opt = DecodeOptions { max_depth: 4 };
	let err = decode_item(&item, &opt).expect_err("depth should be exceeded");
	assert!(matches!(err, LaunchError::DecodeDepthExceeded { max_depth: 4 }));

	let opt = DecodeOptions { max_depth: 5 };
	decode_item(&item, &opt).expect("depth fits");
}

#[test]
fn encode_wraps_text_as_string_item() {
	let item = encode_message("checkin").expect("encode succeeds");
	assert_eq!(item, LaunchData::String(c"checkin".to_owned()));
	assert_eq!(decode(&item), Value::from("checkin"));
}

#[test]
fn encode_rejects_interior_nul_and_reports_text() {
	let err = encode_message("Get\0Jobs").expect_err("interior nul cannot be encoded");
	match err {
		LaunchError::EncodingFailed { text } => assert_eq!(text, "Get\0Jobs"),
		other => panic!("unexpected error: {other}"),
	}
}
