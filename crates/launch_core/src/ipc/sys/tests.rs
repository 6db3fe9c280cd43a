use super::NativeData;
use crate::ipc::{DecodeOptions, LaunchData, Value, decode_item};

#[test]
fn native_array_keeps_every_index() {
	let request = LaunchData::array([
		LaunchData::Integer(10),
		LaunchData::string("mid").expect("string"),
		LaunchData::Bool(true),
		LaunchData::Integer(30),
	]);
	let native = NativeData::build(&request).expect("native tree builds");

	let value = decode_item(&*native, &DecodeOptions::default()).expect("decode succeeds");
	assert_eq!(
		value,
		Value::Array(vec![Value::Integer(10), Value::from("mid"), Value::Bool(true), Value::Integer(30)])
	);
}

#[test]
fn native_dictionary_and_opaque_decode_like_owned_trees() {
	let request = LaunchData::dictionary([
		("Label", LaunchData::string("com.example.native").expect("string")),
		("Blob", LaunchData::Opaque { bytes: b"abcdef".to_vec(), len: 4 }),
		("Fd", LaunchData::Fd(3)),
	]);
	let native = NativeData::build(&request).expect("native tree builds");

	let from_native = decode_item(&*native, &DecodeOptions::default()).expect("native decode");
	let from_owned = decode_item(&request, &DecodeOptions::default()).expect("owned decode");
	assert_eq!(from_native, from_owned);
	assert_eq!(from_native.get("Blob"), Some(&Value::String(b"abcd".to_vec())));
}
