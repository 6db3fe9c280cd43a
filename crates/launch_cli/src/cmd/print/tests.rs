use std::collections::BTreeMap;

use launch::ipc::Value;
use serde_json::json;

use super::{PrintOptions, render_value, value_to_json};

fn job_value() -> Value {
	let mut job = BTreeMap::new();
	job.insert("Label".to_owned(), Value::from("foo.bar"));
	job.insert("PID".to_owned(), Value::Integer(123));
	job.insert("OnDemand".to_owned(), Value::Bool(true));
	job.insert(
		"ProgramArguments".to_owned(),
		Value::Array(vec![Value::from("/bin/sleep"), Value::from("60")]),
	);
	Value::Map(job)
}

#[test]
fn render_nests_maps_and_arrays() {
	let mut out = String::new();
	render_value(&mut out, &job_value(), 0, 0, PrintOptions::default());

	let expected = "{\n  Label = \"foo.bar\"\n  OnDemand = true\n  PID = 123\n  ProgramArguments =\n    [\n      \"/bin/sleep\"\n      \"60\"\n    ]\n}\n";
	assert_eq!(out, expected);
}

#[test]
fn render_truncates_long_arrays_and_strings() {
	let options = PrintOptions {
		max_array_items: 2,
		max_string_len: 3,
		..PrintOptions::default()
	};
	let value = Value::Array(vec![Value::from("abcdef"), Value::Integer(1), Value::Integer(2)]);
	let mut out = String::new();
	render_value(&mut out, &value, 0, 0, options);

	assert_eq!(out, "[\n  \"abc...\"\n  1\n  ... 1 more\n]\n");
}

#[test]
fn render_stops_at_depth_limit() {
	let options = PrintOptions {
		max_print_depth: 1,
		..PrintOptions::default()
	};
	let value = Value::Array(vec![Value::Array(vec![Value::Integer(1), Value::Integer(2)])]);
	let mut out = String::new();
	render_value(&mut out, &value, 0, 0, options);

	assert_eq!(out, "[\n  [... 2 items]\n]\n");
}

#[test]
fn render_marks_binary_strings() {
	let mut out = String::new();
	render_value(&mut out, &Value::String(vec![0xff, 0x00]), 2, 0, PrintOptions::default());
	assert_eq!(out, "  bytes[2]\n");
}

#[test]
fn json_conversion_keeps_shape() {
	assert_eq!(
		value_to_json(&job_value()),
		json!({
			"Label": "foo.bar",
			"OnDemand": true,
			"PID": 123,
			"ProgramArguments": ["/bin/sleep", "60"],
		})
	);
}

#[test]
fn json_conversion_handles_lossy_edges() {
	assert_eq!(value_to_json(&Value::Null), json!(null));
	assert_eq!(value_to_json(&Value::Float(f64::NAN)), json!(null));
	assert_eq!(value_to_json(&Value::Float(1.5)), json!(1.5));
	assert_eq!(value_to_json(&Value::String(vec![0xff, 1])), json!([255, 1]));
}
