use launch::ipc::Value;

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single map.
	pub max_map_entries: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/maps.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_map_entries: 80,
			max_string_len: 200,
			max_array_items: 32,
			max_print_depth: 8,
		}
	}
}

impl PrintOptions {
	/// Preset for full job dictionaries.
	pub fn for_job() -> Self {
		Self {
			max_map_entries: usize::MAX,
			max_string_len: 400,
			max_array_items: 64,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree.
pub fn print_value(value: &Value, indent: usize, options: PrintOptions) {
	let mut out = String::new();
	render_value(&mut out, value, indent, 0, options);
	print!("{out}");
}

/// Render one decoded value tree into `out`, one line per scalar.
pub fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				out.push_str(&format!("{pad}[... {} items]\n", items.len()));
				return;
			}
			out.push_str(&format!("{pad}[\n"));
			for item in items.iter().take(options.max_array_items) {
				render_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				out.push_str(&format!("{pad}  ... {} more\n", items.len() - options.max_array_items));
			}
			out.push_str(&format!("{pad}]\n"));
		}
		Value::Map(map) => {
			if depth >= options.max_print_depth {
				out.push_str(&format!("{pad}{{ ... {} entries }}\n", map.len()));
				return;
			}
			out.push_str(&format!("{pad}{{\n"));
			for (key, item) in map.iter().take(options.max_map_entries) {
				if matches!(item, Value::Map(_) | Value::Array(_)) {
					out.push_str(&format!("{pad}  {key} =\n"));
					render_value(out, item, indent + 4, depth + 1, options);
				} else {
					out.push_str(&format!("{pad}  {key} = {}\n", scalar(item, options)));
				}
			}
			if map.len() > options.max_map_entries {
				out.push_str(&format!("{pad}  ... {} more entries\n", map.len() - options.max_map_entries));
			}
			out.push_str(&format!("{pad}}}\n"));
		}
		scalar_value => out.push_str(&format!("{pad}{}\n", scalar(scalar_value, options))),
	}
}

fn scalar(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Bool(v) => v.to_string(),
		Value::Integer(v) => v.to_string(),
		Value::Float(v) => v.to_string(),
		Value::String(bytes) => match std::str::from_utf8(bytes) {
			Ok(text) => format!("\"{}\"", truncate(text, options.max_string_len)),
			Err(_) => format!("bytes[{}]", bytes.len()),
		},
		Value::Array(items) => format!("[{} items]", items.len()),
		Value::Map(map) => format!("{{{} entries}}", map.len()),
	}
}

fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_owned();
	}
	let mut out: String = text.chars().take(max_chars).collect();
	out.push_str("...");
	out
}

/// Convert a decoded value into JSON.
///
/// Byte strings that are not UTF-8 become arrays of byte values; non-finite
/// floats become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
	use serde_json::Value as Json;

	match value {
		Value::Null => Json::Null,
		Value::Bool(v) => Json::Bool(*v),
		Value::Integer(v) => Json::from(*v),
		Value::Float(v) => serde_json::Number::from_f64(*v).map_or(Json::Null, Json::Number),
		Value::String(bytes) => match std::str::from_utf8(bytes) {
			Ok(text) => Json::String(text.to_owned()),
			Err(_) => Json::Array(bytes.iter().map(|byte| Json::from(*byte)).collect()),
		},
		Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
		Value::Map(map) => Json::Object(map.iter().map(|(key, item)| (key.clone(), value_to_json(item))).collect()),
	}
}

#[cfg(test)]
mod tests;
