use std::collections::BTreeMap;

/// Host value produced by decoding launch data.
///
/// The mapping from tags is intentionally lossy: `String` and `Opaque` items
/// both become [`Value::String`], and `Integer`, `Fd`, and `Errno` items all
/// become [`Value::Integer`]. Mach ports become [`Value::Null`]. Callers rely
/// on this shape, so it is part of the contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Dropped payload (Mach port).
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer, file descriptor, or errno.
	Integer(i64),
	/// Float scalar.
	Float(f64),
	/// Byte string from text or opaque data.
	String(Vec<u8>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Dictionary keyed by string.
	Map(BTreeMap<String, Value>),
}

impl Value {
	/// Stable lowercase kind label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Integer(_) => "integer",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
		}
	}

	/// Borrow map entries.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow array items.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Integer payload.
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(value) => Some(*value),
			_ => None,
		}
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Raw byte-string payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::String(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Byte-string payload when it is valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
	}

	/// Look up a key on a map value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map().and_then(|map| map.get(key))
	}

	/// Whether this is the null marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.as_bytes().to_vec())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
