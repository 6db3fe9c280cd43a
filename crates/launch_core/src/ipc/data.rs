use std::borrow::Cow;
use std::ffi::CString;

use crate::ipc::{LaunchError, Result};

/// Tag of a launch data item, numbered as `launch_data_type_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataType {
	/// Keyed collection of child items.
	Dictionary = 1,
	/// Indexed sequence of child items.
	Array = 2,
	/// File descriptor number.
	Fd = 3,
	/// Signed 64-bit integer.
	Integer = 4,
	/// Double-precision float.
	Real = 5,
	/// Boolean.
	Bool = 6,
	/// NUL-terminated text.
	String = 7,
	/// Byte buffer with an explicit length.
	Opaque = 8,
	/// Error code.
	Errno = 9,
	/// Mach port name.
	MachPort = 10,
}

impl DataType {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Dictionary => "dictionary",
			Self::Array => "array",
			Self::Fd => "fd",
			Self::Integer => "integer",
			Self::Real => "real",
			Self::Bool => "bool",
			Self::String => "string",
			Self::Opaque => "opaque",
			Self::Errno => "errno",
			Self::MachPort => "machport",
		}
	}
}

impl TryFrom<u32> for DataType {
	type Error = LaunchError;

	fn try_from(tag: u32) -> Result<Self> {
		Ok(match tag {
			1 => Self::Dictionary,
			2 => Self::Array,
			3 => Self::Fd,
			4 => Self::Integer,
			5 => Self::Real,
			6 => Self::Bool,
			7 => Self::String,
			8 => Self::Opaque,
			9 => Self::Errno,
			10 => Self::MachPort,
			_ => return Err(LaunchError::UnknownVariant { tag }),
		})
	}
}

/// Owned launch data tree.
///
/// Used to build requests and to stand in for transport responses. The
/// native tree returned by `launch_msg` is read through [`Item`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchData {
	/// Key/child pairs in iteration order. Keys are unique by protocol
	/// contract; duplicates are kept as-is so malformed input stays
	/// representable.
	Dictionary(Vec<(String, LaunchData)>),
	/// Children in index order.
	Array(Vec<LaunchData>),
	/// File descriptor number.
	Fd(i32),
	/// Signed integer.
	Integer(i64),
	/// Float.
	Real(f64),
	/// Boolean.
	Bool(bool),
	/// Text without interior NUL bytes.
	String(CString),
	/// Byte buffer; only the first `len` bytes belong to the value.
	Opaque {
		/// Backing buffer, possibly longer than `len`.
		bytes: Vec<u8>,
		/// Declared payload length.
		len: usize,
	},
	/// Error code.
	Errno(i32),
	/// Mach port name.
	MachPort(u32),
}

impl LaunchData {
	/// Build a string item, failing on interior NUL bytes.
	pub fn string(text: &str) -> Result<Self> {
		CString::new(text)
			.map(Self::String)
			.map_err(|_| LaunchError::EncodingFailed { text: text.to_owned() })
	}

	/// Build an opaque item whose length is the whole buffer.
	pub fn opaque(bytes: Vec<u8>) -> Self {
		let len = bytes.len();
		Self::Opaque { bytes, len }
	}

	/// Build a dictionary from key/child pairs, keeping their order.
	pub fn dictionary<K: Into<String>>(entries: impl IntoIterator<Item = (K, LaunchData)>) -> Self {
		Self::Dictionary(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Build an array from children, keeping their order.
	pub fn array(items: impl IntoIterator<Item = LaunchData>) -> Self {
		Self::Array(items.into_iter().collect())
	}

	/// Tag of this item.
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Dictionary(_) => DataType::Dictionary,
			Self::Array(_) => DataType::Array,
			Self::Fd(_) => DataType::Fd,
			Self::Integer(_) => DataType::Integer,
			Self::Real(_) => DataType::Real,
			Self::Bool(_) => DataType::Bool,
			Self::String(_) => DataType::String,
			Self::Opaque { .. } => DataType::Opaque,
			Self::Errno(_) => DataType::Errno,
			Self::MachPort(_) => DataType::MachPort,
		}
	}

	/// Look up the first child stored under `key` in a dictionary item.
	pub fn lookup(&self, key: &str) -> Option<&LaunchData> {
		match self {
			Self::Dictionary(entries) => entries.iter().find(|(name, _)| name == key).map(|(_, value)| value),
			_ => None,
		}
	}
}

impl From<i64> for LaunchData {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for LaunchData {
	fn from(value: f64) -> Self {
		Self::Real(value)
	}
}

impl From<bool> for LaunchData {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

/// Borrowed view of one tagged item, produced after reading its tag.
#[derive(Debug)]
pub enum ItemRef<'a, T: ?Sized> {
	/// Key/child pairs in source iteration order.
	Dictionary(Vec<(Cow<'a, str>, &'a T)>),
	/// Children in index order.
	Array(Vec<&'a T>),
	/// File descriptor number.
	Fd(i32),
	/// Signed integer.
	Integer(i64),
	/// Float.
	Real(f64),
	/// Boolean.
	Bool(bool),
	/// Text bytes without the terminator.
	String(&'a [u8]),
	/// Exactly the declared number of payload bytes.
	Opaque(&'a [u8]),
	/// Error code.
	Errno(i32),
	/// Mach port name.
	MachPort(u32),
}

impl<T: ?Sized> ItemRef<'_, T> {
	/// Tag this view was produced for.
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Dictionary(_) => DataType::Dictionary,
			Self::Array(_) => DataType::Array,
			Self::Fd(_) => DataType::Fd,
			Self::Integer(_) => DataType::Integer,
			Self::Real(_) => DataType::Real,
			Self::Bool(_) => DataType::Bool,
			Self::String(_) => DataType::String,
			Self::Opaque(_) => DataType::Opaque,
			Self::Errno(_) => DataType::Errno,
			Self::MachPort(_) => DataType::MachPort,
		}
	}
}

/// Read-only access to a tagged launch data node.
///
/// Implementations must read the tag first and then only the payload
/// accessor that matches it.
pub trait Item {
	/// Inspect the tag and borrow the matching payload.
	fn view(&self) -> Result<ItemRef<'_, Self>>;
}

impl Item for LaunchData {
	fn view(&self) -> Result<ItemRef<'_, Self>> {
		Ok(match self {
			Self::Dictionary(entries) => ItemRef::Dictionary(entries.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value)).collect()),
			Self::Array(items) => ItemRef::Array(items.iter().collect()),
			Self::Fd(fd) => ItemRef::Fd(*fd),
			Self::Integer(value) => ItemRef::Integer(*value),
			Self::Real(value) => ItemRef::Real(*value),
			Self::Bool(value) => ItemRef::Bool(*value),
			Self::String(text) => ItemRef::String(text.as_bytes()),
			Self::Opaque { bytes, len } => ItemRef::Opaque(&bytes[..(*len).min(bytes.len())]),
			Self::Errno(code) => ItemRef::Errno(*code),
			Self::MachPort(port) => ItemRef::MachPort(*port),
		})
	}
}
