use std::collections::BTreeMap;

use crate::ipc::data::{Item, ItemRef, LaunchData};
use crate::ipc::value::Value;
use crate::ipc::{LaunchError, Result};

/// Runtime limits for launch data decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 512 }
	}
}

/// Decode a tagged item tree into a host value tree.
///
/// The input is only borrowed; releasing it stays with the owner.
pub fn decode_item<T: Item + ?Sized>(item: &T, opt: &DecodeOptions) -> Result<Value> {
	decode_impl(item, opt, 0)
}

/// Wrap request text as a string-tagged item.
pub fn encode_message(text: &str) -> Result<LaunchData> {
	LaunchData::string(text)
}

fn decode_impl<T: Item + ?Sized>(item: &T, opt: &DecodeOptions, depth: u32) -> Result<Value> {
	if depth >= opt.max_depth {
		return Err(LaunchError::DecodeDepthExceeded { max_depth: opt.max_depth });
	}

	let value = match item.view()? {
		ItemRef::Dictionary(entries) => {
			let mut map = BTreeMap::new();
			for (key, child) in entries {
				// duplicate keys: last one wins
				map.insert(key.into_owned(), decode_impl(child, opt, depth + 1)?);
			}
			Value::Map(map)
		}
		ItemRef::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for child in items {
				out.push(decode_impl(child, opt, depth + 1)?);
			}
			Value::Array(out)
		}
		ItemRef::Fd(fd) => Value::Integer(i64::from(fd)),
		ItemRef::Integer(value) => Value::Integer(value),
		ItemRef::Errno(code) => Value::Integer(i64::from(code)),
		ItemRef::Real(value) => Value::Float(value),
		ItemRef::Bool(value) => Value::Bool(value),
		ItemRef::String(bytes) | ItemRef::Opaque(bytes) => Value::String(bytes.to_vec()),
		ItemRef::MachPort(_) => Value::Null,
	};

	Ok(value)
}

#[cfg(test)]
mod tests;
