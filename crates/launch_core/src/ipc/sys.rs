//! Native `launch_msg` transport for macOS.

use std::borrow::Cow;
use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::io;
use std::marker::{PhantomData, PhantomPinned};
use std::ops::Deref;
use std::ptr::NonNull;

use crate::ipc::data::{DataType, Item, ItemRef, LaunchData};
use crate::ipc::transport::{Transport, transport_failed};
use crate::ipc::{LaunchError, Result};

/// Opaque native launch data node (`struct _launch_data`).
///
/// Only ever handled by reference into a tree owned by a [`NativeData`].
#[repr(C)]
pub struct RawData {
	_data: [u8; 0],
	_marker: PhantomData<(*mut u8, PhantomPinned)>,
}

type LaunchDataPtr = *mut RawData;
type DictVisitor = unsafe extern "C" fn(item: LaunchDataPtr, key: *const c_char, context: *mut c_void);

unsafe extern "C" {
	fn launch_msg(request: LaunchDataPtr) -> LaunchDataPtr;

	fn launch_data_alloc(kind: u32) -> LaunchDataPtr;
	fn launch_data_free(item: LaunchDataPtr);
	fn launch_data_get_type(item: *const RawData) -> u32;

	fn launch_data_dict_insert(dict: LaunchDataPtr, item: LaunchDataPtr, key: *const c_char) -> bool;
	fn launch_data_dict_iterate(dict: *const RawData, visitor: DictVisitor, context: *mut c_void);

	fn launch_data_array_set_index(array: LaunchDataPtr, item: LaunchDataPtr, index: usize) -> bool;
	fn launch_data_array_get_index(array: *const RawData, index: usize) -> LaunchDataPtr;
	fn launch_data_array_get_count(array: *const RawData) -> usize;

	fn launch_data_new_fd(fd: c_int) -> LaunchDataPtr;
	fn launch_data_new_machport(port: u32) -> LaunchDataPtr;
	fn launch_data_new_integer(value: i64) -> LaunchDataPtr;
	fn launch_data_new_bool(value: bool) -> LaunchDataPtr;
	fn launch_data_new_real(value: f64) -> LaunchDataPtr;
	fn launch_data_new_string(text: *const c_char) -> LaunchDataPtr;
	fn launch_data_new_opaque(bytes: *const c_void, len: usize) -> LaunchDataPtr;
	fn launch_data_new_errno(code: c_int) -> LaunchDataPtr;

	fn launch_data_get_fd(item: *const RawData) -> c_int;
	fn launch_data_get_machport(item: *const RawData) -> u32;
	fn launch_data_get_integer(item: *const RawData) -> i64;
	fn launch_data_get_bool(item: *const RawData) -> bool;
	fn launch_data_get_real(item: *const RawData) -> f64;
	fn launch_data_get_string(item: *const RawData) -> *const c_char;
	fn launch_data_get_opaque(item: *const RawData) -> *mut c_void;
	fn launch_data_get_opaque_size(item: *const RawData) -> usize;
	fn launch_data_get_errno(item: *const RawData) -> c_int;
}

/// Transport talking to the running launchd through `launch_msg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launchd;

impl Transport for Launchd {
	type Node = RawData;
	type Response = NativeData;

	fn exchange(&self, request: &LaunchData) -> Result<NativeData> {
		let request = NativeData::build(request)?;
		// SAFETY: `request` is a valid tree we own; launch_msg does not take ownership.
		let raw = unsafe { launch_msg(request.ptr.as_ptr()) };
		NonNull::new(raw)
			.map(|ptr| NativeData { ptr })
			.ok_or_else(|| transport_failed(io::Error::last_os_error()))
	}
}

/// Owned native launch data tree, freed on drop.
pub struct NativeData {
	ptr: NonNull<RawData>,
}

impl NativeData {
	/// Convert an owned tree into a native tree.
	fn build(data: &LaunchData) -> Result<Self> {
		let encode_failed = || LaunchError::EncodingFailed { text: describe(data) };

		// SAFETY: constructors take plain values or pointers valid for the call.
		let raw = unsafe {
			match data {
				LaunchData::Dictionary(_) => launch_data_alloc(DataType::Dictionary as u32),
				LaunchData::Array(_) => launch_data_alloc(DataType::Array as u32),
				LaunchData::Fd(fd) => launch_data_new_fd(*fd),
				LaunchData::Integer(value) => launch_data_new_integer(*value),
				LaunchData::Real(value) => launch_data_new_real(*value),
				LaunchData::Bool(value) => launch_data_new_bool(*value),
				LaunchData::String(text) => launch_data_new_string(text.as_ptr()),
				LaunchData::Opaque { bytes, len } => {
					let len = (*len).min(bytes.len());
					launch_data_new_opaque(bytes.as_ptr().cast(), len)
				}
				LaunchData::Errno(code) => launch_data_new_errno(*code),
				LaunchData::MachPort(port) => launch_data_new_machport(*port),
			}
		};
		let node = NonNull::new(raw).map(|ptr| Self { ptr }).ok_or_else(encode_failed)?;

		match data {
			LaunchData::Dictionary(entries) => {
				for (key, value) in entries {
					let key = CString::new(key.as_str()).map_err(|_| LaunchError::EncodingFailed { text: key.clone() })?;
					let child = Self::build(value)?;
					// SAFETY: both pointers are live; on success the dictionary owns `child`.
					if !unsafe { launch_data_dict_insert(node.ptr.as_ptr(), child.ptr.as_ptr(), key.as_ptr()) } {
						return Err(encode_failed());
					}
					std::mem::forget(child);
				}
			}
			LaunchData::Array(items) => {
				for (index, value) in items.iter().enumerate() {
					let child = Self::build(value)?;
					// SAFETY: both pointers are live; on success the array owns `child`.
					if !unsafe { launch_data_array_set_index(node.ptr.as_ptr(), child.ptr.as_ptr(), index) } {
						return Err(encode_failed());
					}
					std::mem::forget(child);
				}
			}
			_ => {}
		}

		Ok(node)
	}
}

impl Deref for NativeData {
	type Target = RawData;

	fn deref(&self) -> &RawData {
		// SAFETY: the pointer is non-null and the tree lives until drop.
		unsafe { self.ptr.as_ref() }
	}
}

impl Drop for NativeData {
	fn drop(&mut self) {
		// SAFETY: we own the root; freeing it releases the whole tree exactly once.
		unsafe { launch_data_free(self.ptr.as_ptr()) }
	}
}

impl Item for RawData {
	fn view(&self) -> Result<ItemRef<'_, Self>> {
		let this: *const RawData = self;
		// SAFETY: `self` is a live node; each accessor is only called for its own tag.
		unsafe {
			Ok(match DataType::try_from(launch_data_get_type(this))? {
				DataType::Dictionary => {
					let mut entries: Vec<(Cow<'_, str>, &RawData)> = Vec::new();
					launch_data_dict_iterate(this, collect_entry, (&raw mut entries).cast());
					ItemRef::Dictionary(entries)
				}
				DataType::Array => {
					let count = launch_data_array_get_count(this);
					let mut items = Vec::with_capacity(count);
					for index in 0..count {
						// a hole would shift every later index
						let child = launch_data_array_get_index(this, index).as_ref().ok_or(LaunchError::UnexpectedResponse {
							expected: "array element",
							got: "null",
						})?;
						items.push(child);
					}
					ItemRef::Array(items)
				}
				DataType::Fd => ItemRef::Fd(launch_data_get_fd(this)),
				DataType::Integer => ItemRef::Integer(launch_data_get_integer(this)),
				DataType::Real => ItemRef::Real(launch_data_get_real(this)),
				DataType::Bool => ItemRef::Bool(launch_data_get_bool(this)),
				DataType::String => ItemRef::String(CStr::from_ptr(launch_data_get_string(this)).to_bytes()),
				DataType::Opaque => {
					let len = launch_data_get_opaque_size(this);
					let bytes = launch_data_get_opaque(this);
					if bytes.is_null() || len == 0 {
						ItemRef::Opaque(&[])
					} else {
						ItemRef::Opaque(std::slice::from_raw_parts(bytes.cast::<u8>(), len))
					}
				}
				DataType::Errno => ItemRef::Errno(launch_data_get_errno(this)),
				DataType::MachPort => ItemRef::MachPort(launch_data_get_machport(this)),
			})
		}
	}
}

unsafe extern "C" fn collect_entry(item: LaunchDataPtr, key: *const c_char, context: *mut c_void) {
	// SAFETY: `context` is the entries vector passed by `view`, and `item`/`key`
	// point into the dictionary being iterated, which outlives the vector.
	unsafe {
		let entries = &mut *context.cast::<Vec<(Cow<'_, str>, &RawData)>>();
		if let Some(child) = item.as_ref() {
			entries.push((CStr::from_ptr(key).to_string_lossy(), child));
		}
	}
}

fn describe(data: &LaunchData) -> String {
	match data {
		LaunchData::String(text) => text.to_string_lossy().into_owned(),
		other => other.data_type().as_str().to_owned(),
	}
}

#[cfg(test)]
mod tests;
