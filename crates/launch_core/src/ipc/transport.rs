use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::Path;

use crate::ipc::data::{Item, LaunchData};
use crate::ipc::{LaunchError, Result};

/// Operation name reported by exchange failures.
pub(crate) const EXCHANGE_OP: &str = "launch_msg";

/// One blocking request/response exchange with launchd.
///
/// Dropping a response releases it. An errno-tagged response is a normal
/// `Ok` here; interpreting it as failure is the caller's job. Failures of
/// the exchange itself are [`LaunchError::TransportFailed`].
pub trait Transport {
	/// Node type of response trees.
	type Node: Item + ?Sized;
	/// Owner of one response tree.
	type Response: Deref<Target = Self::Node>;

	/// Send `request` and block until launchd answers.
	fn exchange(&self, request: &LaunchData) -> Result<Self::Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
	type Node = T::Node;
	type Response = T::Response;

	fn exchange(&self, request: &LaunchData) -> Result<Self::Response> {
		(**self).exchange(request)
	}
}

/// In-memory transport answering from a queue of canned responses.
#[derive(Debug, Default)]
pub struct Scripted {
	responses: RefCell<VecDeque<io::Result<LaunchData>>>,
	requests: RefCell<Vec<LaunchData>>,
}

impl Scripted {
	/// Create an empty script.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue a successful response.
	pub fn respond(self, response: LaunchData) -> Self {
		self.responses.borrow_mut().push_back(Ok(response));
		self
	}

	/// Queue an exchange failure.
	pub fn fail(self, error: io::Error) -> Self {
		self.responses.borrow_mut().push_back(Err(error));
		self
	}

	/// Requests received so far, oldest first.
	pub fn requests(&self) -> Vec<LaunchData> {
		self.requests.borrow().clone()
	}

	/// Number of queued responses not yet consumed.
	pub fn pending(&self) -> usize {
		self.responses.borrow().len()
	}
}

impl Transport for Scripted {
	type Node = LaunchData;
	type Response = Box<LaunchData>;

	fn exchange(&self, request: &LaunchData) -> Result<Self::Response> {
		self.requests.borrow_mut().push(request.clone());
		let response = self
			.responses
			.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::UnexpectedEof, "scripted transport has no responses left")));
		response.map(Box::new).map_err(transport_failed)
	}
}

/// Transport answering from a recorded JSON fixture.
///
/// Fixture shape: `{"responses": {"<request key>": <item>, ...}}`. The
/// request key is the string request, or the single key of a dictionary
/// request. Items use plain JSON for dictionaries, arrays, integers, floats,
/// booleans, and strings, and single-key objects `{"@fd": n}`,
/// `{"@errno": n}`, `{"@machport": n}`, and `{"@opaque": [bytes]}` for the
/// remaining tags.
#[derive(Debug, Clone)]
pub struct Replay {
	responses: HashMap<String, LaunchData>,
}

impl Replay {
	/// Load a fixture file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let json: serde_json::Value = serde_json::from_slice(&raw).map_err(|err| LaunchError::InvalidReplay { reason: err.to_string() })?;
		Self::from_json(&json)
	}

	/// Build from an already parsed fixture document.
	pub fn from_json(json: &serde_json::Value) -> Result<Self> {
		let entries = json
			.get("responses")
			.and_then(serde_json::Value::as_object)
			.ok_or_else(|| invalid("missing \"responses\" object"))?;

		let mut responses = HashMap::with_capacity(entries.len());
		for (key, item) in entries {
			responses.insert(key.clone(), item_from_json(item)?);
		}
		Ok(Self { responses })
	}

	/// Recorded request keys.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.responses.keys().map(String::as_str)
	}
}

impl Transport for Replay {
	type Node = LaunchData;
	type Response = Box<LaunchData>;

	fn exchange(&self, request: &LaunchData) -> Result<Self::Response> {
		let key = request_key(request).map_err(transport_failed)?;
		self.responses
			.get(key)
			.cloned()
			.map(Box::new)
			.ok_or_else(|| transport_failed(io::Error::new(io::ErrorKind::NotFound, format!("no recorded response for {key:?}"))))
	}
}

fn request_key(request: &LaunchData) -> io::Result<&str> {
	match request {
		LaunchData::String(text) => text
			.to_str()
			.map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "request text is not utf-8")),
		LaunchData::Dictionary(entries) if entries.len() == 1 => Ok(entries[0].0.as_str()),
		other => Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("cannot replay a {} request", other.data_type().as_str()),
		)),
	}
}

fn item_from_json(json: &serde_json::Value) -> Result<LaunchData> {
	use serde_json::Value as Json;

	match json {
		Json::Object(map) => {
			if map.len() == 1
				&& let Some((tag, payload)) = map.iter().next()
				&& tag.starts_with('@')
			{
				return tagged_from_json(tag, payload);
			}
			let mut entries = Vec::with_capacity(map.len());
			for (key, value) in map {
				entries.push((key.clone(), item_from_json(value)?));
			}
			Ok(LaunchData::Dictionary(entries))
		}
		Json::Array(items) => items.iter().map(item_from_json).collect::<Result<Vec<_>>>().map(LaunchData::Array),
		Json::Bool(value) => Ok(LaunchData::Bool(*value)),
		Json::Number(number) => {
			if let Some(value) = number.as_i64() {
				Ok(LaunchData::Integer(value))
			} else {
				number.as_f64().map(LaunchData::Real).ok_or_else(|| invalid(format!("unrepresentable number {number}")))
			}
		}
		Json::String(text) => LaunchData::string(text).map_err(|_| invalid(format!("string {text:?} contains a NUL byte"))),
		Json::Null => Err(invalid("null has no launch data form")),
	}
}

fn tagged_from_json(tag: &str, payload: &serde_json::Value) -> Result<LaunchData> {
	match tag {
		"@fd" => Ok(LaunchData::Fd(json_i32(tag, payload)?)),
		"@errno" => Ok(LaunchData::Errno(json_i32(tag, payload)?)),
		"@machport" => payload
			.as_u64()
			.and_then(|value| u32::try_from(value).ok())
			.map(LaunchData::MachPort)
			.ok_or_else(|| invalid(format!("{tag} expects a 32-bit unsigned integer"))),
		"@opaque" => {
			let items = payload.as_array().ok_or_else(|| invalid(format!("{tag} expects a byte array")))?;
			let mut bytes = Vec::with_capacity(items.len());
			for item in items {
				let byte = item
					.as_u64()
					.and_then(|value| u8::try_from(value).ok())
					.ok_or_else(|| invalid(format!("{tag} element out of byte range: {item}")))?;
				bytes.push(byte);
			}
			Ok(LaunchData::opaque(bytes))
		}
		_ => Err(invalid(format!("unknown tag {tag}"))),
	}
}

fn json_i32(tag: &str, payload: &serde_json::Value) -> Result<i32> {
	payload
		.as_i64()
		.and_then(|value| i32::try_from(value).ok())
		.ok_or_else(|| invalid(format!("{tag} expects a 32-bit integer")))
}

pub(crate) fn transport_failed(source: io::Error) -> LaunchError {
	LaunchError::TransportFailed { op: EXCHANGE_OP, source }
}

fn invalid(reason: impl Into<String>) -> LaunchError {
	LaunchError::InvalidReplay { reason: reason.into() }
}
