use std::collections::BTreeMap;
#[cfg(unix)]
use std::os::fd::{FromRawFd, OwnedFd};
use std::os::raw::c_int;

use crate::ipc::keys::job;
use crate::ipc::value::Value;
use crate::ipc::{LaunchError, Result};

/// Job dictionary returned to a launchd-spawned process on check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkin {
	job: BTreeMap<String, Value>,
}

impl Checkin {
	/// Wrap a decoded check-in response, which must be a map.
	pub fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Map(job) => Ok(Self { job }),
			other => Err(LaunchError::UnexpectedResponse {
				expected: "map",
				got: other.kind(),
			}),
		}
	}

	/// Job label.
	pub fn label(&self) -> Option<&str> {
		self.job.get(job::LABEL).and_then(Value::as_str)
	}

	/// Look up any top-level job key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.job.get(key)
	}

	/// Borrow the whole job dictionary.
	pub fn as_map(&self) -> &BTreeMap<String, Value> {
		&self.job
	}

	/// Descriptor numbers of the socket list `name` from the job's
	/// `Sockets` dictionary.
	pub fn socket_fds(&self, name: &str) -> Result<Vec<c_int>> {
		let items = self
			.job
			.get(job::SOCKETS)
			.and_then(|sockets| sockets.get(name))
			.ok_or_else(|| LaunchError::NoSockets { name: name.to_owned() })?;
		fds_from_value(items)
	}

	/// Take ownership of the socket list `name`.
	///
	/// The entry is removed, so each descriptor can be claimed only once.
	#[cfg(unix)]
	pub fn take_sockets(&mut self, name: &str) -> Result<Vec<OwnedFd>> {
		let fds = self.socket_fds(name)?;
		if let Some(Value::Map(sockets)) = self.job.get_mut(job::SOCKETS) {
			sockets.remove(name);
		}

		Ok(fds
			.into_iter()
			// SAFETY: launchd hands these descriptors to the checked-in process,
			// and the entry was just removed so no other caller can wrap them.
			.map(|fd| unsafe { OwnedFd::from_raw_fd(fd) })
			.collect())
	}
}

fn fds_from_value(value: &Value) -> Result<Vec<c_int>> {
	let items = value.as_array().ok_or(LaunchError::UnexpectedResponse {
		expected: "array",
		got: value.kind(),
	})?;

	items
		.iter()
		.map(|item| {
			item.as_integer()
				.and_then(|fd| c_int::try_from(fd).ok())
				.ok_or(LaunchError::UnexpectedResponse {
					expected: "integer",
					got: item.kind(),
				})
		})
		.collect()
}
