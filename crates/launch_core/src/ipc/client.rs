use tracing::{debug, warn};

use crate::ipc::checkin::Checkin;
use crate::ipc::data::{Item, ItemRef, LaunchData};
use crate::ipc::decode::{DecodeOptions, decode_item, encode_message};
use crate::ipc::keys::MessageKey;
use crate::ipc::transport::{EXCHANGE_OP, Transport};
use crate::ipc::value::Value;
use crate::ipc::{LaunchError, Result};

/// Blocking launchd client over a [`Transport`].
///
/// Every call is one request and one response; nothing is shared between
/// calls and nothing is retried.
#[derive(Debug)]
pub struct Client<T> {
	transport: T,
	options: DecodeOptions,
}

impl<T: Transport> Client<T> {
	/// Create a client with default decode options.
	pub fn new(transport: T) -> Self {
		Self::with_options(transport, DecodeOptions::default())
	}

	/// Create a client with explicit decode options.
	pub fn with_options(transport: T, options: DecodeOptions) -> Self {
		Self { transport, options }
	}

	/// Borrow the underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Send a string message such as `"GetJobs"` and decode the answer.
	pub fn message(&self, text: &str) -> Result<Value> {
		let request = encode_message(text)?;
		self.request(&request)
	}

	/// Send an arbitrary request tree and decode the answer.
	pub fn request(&self, request: &LaunchData) -> Result<Value> {
		debug!(kind = request.data_type().as_str(), "sending launch request");

		let response = self.transport.exchange(request).inspect_err(|err| warn!(error = %err, "launch exchange failed"))?;

		if let ItemRef::Errno(code) = response.view()? {
			warn!(code, "launchd returned errno");
			return Err(LaunchError::OperationErrno { op: EXCHANGE_OP, code });
		}

		let value = decode_item(&*response, &self.options)?;
		debug!(kind = value.kind(), "decoded launch response");
		Ok(value)
	}

	/// Fetch every job keyed by label.
	pub fn get_jobs(&self) -> Result<Value> {
		self.message(MessageKey::GetJobs.as_str())
	}

	/// Fetch one job dictionary.
	pub fn get_job(&self, label: &str) -> Result<Value> {
		self.labeled(MessageKey::GetJob, label)
	}

	/// Start a loaded job.
	pub fn start_job(&self, label: &str) -> Result<Value> {
		self.labeled(MessageKey::StartJob, label)
	}

	/// Stop a running job.
	pub fn stop_job(&self, label: &str) -> Result<Value> {
		self.labeled(MessageKey::StopJob, label)
	}

	/// Remove a job from launchd.
	pub fn remove_job(&self, label: &str) -> Result<Value> {
		self.labeled(MessageKey::RemoveJob, label)
	}

	/// Submit a job dictionary.
	pub fn submit_job(&self, job: &LaunchData) -> Result<Value> {
		let request = LaunchData::dictionary([(MessageKey::SubmitJob.as_str(), job.clone())]);
		self.request(&request)
	}

	/// Check in with launchd and fetch this job's own dictionary.
	///
	/// Returns `None` when launchd answers with nothing representable.
	pub fn checkin(&self) -> Result<Option<Checkin>> {
		match self.message(MessageKey::CheckIn.as_str())? {
			Value::Null => Ok(None),
			value => Checkin::from_value(value).map(Some),
		}
	}

	fn labeled(&self, key: MessageKey, label: &str) -> Result<Value> {
		let request = LaunchData::dictionary([(key.as_str(), LaunchData::string(label)?)]);
		self.request(&request)
	}
}

#[cfg(test)]
mod tests;
