use std::io;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Errors produced while encoding, exchanging, and decoding launch messages.
#[derive(Debug, Error)]
pub enum LaunchError {
	/// A request value could not be constructed from the given text.
	#[error("unable to create message {text:?}")]
	EncodingFailed {
		/// Text that failed to encode.
		text: String,
	},
	/// The exchange primitive itself failed.
	#[error("{op}: {source}")]
	TransportFailed {
		/// Name of the attempted operation.
		op: &'static str,
		/// Underlying OS error.
		#[source]
		source: io::Error,
	},
	/// launchd answered with an errno-tagged response.
	#[error("{op}: {}", describe_errno(.code))]
	OperationErrno {
		/// Name of the attempted operation.
		op: &'static str,
		/// Errno carried by the response.
		code: i32,
	},
	/// Decode met a tag outside the known set (protocol version mismatch).
	#[error("unknown item type {tag}")]
	UnknownVariant {
		/// Observed raw tag.
		tag: u32,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Check-in data has no socket list under the requested name.
	#[error("no sockets found for {name:?}")]
	NoSockets {
		/// Socket list name from the job's `Sockets` dictionary.
		name: String,
	},
	/// Response had a different shape than the operation expects.
	#[error("unexpected response: expected {expected}, got {got}")]
	UnexpectedResponse {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual logical value kind.
		got: &'static str,
	},
	/// No native launchd transport exists on this platform.
	#[error("launchd transport is unavailable on this platform")]
	TransportUnavailable,
	/// Filesystem or stream IO failure outside the exchange itself.
	#[error("io: {0}")]
	Io(#[from] io::Error),
	/// Replay fixture could not be interpreted.
	#[error("invalid replay fixture: {reason}")]
	InvalidReplay {
		/// What was wrong with the fixture.
		reason: String,
	},
}

impl LaunchError {
	/// OS error code carried by transport or errno failures.
	pub fn raw_os_error(&self) -> Option<i32> {
		match self {
			Self::OperationErrno { code, .. } => Some(*code),
			Self::TransportFailed { source, .. } => source.raw_os_error(),
			_ => None,
		}
	}
}

fn describe_errno(code: &i32) -> io::Error {
	io::Error::from_raw_os_error(*code)
}
