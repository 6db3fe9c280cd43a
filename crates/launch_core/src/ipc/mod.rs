mod checkin;
mod client;
mod data;
mod decode;
mod error;
pub mod keys;
#[cfg(target_os = "macos")]
mod sys;
mod transport;
mod value;

/// Check-in result and socket helpers.
pub use checkin::Checkin;
/// Request/response client.
pub use client::Client;
/// Tagged data model and read-only item views.
pub use data::{DataType, Item, ItemRef, LaunchData};
/// Codec entry points and options.
pub use decode::{DecodeOptions, decode_item, encode_message};
/// Error and result aliases.
pub use error::{LaunchError, Result};
/// Operation keys.
pub use keys::MessageKey;
/// Native launchd transport.
#[cfg(target_os = "macos")]
pub use sys::{Launchd, NativeData, RawData};
/// Exchange contract and non-native transports.
pub use transport::{Replay, Scripted, Transport};
/// Decoded host value.
pub use value::Value;
