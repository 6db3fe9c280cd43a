//! Public library API for talking to `launchd` through `launch_msg`.

/// Tagged launch data, message codec, transports, and the request client.
pub mod ipc;
