/// Check-in command.
pub mod checkin;
/// Sample echo server on checked-in sockets.
pub mod echo;
/// Single-job commands.
pub mod job;
/// Job listing command.
pub mod jobs;
/// Key table listing command.
pub mod keys;
/// Raw message command.
pub mod msg;
/// Decoded value rendering.
pub mod print;
pub(crate) mod util;
