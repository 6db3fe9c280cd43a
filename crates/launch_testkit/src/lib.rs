//! Fixture helpers shared by the launch crates' tests.

use std::path::{Path, PathBuf};

/// Replay fixture recording `GetJobs`, `GetJob`, `StartJob`, and `CheckIn`.
pub const JOBS_FIXTURE: &str = "getjobs.json";

/// Path of a file under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(name)
}

/// Path of [`JOBS_FIXTURE`].
pub fn jobs_fixture() -> PathBuf {
	fixture_path(JOBS_FIXTURE)
}

/// Parse a fixture as JSON, panicking with the path on failure.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("parse fixture {}: {err}", path.display()))
}
