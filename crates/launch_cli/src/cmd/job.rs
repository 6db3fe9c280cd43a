use launch::ipc::{Client, LaunchError, Result, Transport, Value};

use crate::cmd::print::{PrintOptions, print_value, value_to_json};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct ShowArgs {
	pub label: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(clap::Args)]
pub struct LabelArgs {
	pub label: String,
}

/// Job control request sent by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	/// `StartJob`.
	Start,
	/// `StopJob`.
	Stop,
	/// `RemoveJob`.
	Remove,
}

impl Action {
	fn as_str(self) -> &'static str {
		match self {
			Self::Start => "started",
			Self::Stop => "stopped",
			Self::Remove => "removed",
		}
	}
}

/// Print one job dictionary.
pub fn show<T: Transport>(client: &Client<T>, args: ShowArgs) -> Result<()> {
	let value = client.get_job(&args.label)?;

	if args.json {
		emit_json(&value_to_json(&value));
	} else {
		print_value(&value, 0, PrintOptions::for_job());
	}
	Ok(())
}

/// Start, stop, or remove a job.
///
/// launchd acknowledges these with a zero errno, which the client reports as
/// an operation error; only that code counts as success here.
pub fn control<T: Transport>(client: &Client<T>, action: Action, args: LabelArgs) -> Result<()> {
	let result = match action {
		Action::Start => client.start_job(&args.label),
		Action::Stop => client.stop_job(&args.label),
		Action::Remove => client.remove_job(&args.label),
	};

	match acknowledged(result)? {
		Value::Null => println!("{}: {}", action.as_str(), args.label),
		other => print_value(&other, 0, PrintOptions::default()),
	}
	Ok(())
}

fn acknowledged(result: Result<Value>) -> Result<Value> {
	match result {
		Err(LaunchError::OperationErrno { code: 0, .. }) => Ok(Value::Null),
		other => other,
	}
}
