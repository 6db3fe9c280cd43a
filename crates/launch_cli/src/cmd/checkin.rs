use launch::ipc::{Client, Result, Transport, Value};

use crate::cmd::print::{PrintOptions, print_value, value_to_json};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// Check in and print the calling job's dictionary.
pub fn run<T: Transport>(client: &Client<T>, args: Args) -> Result<()> {
	let value = match client.checkin()? {
		Some(checkin) => Value::Map(checkin.as_map().clone()),
		None => Value::Null,
	};

	if args.json {
		emit_json(&value_to_json(&value));
	} else {
		print_value(&value, 0, PrintOptions::for_job());
	}
	Ok(())
}
