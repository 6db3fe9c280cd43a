use launch::ipc::{Client, Result, Transport};

use crate::cmd::print::{PrintOptions, print_value, value_to_json};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Message string, e.g. `GetJobs` or `CheckIn`.
	pub key: String,
	#[arg(long)]
	pub json: bool,
}

/// Send one raw message string and print the decoded response.
pub fn run<T: Transport>(client: &Client<T>, args: Args) -> Result<()> {
	let value = client.message(&args.key)?;

	if args.json {
		emit_json(&value_to_json(&value));
	} else {
		print_value(&value, 0, PrintOptions::default());
	}
	Ok(())
}
