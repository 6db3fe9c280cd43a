use launch::ipc::Result;
use launch::ipc::keys::{KeyGroup, groups};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Only list one table: msg, job, socket, policy, or misc.
	#[arg(long, value_parser = ["msg", "job", "socket", "policy", "misc"])]
	pub group: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// List protocol key constants.
pub fn run(args: Args) -> Result<()> {
	let selected: Vec<&KeyGroup> = groups()
		.iter()
		.filter(|item| args.group.as_deref().is_none_or(|name| name == item.name))
		.collect();

	if args.json {
		let payload: Vec<GroupJson> = selected
			.iter()
			.map(|item| GroupJson {
				group: item.name,
				keys: item.entries.iter().map(|&(name, value)| KeyJson { name, value }).collect(),
			})
			.collect();
		emit_json(&payload);
		return Ok(());
	}

	println!("group\tname\tvalue");
	for item in selected {
		for (name, value) in item.entries {
			println!("{}\t{name}\t{value}", item.name);
		}
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct GroupJson {
	group: &'static str,
	keys: Vec<KeyJson>,
}

#[derive(serde::Serialize)]
struct KeyJson {
	name: &'static str,
	value: &'static str,
}
