use launch::ipc::keys::job;
use launch::ipc::{Client, LaunchError, Result, Transport, Value};

use crate::cmd::util::{emit_json, int_cell};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// One row of the job listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JobRow {
	label: String,
	pid: Option<i64>,
	last_exit_status: Option<i64>,
}

/// List every job with its PID and last exit status.
pub fn run<T: Transport>(client: &Client<T>, args: Args) -> Result<()> {
	let rows = job_rows(&client.get_jobs()?)?;

	if args.json {
		emit_json(&JobsJson { count: rows.len(), jobs: rows });
		return Ok(());
	}

	println!("pid\tstatus\tlabel");
	for row in &rows {
		println!("{}\t{}\t{}", int_cell(row.pid), int_cell(row.last_exit_status), row.label);
	}
	Ok(())
}

/// Flatten a `GetJobs` answer into rows ordered by label.
pub(crate) fn job_rows(jobs: &Value) -> Result<Vec<JobRow>> {
	let map = jobs.as_map().ok_or(LaunchError::UnexpectedResponse {
		expected: "map",
		got: jobs.kind(),
	})?;

	Ok(map
		.iter()
		.map(|(label, item)| JobRow {
			label: label.clone(),
			pid: item.get(job::PID).and_then(Value::as_integer),
			last_exit_status: item.get(job::LASTEXITSTATUS).and_then(Value::as_integer),
		})
		.collect())
}

#[derive(serde::Serialize)]
struct JobsJson {
	count: usize,
	jobs: Vec<JobRow>,
}
