#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use launch::ipc::{Client, DecodeOptions, Replay, Result, Transport};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "launchmsg", about = "Talk to launchd through launch_msg")]
struct Cli {
	/// Answer requests from a recorded JSON fixture instead of launchd.
	#[arg(long, global = true)]
	replay: Option<PathBuf>,
	/// Maximum nesting depth accepted when decoding responses.
	#[arg(long, global = true)]
	max_depth: Option<u32>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Send a raw message string and print the decoded answer.
	Msg(cmd::msg::Args),
	/// List jobs known to launchd.
	Jobs(cmd::jobs::Args),
	/// Print one job dictionary.
	Job(cmd::job::ShowArgs),
	/// Start a job by label.
	Start(cmd::job::LabelArgs),
	/// Stop a job by label.
	Stop(cmd::job::LabelArgs),
	/// Remove a job by label.
	Remove(cmd::job::LabelArgs),
	/// Check in and print this job's dictionary.
	Checkin(cmd::checkin::Args),
	/// List protocol key constants.
	Keys(cmd::keys::Args),
	/// Echo lines back on checked-in listening sockets.
	Echo(cmd::echo::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	if let Commands::Keys(args) = cli.command {
		return cmd::keys::run(args);
	}

	let mut options = DecodeOptions::default();
	if let Some(max_depth) = cli.max_depth {
		options.max_depth = max_depth;
	}

	match cli.replay {
		Some(path) => {
			let replay = Replay::open(&path)?;
			tracing::debug!(path = %path.display(), "using replay transport");
			dispatch(Client::with_options(replay, options), cli.command)
		}
		None => run_native(options, cli.command),
	}
}

#[cfg(target_os = "macos")]
fn run_native(options: DecodeOptions, command: Commands) -> Result<()> {
	dispatch(Client::with_options(launch::ipc::Launchd, options), command)
}

#[cfg(not(target_os = "macos"))]
fn run_native(_options: DecodeOptions, _command: Commands) -> Result<()> {
	Err(launch::ipc::LaunchError::TransportUnavailable)
}

fn dispatch<T: Transport>(client: Client<T>, command: Commands) -> Result<()> {
	match command {
		Commands::Msg(args) => cmd::msg::run(&client, args),
		Commands::Jobs(args) => cmd::jobs::run(&client, args),
		Commands::Job(args) => cmd::job::show(&client, args),
		Commands::Start(args) => cmd::job::control(&client, cmd::job::Action::Start, args),
		Commands::Stop(args) => cmd::job::control(&client, cmd::job::Action::Stop, args),
		Commands::Remove(args) => cmd::job::control(&client, cmd::job::Action::Remove, args),
		Commands::Checkin(args) => cmd::checkin::run(&client, args),
		Commands::Keys(args) => cmd::keys::run(args),
		Commands::Echo(args) => cmd::echo::run(&client, args),
	}
}
