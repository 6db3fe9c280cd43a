use std::io::{self, BufRead, Write};

use launch::ipc::{Client, Result, Transport};

#[derive(clap::Args)]
pub struct Args {
	/// Socket list name from the job's `Sockets` dictionary.
	#[arg(long, default_value = "EchoSocket")]
	pub socket: String,
}

/// Check in, claim the named listeners, and echo lines on every connection.
///
/// Returns once every listener has failed for good.
#[cfg(unix)]
pub fn run<T: Transport>(client: &Client<T>, args: Args) -> Result<()> {
	use std::net::TcpListener;
	use std::thread;

	use launch::ipc::LaunchError;

	let mut checkin = client.checkin()?.ok_or_else(|| LaunchError::NoSockets { name: args.socket.clone() })?;
	let listeners: Vec<TcpListener> = checkin.take_sockets(&args.socket)?.into_iter().map(TcpListener::from).collect();
	tracing::info!(socket = %args.socket, count = listeners.len(), "serving echo");

	let workers: Vec<_> = listeners.into_iter().map(|listener| thread::spawn(move || accept_loop(&listener))).collect();
	for worker in workers {
		match worker.join() {
			Ok(err) => tracing::warn!(error = %err, "echo listener stopped"),
			Err(_) => tracing::warn!("echo listener thread panicked"),
		}
	}
	Ok(())
}

#[cfg(not(unix))]
pub fn run<T: Transport>(_client: &Client<T>, _args: Args) -> Result<()> {
	Err(launch::ipc::LaunchError::TransportUnavailable)
}

/// Serve one listener until `accept` fails with an error that will not clear,
/// and return that error.
#[cfg(unix)]
pub(crate) fn accept_loop(listener: &std::net::TcpListener) -> io::Error {
	loop {
		let stream = match listener.accept() {
			Ok((stream, _)) => stream,
			Err(err) if is_transient(&err) => {
				tracing::debug!(error = %err, "accept interrupted");
				continue;
			}
			Err(err) => return err,
		};
		let peer = stream.peer_addr().map(|addr| addr.to_string()).unwrap_or_default();
		std::thread::spawn(move || {
			let reader = match stream.try_clone() {
				Ok(reader) => io::BufReader::new(reader),
				Err(err) => {
					tracing::warn!(error = %err, %peer, "clone connection failed");
					return;
				}
			};
			match echo_lines(reader, &stream) {
				Ok(lines) => tracing::debug!(%peer, lines, "connection closed"),
				Err(err) => tracing::debug!(error = %err, %peer, "connection dropped"),
			}
		});
	}
}

#[cfg(unix)]
fn is_transient(err: &io::Error) -> bool {
	matches!(
		err.kind(),
		io::ErrorKind::Interrupted | io::ErrorKind::ConnectionAborted | io::ErrorKind::WouldBlock
	)
}

/// Write every line read from `reader` back to `writer` until EOF.
///
/// Returns the number of lines echoed.
pub(crate) fn echo_lines<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<usize> {
	let mut line = Vec::new();
	let mut count = 0;
	loop {
		line.clear();
		if reader.read_until(b'\n', &mut line)? == 0 {
			return Ok(count);
		}
		writer.write_all(&line)?;
		writer.flush()?;
		count += 1;
	}
}
