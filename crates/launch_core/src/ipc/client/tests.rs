use std::borrow::Cow;
use std::cell::Cell;
use std::io;
use std::ops::Deref;

use crate::ipc::keys::{job, msg};
use crate::ipc::{Client, DataType, DecodeOptions, Item, ItemRef, LaunchData, LaunchError, Scripted, Transport, Value};

fn string(text: &str) -> LaunchData {
	LaunchData::string(text).expect("string")
}

#[test]
fn getjobs_decodes_nested_job_dictionaries() {
	let transport = Scripted::new().respond(LaunchData::dictionary([("foo.bar", LaunchData::dictionary([("PID", LaunchData::Integer(123))]))]));
	let client = Client::new(&transport);

	let value = client.message("GETJOBS").expect("message succeeds");

	let job = value.get("foo.bar").expect("job present");
	assert_eq!(job.get("PID"), Some(&Value::Integer(123)));
	assert_eq!(value.as_map().map(|map| map.len()), Some(1));
	assert_eq!(transport.requests(), vec![string("GETJOBS")]);
}

#[test]
fn errno_response_becomes_operation_errno() {
	let transport = Scripted::new().respond(LaunchData::Errno(3));
	let client = Client::new(&transport);

	let err = client.message(msg::GETJOBS).expect_err("errno response fails");
	assert!(matches!(err, LaunchError::OperationErrno { op: "launch_msg", code: 3 }));
	assert_eq!(err.raw_os_error(), Some(3));
	assert!(err.to_string().starts_with("launch_msg: "));
}

#[test]
fn nested_errno_is_ordinary_data() {
	let transport = Scripted::new().respond(LaunchData::dictionary([("LastExitStatus", LaunchData::Errno(2))]));
	let client = Client::new(&transport);

	let value = client.message(msg::GETJOB).expect("nested errno decodes");
	assert_eq!(value.get("LastExitStatus"), Some(&Value::Integer(2)));
}

#[test]
fn transport_failure_carries_os_code_and_op() {
	let transport = Scripted::new().fail(io::Error::from_raw_os_error(13));
	let client = Client::new(&transport);

	let err = client.get_jobs().expect_err("transport fails");
	match &err {
		LaunchError::TransportFailed { op, source } => {
			assert_eq!(*op, "launch_msg");
			assert_eq!(source.raw_os_error(), Some(13));
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(err.raw_os_error(), Some(13));
}

#[test]
fn encoding_failure_skips_exchange() {
	let transport = Scripted::new().respond(LaunchData::Integer(0));
	let client = Client::new(&transport);

	let err = client.message("Check\0In").expect_err("encode fails");
	assert!(matches!(err, LaunchError::EncodingFailed { .. }));
	assert!(transport.requests().is_empty());
	assert_eq!(transport.pending(), 1);
}

#[test]
fn labeled_operations_send_single_key_dictionaries() {
	let transport = Scripted::new()
		.respond(LaunchData::dictionary([(job::LABEL, string("a"))]))
		.respond(LaunchData::Errno(0))
		.respond(LaunchData::Errno(0))
		.respond(LaunchData::Errno(0));
	let client = Client::new(&transport);

	client.get_job("a").expect("get job");
	for result in [client.start_job("a"), client.stop_job("a"), client.remove_job("a")] {
		let err = result.expect_err("errno response is failure even for zero");
		assert!(matches!(err, LaunchError::OperationErrno { code: 0, .. }));
	}

	let requests = transport.requests();
	let sent: Vec<&str> = requests
		.iter()
		.map(|request| match request {
			LaunchData::Dictionary(entries) => {
				assert_eq!(entries.len(), 1);
				assert_eq!(entries[0].1, string("a"));
				entries[0].0.as_str()
			}
			other => panic!("unexpected request: {other:?}"),
		})
		.collect();
	assert_eq!(sent, [msg::GETJOB, msg::STARTJOB, msg::STOPJOB, msg::REMOVEJOB]);
}

#[test]
fn submit_job_wraps_job_dictionary() {
	let job_dict = LaunchData::dictionary([
		(job::LABEL, string("com.example.sleep")),
		(job::PROGRAMARGUMENTS, LaunchData::array([string("/bin/sleep"), string("60")])),
	]);
	let transport = Scripted::new().respond(LaunchData::Array(Vec::new()));
	let client = Client::new(&transport);

	client.submit_job(&job_dict).expect("submit succeeds");
	assert_eq!(transport.requests(), vec![LaunchData::dictionary([(msg::SUBMITJOB, job_dict)])]);
}

#[test]
fn checkin_wraps_map_response() {
	let transport = Scripted::new().respond(LaunchData::dictionary([
		(job::LABEL, string("com.example.echo")),
		(job::SOCKETS, LaunchData::dictionary([("Echo", LaunchData::array([LaunchData::Fd(7)]))])),
	]));
	let client = Client::new(&transport);

	let checkin = client.checkin().expect("checkin succeeds").expect("checkin has data");
	assert_eq!(checkin.label(), Some("com.example.echo"));
	assert_eq!(checkin.socket_fds("Echo").expect("sockets"), vec![7]);
	assert_eq!(transport.requests(), vec![string(msg::CHECKIN)]);
}

#[test]
fn checkin_machport_response_is_none() {
	let transport = Scripted::new().respond(LaunchData::MachPort(9));
	let client = Client::new(&transport);
	assert!(client.checkin().expect("checkin succeeds").is_none());
}

#[test]
fn decode_options_are_applied() {
	let transport = Scripted::new().respond(LaunchData::array([LaunchData::array([LaunchData::Integer(1)])]));
	let client = Client::with_options(&transport, DecodeOptions { max_depth: 2 });
	let err = client.get_jobs().expect_err("too deep");
	assert!(matches!(err, LaunchError::DecodeDepthExceeded { max_depth: 2 }));
}

/// Transport whose responses count how often they are released.
struct Counting<'a> {
	response: LaunchData,
	released: &'a Cell<usize>,
}

struct CountedResponse<'a> {
	data: LaunchData,
	released: &'a Cell<usize>,
}

impl Deref for CountedResponse<'_> {
	type Target = LaunchData;

	fn deref(&self) -> &LaunchData {
		&self.data
	}
}

impl Drop for CountedResponse<'_> {
	fn drop(&mut self) {
		self.released.set(self.released.get() + 1);
	}
}

impl<'a> Transport for Counting<'a> {
	type Node = LaunchData;
	type Response = CountedResponse<'a>;

	fn exchange(&self, _request: &LaunchData) -> crate::ipc::Result<Self::Response> {
		Ok(CountedResponse {
			data: self.response.clone(),
			released: self.released,
		})
	}
}

#[test]
fn response_is_released_once_per_call() {
	let released = Cell::new(0);
	let client = Client::new(Counting {
		response: LaunchData::dictionary([("PID", LaunchData::Integer(1))]),
		released: &released,
	});

	client.get_jobs().expect("first call");
	assert_eq!(released.get(), 1);
	client.get_jobs().expect("second call");
	assert_eq!(released.get(), 2);
}

#[test]
fn errno_response_is_still_released() {
	let released = Cell::new(0);
	let client = Client::new(Counting {
		response: LaunchData::Errno(3),
		released: &released,
	});

	client.get_jobs().expect_err("errno");
	assert_eq!(released.get(), 1);
}

/// Response tree whose `Job` dictionary hides a node with an unknown tag.
enum Foreign {
	Dict(Vec<(&'static str, Foreign)>),
	Int(i64),
	Tag(u32),
}

impl Item for Foreign {
	fn view(&self) -> crate::ipc::Result<ItemRef<'_, Self>> {
		Ok(match self {
			Self::Dict(entries) => ItemRef::Dictionary(entries.iter().map(|(key, value)| (Cow::Borrowed(*key), value)).collect()),
			Self::Int(value) => ItemRef::Integer(*value),
			Self::Tag(tag) => return Err(DataType::try_from(*tag).expect_err("tag is outside the known set")),
		})
	}
}

struct ForeignTransport;

impl Transport for ForeignTransport {
	type Node = Foreign;
	type Response = Box<Foreign>;

	fn exchange(&self, _request: &LaunchData) -> crate::ipc::Result<Self::Response> {
		Ok(Box::new(Foreign::Dict(vec![
			("Label", Foreign::Int(1)),
			("Job", Foreign::Dict(vec![("PID", Foreign::Int(2)), ("Next", Foreign::Tag(12))])),
		])))
	}
}

#[test]
fn nested_unknown_tag_fails_request_without_value() {
	let client = Client::new(ForeignTransport);

	let result = client.request(&string(msg::GETJOBS));
	assert!(matches!(result, Err(LaunchError::UnknownVariant { tag: 12 })), "got {result:?}");
}
