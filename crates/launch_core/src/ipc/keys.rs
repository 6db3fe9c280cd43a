//! Protocol-defined string constants from `<launch.h>`.

use std::fmt;
use std::str::FromStr;

/// Value of the `inetdCompatibility` `Wait` key.
pub const INETD_COMPATIBILITY_WAIT: &str = "Wait";

/// Message keys naming launchd operations.
pub mod msg {
	/// Submit a job dictionary.
	pub const SUBMITJOB: &str = "SubmitJob";
	/// Remove a job by label.
	pub const REMOVEJOB: &str = "RemoveJob";
	/// Start a job by label.
	pub const STARTJOB: &str = "StartJob";
	/// Stop a job by label.
	pub const STOPJOB: &str = "StopJob";
	/// Fetch one job dictionary by label.
	pub const GETJOB: &str = "GetJob";
	/// Fetch every job dictionary keyed by label.
	pub const GETJOBS: &str = "GetJobs";
	/// Fetch the calling job's own dictionary.
	pub const CHECKIN: &str = "CheckIn";

	pub(super) const TABLE: &[(&str, &str)] = &[
		("SUBMITJOB", SUBMITJOB),
		("REMOVEJOB", REMOVEJOB),
		("STARTJOB", STARTJOB),
		("STOPJOB", STOPJOB),
		("GETJOB", GETJOB),
		("GETJOBS", GETJOBS),
		("CHECKIN", CHECKIN),
	];
}

/// Keys found in job dictionaries.
#[allow(missing_docs)]
pub mod job {
	pub const LABEL: &str = "Label";
	pub const DISABLED: &str = "Disabled";
	pub const USERNAME: &str = "UserName";
	pub const GROUPNAME: &str = "GroupName";
	pub const TIMEOUT: &str = "TimeOut";
	pub const EXITTIMEOUT: &str = "ExitTimeOut";
	pub const INITGROUPS: &str = "InitGroups";
	pub const SOCKETS: &str = "Sockets";
	pub const MACHSERVICES: &str = "MachServices";
	pub const MACHSERVICELOOKUPPOLICIES: &str = "MachServiceLookupPolicies";
	pub const INETDCOMPATIBILITY: &str = "inetdCompatibility";
	pub const ENABLEGLOBBING: &str = "EnableGlobbing";
	pub const PROGRAMARGUMENTS: &str = "ProgramArguments";
	pub const PROGRAM: &str = "Program";
	pub const ONDEMAND: &str = "OnDemand";
	pub const KEEPALIVE: &str = "KeepAlive";
	pub const LIMITLOADTOHOSTS: &str = "LimitLoadToHosts";
	pub const LIMITLOADFROMHOSTS: &str = "LimitLoadFromHosts";
	pub const LIMITLOADTOSESSIONTYPE: &str = "LimitLoadToSessionType";
	pub const RUNATLOAD: &str = "RunAtLoad";
	pub const ROOTDIRECTORY: &str = "RootDirectory";
	pub const WORKINGDIRECTORY: &str = "WorkingDirectory";
	pub const ENVIRONMENTVARIABLES: &str = "EnvironmentVariables";
	pub const USERENVIRONMENTVARIABLES: &str = "UserEnvironmentVariables";
	pub const UMASK: &str = "Umask";
	pub const NICE: &str = "Nice";
	pub const HOPEFULLYEXITSFIRST: &str = "HopefullyExitsFirst";
	pub const HOPEFULLYEXITSLAST: &str = "HopefullyExitsLast";
	pub const LOWPRIORITYIO: &str = "LowPriorityIO";
	pub const SESSIONCREATE: &str = "SessionCreate";
	pub const STARTONMOUNT: &str = "StartOnMount";
	pub const SOFTRESOURCELIMITS: &str = "SoftResourceLimits";
	pub const HARDRESOURCELIMITS: &str = "HardResourceLimits";
	pub const STANDARDINPATH: &str = "StandardInPath";
	pub const STANDARDOUTPATH: &str = "StandardOutPath";
	pub const STANDARDERRORPATH: &str = "StandardErrorPath";
	pub const DEBUG: &str = "Debug";
	pub const WAITFORDEBUGGER: &str = "WaitForDebugger";
	pub const QUEUEDIRECTORIES: &str = "QueueDirectories";
	pub const WATCHPATHS: &str = "WatchPaths";
	pub const STARTINTERVAL: &str = "StartInterval";
	pub const STARTCALENDARINTERVAL: &str = "StartCalendarInterval";
	pub const BONJOURFDS: &str = "BonjourFDs";
	pub const LASTEXITSTATUS: &str = "LastExitStatus";
	pub const PID: &str = "PID";
	pub const THROTTLEINTERVAL: &str = "ThrottleInterval";
	pub const LAUNCHONLYONCE: &str = "LaunchOnlyOnce";
	pub const ABANDONPROCESSGROUP: &str = "AbandonProcessGroup";
	pub const IGNOREPROCESSGROUPATSHUTDOWN: &str = "IgnoreProcessGroupAtShutdown";
	pub const POLICIES: &str = "Policies";
	pub const ENABLETRANSACTIONS: &str = "EnableTransactions";

	pub const MACH_RESETATCLOSE: &str = "ResetAtClose";
	pub const MACH_HIDEUNTILCHECKIN: &str = "HideUntilCheckIn";
	pub const MACH_DRAINMESSAGESONCRASH: &str = "DrainMessagesOnCrash";

	pub const KEEPALIVE_SUCCESSFULEXIT: &str = "SuccessfulExit";
	pub const KEEPALIVE_NETWORKSTATE: &str = "NetworkState";
	pub const KEEPALIVE_PATHSTATE: &str = "PathState";
	pub const KEEPALIVE_OTHERJOBACTIVE: &str = "OtherJobActive";
	pub const KEEPALIVE_OTHERJOBENABLED: &str = "OtherJobEnabled";
	pub const KEEPALIVE_AFTERINITIALDEMAND: &str = "AfterInitialDemand";

	pub const CAL_MINUTE: &str = "Minute";
	pub const CAL_HOUR: &str = "Hour";
	pub const CAL_DAY: &str = "Day";
	pub const CAL_WEEKDAY: &str = "Weekday";
	pub const CAL_MONTH: &str = "Month";

	pub const RESOURCELIMIT_CORE: &str = "Core";
	pub const RESOURCELIMIT_CPU: &str = "CPU";
	pub const RESOURCELIMIT_DATA: &str = "Data";
	pub const RESOURCELIMIT_FSIZE: &str = "FileSize";
	pub const RESOURCELIMIT_MEMLOCK: &str = "MemoryLock";
	pub const RESOURCELIMIT_NOFILE: &str = "NumberOfFiles";
	pub const RESOURCELIMIT_NPROC: &str = "NumberOfProcesses";
	pub const RESOURCELIMIT_RSS: &str = "ResidentSetSize";
	pub const RESOURCELIMIT_STACK: &str = "Stack";

	pub const DISABLED_MACHINETYPE: &str = "MachineType";
	pub const DISABLED_MODELNAME: &str = "ModelName";

	pub(super) const TABLE: &[(&str, &str)] = &[
		("LABEL", LABEL),
		("DISABLED", DISABLED),
		("USERNAME", USERNAME),
		("GROUPNAME", GROUPNAME),
		("TIMEOUT", TIMEOUT),
		("EXITTIMEOUT", EXITTIMEOUT),
		("INITGROUPS", INITGROUPS),
		("SOCKETS", SOCKETS),
		("MACHSERVICES", MACHSERVICES),
		("MACHSERVICELOOKUPPOLICIES", MACHSERVICELOOKUPPOLICIES),
		("INETDCOMPATIBILITY", INETDCOMPATIBILITY),
		("ENABLEGLOBBING", ENABLEGLOBBING),
		("PROGRAMARGUMENTS", PROGRAMARGUMENTS),
		("PROGRAM", PROGRAM),
		("ONDEMAND", ONDEMAND),
		("KEEPALIVE", KEEPALIVE),
		("LIMITLOADTOHOSTS", LIMITLOADTOHOSTS),
		("LIMITLOADFROMHOSTS", LIMITLOADFROMHOSTS),
		("LIMITLOADTOSESSIONTYPE", LIMITLOADTOSESSIONTYPE),
		("RUNATLOAD", RUNATLOAD),
		("ROOTDIRECTORY", ROOTDIRECTORY),
		("WORKINGDIRECTORY", WORKINGDIRECTORY),
		("ENVIRONMENTVARIABLES", ENVIRONMENTVARIABLES),
		("USERENVIRONMENTVARIABLES", USERENVIRONMENTVARIABLES),
		("UMASK", UMASK),
		("NICE", NICE),
		("HOPEFULLYEXITSFIRST", HOPEFULLYEXITSFIRST),
		("HOPEFULLYEXITSLAST", HOPEFULLYEXITSLAST),
		("LOWPRIORITYIO", LOWPRIORITYIO),
		("SESSIONCREATE", SESSIONCREATE),
		("STARTONMOUNT", STARTONMOUNT),
		("SOFTRESOURCELIMITS", SOFTRESOURCELIMITS),
		("HARDRESOURCELIMITS", HARDRESOURCELIMITS),
		("STANDARDINPATH", STANDARDINPATH),
		("STANDARDOUTPATH", STANDARDOUTPATH),
		("STANDARDERRORPATH", STANDARDERRORPATH),
		("DEBUG", DEBUG),
		("WAITFORDEBUGGER", WAITFORDEBUGGER),
		("QUEUEDIRECTORIES", QUEUEDIRECTORIES),
		("WATCHPATHS", WATCHPATHS),
		("STARTINTERVAL", STARTINTERVAL),
		("STARTCALENDARINTERVAL", STARTCALENDARINTERVAL),
		("BONJOURFDS", BONJOURFDS),
		("LASTEXITSTATUS", LASTEXITSTATUS),
		("PID", PID),
		("THROTTLEINTERVAL", THROTTLEINTERVAL),
		("LAUNCHONLYONCE", LAUNCHONLYONCE),
		("ABANDONPROCESSGROUP", ABANDONPROCESSGROUP),
		("IGNOREPROCESSGROUPATSHUTDOWN", IGNOREPROCESSGROUPATSHUTDOWN),
		("POLICIES", POLICIES),
		("ENABLETRANSACTIONS", ENABLETRANSACTIONS),
		("MACH_RESETATCLOSE", MACH_RESETATCLOSE),
		("MACH_HIDEUNTILCHECKIN", MACH_HIDEUNTILCHECKIN),
		("MACH_DRAINMESSAGESONCRASH", MACH_DRAINMESSAGESONCRASH),
		("KEEPALIVE_SUCCESSFULEXIT", KEEPALIVE_SUCCESSFULEXIT),
		("KEEPALIVE_NETWORKSTATE", KEEPALIVE_NETWORKSTATE),
		("KEEPALIVE_PATHSTATE", KEEPALIVE_PATHSTATE),
		("KEEPALIVE_OTHERJOBACTIVE", KEEPALIVE_OTHERJOBACTIVE),
		("KEEPALIVE_OTHERJOBENABLED", KEEPALIVE_OTHERJOBENABLED),
		("KEEPALIVE_AFTERINITIALDEMAND", KEEPALIVE_AFTERINITIALDEMAND),
		("CAL_MINUTE", CAL_MINUTE),
		("CAL_HOUR", CAL_HOUR),
		("CAL_DAY", CAL_DAY),
		("CAL_WEEKDAY", CAL_WEEKDAY),
		("CAL_MONTH", CAL_MONTH),
		("RESOURCELIMIT_CORE", RESOURCELIMIT_CORE),
		("RESOURCELIMIT_CPU", RESOURCELIMIT_CPU),
		("RESOURCELIMIT_DATA", RESOURCELIMIT_DATA),
		("RESOURCELIMIT_FSIZE", RESOURCELIMIT_FSIZE),
		("RESOURCELIMIT_MEMLOCK", RESOURCELIMIT_MEMLOCK),
		("RESOURCELIMIT_NOFILE", RESOURCELIMIT_NOFILE),
		("RESOURCELIMIT_NPROC", RESOURCELIMIT_NPROC),
		("RESOURCELIMIT_RSS", RESOURCELIMIT_RSS),
		("RESOURCELIMIT_STACK", RESOURCELIMIT_STACK),
		("DISABLED_MACHINETYPE", DISABLED_MACHINETYPE),
		("DISABLED_MODELNAME", DISABLED_MODELNAME),
	];
}

/// Keys found in a job's socket dictionaries.
#[allow(missing_docs)]
pub mod socket {
	pub const TYPE: &str = "SockType";
	pub const PASSIVE: &str = "SockPassive";
	pub const BONJOUR: &str = "Bonjour";
	pub const SECUREWITHKEY: &str = "SecureSocketWithKey";
	pub const PATHNAME: &str = "SockPathName";
	pub const PATHMODE: &str = "SockPathMode";
	pub const NODENAME: &str = "SockNodeName";
	pub const SERVICENAME: &str = "SockServiceName";
	pub const FAMILY: &str = "SockFamily";
	pub const PROTOCOL: &str = "SockProtocol";
	pub const MULTICASTGROUP: &str = "MulticastGroup";

	pub(super) const TABLE: &[(&str, &str)] = &[
		("TYPE", TYPE),
		("PASSIVE", PASSIVE),
		("BONJOUR", BONJOUR),
		("SECUREWITHKEY", SECUREWITHKEY),
		("PATHNAME", PATHNAME),
		("PATHMODE", PATHMODE),
		("NODENAME", NODENAME),
		("SERVICENAME", SERVICENAME),
		("FAMILY", FAMILY),
		("PROTOCOL", PROTOCOL),
		("MULTICASTGROUP", MULTICASTGROUP),
	];
}

/// Job policy keys.
pub mod policy {
	/// Deny the job permission to submit other jobs.
	pub const DENYCREATINGOTHERJOBS: &str = "DenyCreatingOtherJobs";

	pub(super) const TABLE: &[(&str, &str)] = &[("DENYCREATINGOTHERJOBS", DENYCREATINGOTHERJOBS)];
}

/// Named constant table.
#[derive(Debug, Clone, Copy)]
pub struct KeyGroup {
	/// Group label used by [`group`].
	pub name: &'static str,
	/// `(constant name, wire value)` pairs in declaration order.
	pub entries: &'static [(&'static str, &'static str)],
}

const GROUPS: &[KeyGroup] = &[
	KeyGroup { name: "msg", entries: msg::TABLE },
	KeyGroup { name: "job", entries: job::TABLE },
	KeyGroup {
		name: "socket",
		entries: socket::TABLE,
	},
	KeyGroup {
		name: "policy",
		entries: policy::TABLE,
	},
	KeyGroup {
		name: "misc",
		entries: &[("JOBINETDCOMPATIBILITY_WAIT", INETD_COMPATIBILITY_WAIT)],
	},
];

/// Every constant table.
pub fn groups() -> &'static [KeyGroup] {
	GROUPS
}

/// Find a constant table by group label.
pub fn group(name: &str) -> Option<&'static KeyGroup> {
	GROUPS.iter().find(|item| item.name == name)
}

/// Operation named by a string message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
	/// [`msg::SUBMITJOB`].
	SubmitJob,
	/// [`msg::REMOVEJOB`].
	RemoveJob,
	/// [`msg::STARTJOB`].
	StartJob,
	/// [`msg::STOPJOB`].
	StopJob,
	/// [`msg::GETJOB`].
	GetJob,
	/// [`msg::GETJOBS`].
	GetJobs,
	/// [`msg::CHECKIN`].
	CheckIn,
}

impl MessageKey {
	/// All operations in declaration order.
	pub const ALL: [Self; 7] = [
		Self::SubmitJob,
		Self::RemoveJob,
		Self::StartJob,
		Self::StopJob,
		Self::GetJob,
		Self::GetJobs,
		Self::CheckIn,
	];

	/// Wire string sent to launchd.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::SubmitJob => msg::SUBMITJOB,
			Self::RemoveJob => msg::REMOVEJOB,
			Self::StartJob => msg::STARTJOB,
			Self::StopJob => msg::STOPJOB,
			Self::GetJob => msg::GETJOB,
			Self::GetJobs => msg::GETJOBS,
			Self::CheckIn => msg::CHECKIN,
		}
	}
}

impl fmt::Display for MessageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MessageKey {
	type Err = String;

	fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|item| item.as_str().eq_ignore_ascii_case(input))
			.ok_or_else(|| format!("unknown message key: {input}"))
	}
}
