use serde::Serialize;

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Render an optional integer cell, `-` when absent.
pub(crate) fn int_cell(value: Option<i64>) -> String {
	value.map_or_else(|| "-".to_owned(), |item| item.to_string())
}
