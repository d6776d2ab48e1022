//! Shell instructions sent to devices.

/// `input keyevent <code>`
pub fn keyevent(code: u16) -> String {
	format!("input keyevent {code}")
}

/// Opens `link` with the default VIEW handler. Embedded double quotes are
/// escaped so the device shell sees one argument.
pub fn open_url(link: &str) -> String {
	format!(
		"am start -a android.intent.action.VIEW -d \"{}\"",
		link.replace('"', "\\\"")
	)
}

pub fn swipe(x1: u32, y1: u32, x2: u32, y2: u32, duration_ms: u32) -> String {
	format!("input touchscreen swipe {x1} {y1} {x2} {y2} {duration_ms}")
}

pub fn tap(x: u32, y: u32) -> String {
	format!("input tap {x} {y}")
}
