//! Request and response bodies for the control endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// What the session loop does on a device after the first message is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSendMode {
	/// Send the message and move on.
	#[default]
	None,
	/// Run the reply script, then send the same message again.
	Reply,
	/// Run the image script.
	Image,
}

impl PostSendMode {
	/// Parses a mode label, treating anything unrecognised as [`PostSendMode::None`].
	pub fn from_label(label: &str) -> Self {
		match label.trim().to_ascii_lowercase().as_str() {
			"reply" => Self::Reply,
			"image" => Self::Image,
			_ => Self::None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Reply => "reply",
			Self::Image => "image",
		}
	}
}

/// Present keys always yield `Some`, even for `null` or unknown labels, so a
/// given `mode` is never overridden by `toggle`.
fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<PostSendMode>, D::Error>
where
	D: Deserializer<'de>,
{
	let label = Option::<String>::deserialize(deserializer)?;
	Ok(Some(label.as_deref().map(PostSendMode::from_label).unwrap_or_default()))
}

/// One device id or a list of them.
///
/// The dashboard sends a bare string when a single device is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceSelection {
	One(String),
	Many(Vec<String>),
}

impl Default for DeviceSelection {
	fn default() -> Self {
		Self::Many(Vec::new())
	}
}

impl DeviceSelection {
	pub fn into_vec(self) -> Vec<String> {
		match self {
			Self::One(id) => vec![id],
			Self::Many(ids) => ids,
		}
	}
}

/// Body of `POST /api/start`.
///
/// The dashboard names the mode `toggle`; `mode` wins when both are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StartRequestBody")]
pub struct StartRequest {
	/// Rest between passes, in minutes. Missing means no rest.
	#[serde(default)]
	pub rest_minutes: Option<f64>,
	#[serde(default)]
	pub device_id: DeviceSelection,
	#[serde(default)]
	pub topic: Option<String>,
	#[serde(default)]
	pub language: Option<String>,
	pub mode: PostSendMode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartRequestBody {
	#[serde(default)]
	rest_minutes: Option<f64>,
	#[serde(default)]
	device_id: DeviceSelection,
	#[serde(default)]
	topic: Option<String>,
	#[serde(default)]
	language: Option<String>,
	#[serde(default, deserialize_with = "lenient_mode")]
	mode: Option<PostSendMode>,
	#[serde(default, deserialize_with = "lenient_mode")]
	toggle: Option<PostSendMode>,
}

impl From<StartRequestBody> for StartRequest {
	fn from(body: StartRequestBody) -> Self {
		Self {
			rest_minutes: body.rest_minutes,
			device_id: body.device_id,
			topic: body.topic,
			language: body.language,
			mode: body.mode.or(body.toggle).unwrap_or_default(),
		}
	}
}

/// Body of `POST /api/open-wa-link`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLinkRequest {
	#[serde(default)]
	pub device_ids: Vec<String>,
	#[serde(default)]
	pub links: Vec<String>,
}

/// Outcome of opening one link on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLinkResult {
	pub device_id: String,
	pub link: String,
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenLinkResponse {
	pub results: Vec<OpenLinkResult>,
}

/// Response of the start and stop endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopStatus {
	pub running: bool,
	pub message: String,
}

impl LoopStatus {
	pub fn new(running: bool, message: impl Into<String>) -> Self {
		Self {
			running,
			message: message.into(),
		}
	}
}

/// Lifecycle phase of the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
	Idle,
	Running,
	/// Stop was signalled; the in-flight pass is still finishing.
	StopRequested,
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
	pub phase: SessionPhase,
	pub running: bool,
	pub passes: u64,
	pub device_failures: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub started_at: Option<String>,
}

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
	pub error: String,
}
