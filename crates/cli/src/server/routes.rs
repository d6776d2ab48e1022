use adbflow::Engine;
use adbflow_protocol::{
	DeviceEntry, ErrorBody, LoopStatus, OpenLinkRequest, OpenLinkResponse, SessionStatus, StartRequest,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

/// Error response with a `{ "error": message }` body.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl ApiError {
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::BAD_REQUEST,
			message: message.into(),
		}
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			message: message.into(),
		}
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}
}

impl From<adbflow::Error> for ApiError {
	fn from(err: adbflow::Error) -> Self {
		if err.is_invalid_input() {
			ApiError::bad_request(err.to_string())
		} else {
			ApiError::internal(err.to_string())
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			error!(target = "adbflow.server", status = %self.status, error = %self.message, "request failed");
		} else {
			warn!(target = "adbflow.server", status = %self.status, error = %self.message, "request rejected");
		}
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}

pub(super) async fn list_devices(State(engine): State<Engine>) -> Result<Json<Vec<DeviceEntry>>, ApiError> {
	Ok(Json(engine.list_devices().await?))
}

pub(super) async fn open_link(
	State(engine): State<Engine>,
	payload: Result<Json<OpenLinkRequest>, JsonRejection>,
) -> Result<Json<OpenLinkResponse>, ApiError> {
	let Json(request) =
		payload.map_err(|_| ApiError::bad_request("deviceIds and links must be non-empty arrays"))?;
	Ok(Json(engine.open_links(request).await?))
}

pub(super) async fn start(
	State(engine): State<Engine>,
	payload: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<LoopStatus>, ApiError> {
	let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
	match engine.start(request) {
		Ok(status) => Ok(Json(status)),
		Err(adbflow::Error::AlreadyRunning) => {
			info!(target = "adbflow.server", "start ignored, loop already active");
			Ok(Json(LoopStatus::new(true, adbflow::Error::AlreadyRunning.to_string())))
		}
		Err(err) => Err(err.into()),
	}
}

pub(super) async fn stop(State(engine): State<Engine>) -> Json<LoopStatus> {
	Json(engine.stop())
}

pub(super) async fn status(State(engine): State<Engine>) -> Json<SessionStatus> {
	Json(engine.status())
}
