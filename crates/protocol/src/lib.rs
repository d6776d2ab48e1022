//! Wire types for the adbflow control surface.
//!
//! These types are shared by the engine (which produces and consumes them) and
//! the HTTP server (which serializes them). Field names follow the camelCase
//! JSON contract the dashboard speaks.
//!
//! # Main Types
//!
//! - [`DeviceEntry`] - One line of `adb devices` output
//! - [`StartRequest`] - Parameters for starting the session loop
//! - [`OpenLinkRequest`] / [`OpenLinkResult`] - One-shot link opening
//! - [`LoopStatus`] / [`SessionStatus`] - Lifecycle responses

mod control;
mod device;

pub use control::{
	DeviceSelection, ErrorBody, LoopStatus, OpenLinkRequest, OpenLinkResponse, OpenLinkResult,
	PostSendMode, SessionPhase, SessionStatus, StartRequest,
};
pub use device::DeviceEntry;
