//! Device command channel for adbflow.
//!
//! This crate owns everything that touches the `adb` executable:
//! locating it ([`driver`]), running one shell instruction on one device
//! ([`AdbChannel`]) and recording every call in the [`AuditLog`].
//!
//! The engine only sees the [`DeviceChannel`] trait, so tests substitute an
//! in-memory channel.

mod adb;
mod audit;
mod channel;
pub mod driver;
pub mod error;

pub use adb::{AdbChannel, DEFAULT_COMMAND_TIMEOUT, parse_device_list};
pub use audit::AuditLog;
pub use channel::DeviceChannel;
pub use error::{Error, Result};
