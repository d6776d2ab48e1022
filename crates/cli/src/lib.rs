//! Command-line front end and HTTP control server for adbflow.
//!
//! `adbflow serve` exposes the engine under `/api` for the dashboard;
//! `adbflow devices`, `adbflow open-link` and `adbflow run` drive it directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod server;
pub mod styles;
