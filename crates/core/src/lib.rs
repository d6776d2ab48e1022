//! adbflow: autonomous chat sessions on Android devices over ADB
//!
//! The engine opens links on a fleet of network-attached devices, performs an
//! idle gesture, types a generated message key by key with human-like pacing
//! and mistakes, and repeats in the background until told to stop.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use adbflow::{Engine, ScriptLibrary, SessionDeps, SessionTiming, TokioPacer, TypingProfile};
//! use adbflow_protocol::StartRequest;
//! use adbflow_runtime::{AdbChannel, AuditLog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let audit = AuditLog::open("adb-wa-link-log.txt")?;
//!     let deps = SessionDeps {
//!         channel: Arc::new(AdbChannel::locate(None, audit.clone())?),
//!         generator: Arc::new(my_generator()),
//!         pacer: Arc::new(TokioPacer),
//!         scripts: Arc::new(ScriptLibrary::from_dir("commands")),
//!         audit,
//!         typing: TypingProfile::default(),
//!         timing: SessionTiming::default(),
//!     };
//!     let engine = Engine::new(deps, adbflow::load_links("wa-links.txt")?);
//!
//!     let request: StartRequest = serde_json::from_str(
//!         r#"{"deviceId":"192.168.1.10:5555","topic":"coffee","language":"english"}"#,
//!     )?;
//!     engine.start(request)?;
//!     tokio::signal::ctrl_c().await?;
//!     engine.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Engine`] - Request surface used by the HTTP server and the CLI
//! - [`SessionLoop`] / [`LoopGuard`] - The background loop and its owner
//! - [`TypingSimulator`] - Key-by-key typing with injected mistakes
//! - [`ContentRotator`] - Shuffled ring of links

pub mod command;
pub mod content;
pub mod device_id;
pub mod engine;
pub mod error;
pub mod generator;
pub mod gesture;
pub mod keymap;
pub mod open_link;
pub mod pacing;
pub mod rotator;
pub mod script;
pub mod session;
pub mod testing;
pub mod text;
pub mod typing;

pub use content::load_links;
pub use device_id::DeviceId;
pub use engine::Engine;
pub use error::{Error, Result};
pub use generator::{TextGenerator, render_prompt};
pub use gesture::IdleGesture;
pub use open_link::open_links;
pub use pacing::{DelayRange, Pacer, RateRange, TokioPacer};
pub use rotator::ContentRotator;
pub use script::{DEFAULT_IMAGE_SCRIPT, DEFAULT_REPLY_SCRIPT, ScriptLibrary, ScriptReport, run_script};
pub use session::{LoopGuard, PassReport, SessionDeps, SessionLoop, SessionPlan, SessionStats, SessionTiming, StopOutcome};
pub use typing::{TypingProfile, TypingReport, TypingSimulator};
