//! The background session loop and the guard that owns it.
//!
//! A session opens a link on each device, performs an idle gesture, types a
//! generated message and sends it, optionally followed by a scripted reply or
//! image flow. Passes repeat with a rest in between until stop is requested.

mod guard;
mod runner;

pub use guard::{LoopGuard, StopOutcome};
pub use runner::{PassReport, SessionDeps, SessionLoop, SessionPlan, SessionStats, SessionTiming};
