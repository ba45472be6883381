//! Core library for Cue - scroll engine, display settings, and script state
//!
//! Everything here is terminal-agnostic: the TUI crate owns rendering and
//! timers, this crate owns the state machines they drive.

pub mod engine;
pub mod error;
pub mod script;
pub mod settings;
pub mod stopwatch;

// Re-exports
pub use engine::ScrollEngine;
pub use error::ScriptError;
pub use script::ScriptSource;
pub use settings::{DisplaySettings, SettingsPatch};
pub use stopwatch::Stopwatch;
