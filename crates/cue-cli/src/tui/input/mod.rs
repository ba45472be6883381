//! Text input widgets

mod editor;

pub use editor::{EditAction, ScriptEditor};
