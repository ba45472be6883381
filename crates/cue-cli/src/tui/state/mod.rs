//! App state components
//!
//! Cached layout areas used for mouse hit testing.

mod layout;

pub use layout::LayoutState;
