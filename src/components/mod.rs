//! Presentation-side state for Leptos front ends.
//!
//! Rendering itself belongs to the host; this module only provides the
//! reactive [`PanelState`] a view binds to.

mod panel;

pub use panel::PanelState;
