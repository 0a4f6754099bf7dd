//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host should perform after an update.

/// Side effect requested by [`crate::update::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// State changed; recompute decorations and redraw
    Redraw,
}
