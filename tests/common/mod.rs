//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::num::NonZeroUsize;

use sidestep::config::{ClusterConfig, DEFAULT_CONTENT};
use sidestep::messages::{Direction, Msg};
use sidestep::model::{Selection, Session};
use sidestep::update::update;

/// Anchor of the demo cluster: between "An ex" and "ample"
pub const ANCHOR: usize = 6;

/// Session on the demo document with `widgets` widgets at [`ANCHOR`]
pub fn test_session(widgets: usize) -> Session {
    test_session_with(DEFAULT_CONTENT, ANCHOR, widgets)
}

pub fn test_session_with(content: &str, anchor_pos: usize, widgets: usize) -> Session {
    let config = ClusterConfig {
        widget_count: NonZeroUsize::new(widgets).expect("at least one widget"),
        anchor_pos,
        content: content.to_string(),
    };
    Session::new(config).expect("valid test session")
}

/// Demo session with the cursor placed on the anchor
pub fn session_at_anchor(widgets: usize) -> Session {
    let mut session = test_session(widgets);
    update(&mut session, Msg::SetCursorPosition(ANCHOR));
    assert_eq!(session.state.selection(), Selection::cursor(ANCHOR));
    session
}

pub fn press(session: &mut Session, direction: Direction) {
    update(session, Msg::MoveCursor(direction));
}

pub fn cursor(session: &Session) -> Option<usize> {
    session.state.selection().cursor_pos()
}
