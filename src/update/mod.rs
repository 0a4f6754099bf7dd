//! Update functions for the Elm-style architecture
//!
//! Every message becomes at most one root transaction, dispatched through the
//! session's append pipeline.

pub mod movement;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::Session;

#[cfg(debug_assertions)]
use crate::tracing::OffsetSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use movement::target_selection;

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(session: &mut Session, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(session: &mut Session, msg: Msg) -> Option<Cmd> {
    let current = session.state.selection();
    let target = target_selection(session.state.doc(), current, &msg)?;
    let tr = session.state.tr().set_selection(target);
    session.dispatch(tr);
    Some(Cmd::Redraw)
}

/// Traced update wrapper (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(session: &mut Session, msg: Msg) -> Option<Cmd> {
    let _span = span!(Level::DEBUG, "update", msg = ?msg).entered();
    let before = OffsetSnapshot::from_session(session);

    let result = update_inner(session, msg);

    let after = OffsetSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "offset", %diff, "state changed");
    }
    assert_offset_invariant(session);

    result
}

/// Offset must stay within the cluster
#[cfg(debug_assertions)]
fn assert_offset_invariant(session: &Session) {
    let count = session.config.widget_count.get();
    debug_assert!(
        session.offset() <= count,
        "offset {} exceeds widget count {}",
        session.offset(),
        count
    );
}
