//! Offset traversal controller
//!
//! Widgets have no width, so one cursor step from the cluster anchor would
//! jump across all of them. The controller vetoes such a step while widgets
//! remain to be crossed in that direction: it bumps the offset by one and puts
//! the cursor back on the anchor. Once the offset reaches the boundary the
//! step passes through and the cursor leaves the cluster.

use std::num::NonZeroUsize;
use std::sync::Arc;

use super::offset::{Crossing, OffsetIntent, OffsetState};
use super::side::{compute_side, SelectionShape};
use crate::decoration::{DecorationSet, WidgetDecoration};
use crate::model::{Bias, EditorState, Selection, Transaction};
use crate::plugin::{Plugin, PluginKey, PluginSlice};

/// Key of the controller's state slice and transaction metadata
pub const OFFSET_KEY: PluginKey = PluginKey::new("widget-offset");

/// `widget_count` widgets anchored at `anchor_pos`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetCluster {
    pub anchor_pos: usize,
    pub widget_count: NonZeroUsize,
}

impl WidgetCluster {
    pub fn new(anchor_pos: usize, widget_count: NonZeroUsize) -> Self {
        Self {
            anchor_pos,
            widget_count,
        }
    }

    /// Widget descriptors for the given selection and offset
    pub fn widgets(&self, selection: Selection, offset: usize) -> Vec<WidgetDecoration> {
        let shape = SelectionShape::of(selection, self.anchor_pos);
        (0..self.widget_count.get())
            .map(|index| {
                let side = compute_side(index, offset, self.widget_count, shape);
                WidgetDecoration::new(self.anchor_pos, index, side)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct OffsetTraversalController {
    cluster: WidgetCluster,
}

impl OffsetTraversalController {
    pub fn new(cluster: WidgetCluster) -> Self {
        Self { cluster }
    }

    /// Offset slice of `state`, if the controller is installed
    pub fn state(state: &EditorState) -> Option<OffsetState> {
        state.slice::<OffsetState>(OFFSET_KEY).copied()
    }

    /// Corrective transaction for the move from `old` to `new`, if any
    pub fn intercept(&self, old: &EditorState, new: &EditorState) -> Option<Transaction> {
        // Ranges and node selections are skipped, not errors
        let old_pos = old.selection().cursor_pos()?;
        let new_pos = new.selection().cursor_pos()?;
        let crossing = Crossing::between(old_pos, new_pos)?;

        if old_pos != self.cluster.anchor_pos {
            return None;
        }

        let offset = Self::state(new).unwrap_or_default();
        if !offset.can_cross(crossing, self.cluster.widget_count) {
            tracing::debug!(
                offset = offset.offset(),
                ?crossing,
                "Cluster boundary reached, letting the cursor leave"
            );
            return None;
        }

        tracing::debug!(
            offset = offset.offset(),
            ?crossing,
            from = old_pos,
            to = new_pos,
            "Stepping across one widget"
        );
        let restored = Selection::near(new.doc(), old_pos, Bias::Forward);
        Some(
            new.tr()
                .set_meta(OFFSET_KEY, crossing.intent())
                .set_selection(restored),
        )
    }
}

impl Plugin for OffsetTraversalController {
    fn key(&self) -> PluginKey {
        OFFSET_KEY
    }

    fn init(&self, _state: &EditorState) -> PluginSlice {
        Arc::new(OffsetState::new())
    }

    fn apply(&self, tr: &Transaction, slice: &PluginSlice, _old: &EditorState) -> PluginSlice {
        let intent = OffsetIntent::of(tr, OFFSET_KEY);
        if intent == OffsetIntent::None {
            return Arc::clone(slice);
        }
        let current = slice
            .downcast_ref::<OffsetState>()
            .copied()
            .unwrap_or_default();
        Arc::new(current.reduce(intent, self.cluster.widget_count))
    }

    fn decorations(&self, state: &EditorState) -> DecorationSet {
        let offset = Self::state(state).unwrap_or_default().offset();
        let set = DecorationSet::create(state.doc(), self.cluster.widgets(state.selection(), offset));
        tracing::trace!(sides = %set.debug_sides(), "Widget sides");
        set
    }

    fn append_transaction(
        &self,
        _trs: &[Transaction],
        old: &EditorState,
        new: &EditorState,
    ) -> Option<Transaction> {
        self.intercept(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parser::parse_markup;

    const DEMO: &str = "<p><example>An ex</example>ample document</p>";

    fn controller() -> OffsetTraversalController {
        OffsetTraversalController::new(WidgetCluster::new(6, NonZeroUsize::new(3).unwrap()))
    }

    fn state_at(selection: Selection) -> EditorState {
        EditorState::create(
            parse_markup(DEMO).unwrap(),
            selection,
            vec![Arc::new(controller())],
        )
    }

    #[test]
    fn test_init_offset_is_zero() {
        let state = state_at(Selection::cursor(6));
        assert_eq!(OffsetTraversalController::state(&state), Some(OffsetState::new()));
    }

    #[test]
    fn test_intercept_rightward_from_anchor() {
        let old = state_at(Selection::cursor(6));
        let new = old.apply(&old.tr().set_selection(Selection::cursor(7)));
        let tr = controller().intercept(&old, &new).unwrap();
        assert_eq!(OffsetIntent::of(&tr, OFFSET_KEY), OffsetIntent::Increment);
        assert_eq!(tr.selection(), Selection::cursor(6));
    }

    #[test]
    fn test_intercept_ignores_moves_not_from_anchor() {
        let old = state_at(Selection::cursor(5));
        let new = old.apply(&old.tr().set_selection(Selection::cursor(6)));
        assert!(controller().intercept(&old, &new).is_none());
    }

    #[test]
    fn test_intercept_ignores_leftward_at_zero() {
        let old = state_at(Selection::cursor(6));
        let new = old.apply(&old.tr().set_selection(Selection::cursor(5)));
        assert!(controller().intercept(&old, &new).is_none());
    }

    #[test]
    fn test_intercept_skips_ranges() {
        let old = state_at(Selection::cursor(6));
        let new = old.apply(&old.tr().set_selection(Selection::text(1, 5)));
        assert!(controller().intercept(&old, &new).is_none());
    }

    #[test]
    fn test_intercept_skips_unmoved_cursor() {
        let old = state_at(Selection::cursor(6));
        let new = old.apply(&old.tr());
        assert!(controller().intercept(&old, &new).is_none());
    }

    #[test]
    fn test_apply_reduces_tagged_transactions_only() {
        let state = state_at(Selection::cursor(6));
        let state = state.apply(&state.tr().set_meta(OFFSET_KEY, OffsetIntent::Increment));
        assert_eq!(OffsetTraversalController::state(&state).unwrap().offset(), 1);
        let state = state.apply(&state.tr().set_selection(Selection::cursor(3)));
        assert_eq!(OffsetTraversalController::state(&state).unwrap().offset(), 1);
    }

    #[test]
    fn test_decorations_follow_offset() {
        let state = state_at(Selection::cursor(6));
        let state = state.apply(&state.tr().set_meta(OFFSET_KEY, OffsetIntent::Increment));
        let set = state.decorations();
        assert_eq!(set.len(), 3);
        let before: Vec<_> = set.iter().map(|w| w.before_cursor()).collect();
        assert_eq!(before, vec![true, false, false]);
        assert_eq!(set.debug_sides(), "-0.833, 1.3333, 1.5");
    }
}
