//! Ordering keys for widgets sharing one document position.

use std::num::NonZeroUsize;

use crate::model::Selection;

/// Shape of the selection as far as widget ordering is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionShape {
    /// Non-empty selection; crossing direction is ignored
    Range,
    /// Collapsed cursor, possibly sitting on the cluster anchor
    Cursor { at_anchor: bool },
}

impl SelectionShape {
    pub fn of(selection: Selection, anchor_pos: usize) -> Self {
        if selection.is_empty() {
            SelectionShape::Cursor {
                at_anchor: selection.from() == anchor_pos,
            }
        } else {
            SelectionShape::Range
        }
    }
}

/// Per-widget tie-break bias in `(0, 0.5]`, strictly increasing with `index`
pub fn order_offset(index: usize, widget_count: NonZeroUsize) -> f64 {
    (index + 1) as f64 / widget_count.get() as f64 / 2.0
}

/// Ordering key of widget `index` given how many widgets were crossed.
///
/// With a collapsed cursor on the anchor, widgets already crossed
/// (`offset > index`) land in the `(-1, 0)` bucket so they render before the
/// cursor; every other widget lands in `(1, 2)`. With a range selection the
/// key depends on `index` only.
pub fn compute_side(
    index: usize,
    offset: usize,
    widget_count: NonZeroUsize,
    shape: SelectionShape,
) -> f64 {
    let bias = order_offset(index, widget_count);
    match shape {
        SelectionShape::Range => bias + bias,
        SelectionShape::Cursor { at_anchor } => {
            let base = if at_anchor && offset > index { -1.0 } else { 1.0 };
            base + bias
        }
    }
}
