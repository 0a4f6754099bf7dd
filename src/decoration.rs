//! Widget decorations
//!
//! Widgets are declarative descriptors: a document position, a render kind
//! for the host renderer, and an ordering key (`side`). Widgets sharing a
//! position render in ascending `side`; a collapsed cursor at the same
//! position counts as side 0.

use std::cmp::Ordering;

use crate::model::Node;

/// How the host should draw a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Zero-width inline marker
    Marker,
}

impl WidgetKind {
    /// Character used by the plain-text view
    pub fn glyph(self) -> char {
        match self {
            WidgetKind::Marker => '¤',
        }
    }
}

/// A widget anchored at a document position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetDecoration {
    pub pos: usize,
    /// Stable identity within its cluster
    pub key: usize,
    pub side: f64,
    pub kind: WidgetKind,
}

impl WidgetDecoration {
    pub fn new(pos: usize, key: usize, side: f64) -> Self {
        Self {
            pos,
            key,
            side,
            kind: WidgetKind::Marker,
        }
    }

    /// Whether the widget renders before a cursor at the same position
    pub fn before_cursor(&self) -> bool {
        self.side < 0.0
    }

    fn render_order(&self, other: &Self) -> Ordering {
        self.pos
            .cmp(&other.pos)
            .then(self.side.total_cmp(&other.side))
            .then(self.key.cmp(&other.key))
    }
}

/// Widgets in render order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecorationSet {
    widgets: Vec<WidgetDecoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set for `doc`, dropping widgets positioned outside it
    pub fn create(doc: &Node, widgets: impl IntoIterator<Item = WidgetDecoration>) -> Self {
        let size = doc.content_size();
        let mut widgets: Vec<_> = widgets
            .into_iter()
            .filter(|w| {
                let inside = w.pos <= size;
                if !inside {
                    tracing::warn!(pos = w.pos, size, "Dropping widget outside the document");
                }
                inside
            })
            .collect();
        widgets.sort_by(WidgetDecoration::render_order);
        Self { widgets }
    }

    pub fn merge(mut self, other: DecorationSet) -> Self {
        if self.widgets.is_empty() {
            return other;
        }
        self.widgets.extend(other.widgets);
        self.widgets.sort_by(WidgetDecoration::render_order);
        self
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetDecoration> {
        self.widgets.iter()
    }

    /// Widgets at exactly `pos`, in render order
    pub fn widgets_at(&self, pos: usize) -> impl Iterator<Item = &WidgetDecoration> {
        self.widgets.iter().filter(move |w| w.pos == pos)
    }

    /// Keys of the widgets at `pos`, in render order
    pub fn keys_at(&self, pos: usize) -> Vec<usize> {
        self.widgets_at(pos).map(|w| w.key).collect()
    }

    /// One-line summary of every side, each cut to six characters
    pub fn debug_sides(&self) -> String {
        self.widgets
            .iter()
            .map(|w| w.side.to_string().chars().take(6).collect::<String>())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
