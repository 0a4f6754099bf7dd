//! Offset state slice and its reducer.

use std::num::NonZeroUsize;

use crate::model::Transaction;
use crate::plugin::PluginKey;

/// Intent attached to a transaction for the offset reducer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetIntent {
    #[default]
    None,
    Increment,
    Decrement,
}

impl OffsetIntent {
    /// Intent carried by `tr` under `key`, `None` when absent
    pub fn of(tr: &Transaction, key: PluginKey) -> Self {
        tr.meta::<OffsetIntent>(key).copied().unwrap_or_default()
    }
}

/// Direction of a cursor move relative to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Rightward,
    Leftward,
}

impl Crossing {
    /// Direction of moving from `from` to `to`, `None` if the cursor stayed put
    pub fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Crossing::Rightward),
            std::cmp::Ordering::Less => Some(Crossing::Leftward),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn intent(self) -> OffsetIntent {
        match self {
            Crossing::Rightward => OffsetIntent::Increment,
            Crossing::Leftward => OffsetIntent::Decrement,
        }
    }
}

/// How many widgets of the cluster the cursor has logically crossed.
///
/// Always within `[0, widget_count]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetState {
    offset: usize,
}

impl OffsetState {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    /// State with `offset` clamped to the cluster
    pub fn at(offset: usize, widget_count: NonZeroUsize) -> Self {
        Self {
            offset: offset.min(widget_count.get()),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether another widget can be crossed in `crossing` direction
    pub fn can_cross(&self, crossing: Crossing, widget_count: NonZeroUsize) -> bool {
        match crossing {
            Crossing::Rightward => self.offset < widget_count.get(),
            Crossing::Leftward => self.offset > 0,
        }
    }

    pub fn reduce(self, intent: OffsetIntent, widget_count: NonZeroUsize) -> Self {
        let offset = match intent {
            OffsetIntent::None => return self,
            OffsetIntent::Increment => (self.offset + 1).min(widget_count.get()),
            OffsetIntent::Decrement => self.offset.saturating_sub(1),
        };
        if offset == self.offset {
            tracing::debug!(offset, ?intent, "Offset already at cluster boundary");
        } else {
            tracing::trace!(from = self.offset, to = offset, "Offset reduced");
        }
        Self { offset }
    }
}
