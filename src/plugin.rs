//! Plugin interface of the editor state
//!
//! A plugin owns one state slice (created by `init`, advanced by `apply`),
//! can contribute decorations, and can append one transaction per dispatch
//! round after a transaction has been applied.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::decoration::DecorationSet;
use crate::model::{EditorState, Transaction};

/// Unique name addressing a plugin's state slice and metadata
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginKey(&'static str);

impl PluginKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PluginKey({})", self.0)
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Type-erased plugin state slice
pub type PluginSlice = Arc<dyn Any + Send + Sync>;

pub trait Plugin: Send + Sync {
    fn key(&self) -> PluginKey;

    /// Initial slice, called once when the state is created
    fn init(&self, state: &EditorState) -> PluginSlice;

    /// Reduce the slice for a transaction applied to `old`
    fn apply(&self, tr: &Transaction, slice: &PluginSlice, old: &EditorState) -> PluginSlice;

    fn decorations(&self, _state: &EditorState) -> DecorationSet {
        DecorationSet::empty()
    }

    /// Called after `trs` were applied, turning `old` into `new`
    fn append_transaction(
        &self,
        _trs: &[Transaction],
        _old: &EditorState,
        _new: &EditorState,
    ) -> Option<Transaction> {
        None
    }
}
