//! Immutable editor state snapshots and the dispatch pipeline.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::document::Node;
use super::selection::Selection;
use super::transaction::Transaction;
use crate::decoration::DecorationSet;
use crate::plugin::{Plugin, PluginKey, PluginSlice};

/// Rounds of the append loop after which dispatch stops asking plugins
pub const MAX_APPEND_ROUNDS: usize = 32;

/// Snapshot of document, selection and plugin slices.
///
/// Cloning is cheap: the document and plugin list are shared.
#[derive(Clone)]
pub struct EditorState {
    doc: Arc<Node>,
    selection: Selection,
    plugins: Arc<[Arc<dyn Plugin>]>,
    slices: HashMap<PluginKey, PluginSlice>,
}

/// Result of [`EditorState::apply_transaction`]
#[derive(Debug, Clone)]
pub struct Applied {
    pub state: EditorState,
    /// The root transaction followed by every appended one
    pub transactions: Vec<Transaction>,
}

impl EditorState {
    /// Create a state and initialise every plugin slice in order
    pub fn create(doc: Node, selection: Selection, plugins: Vec<Arc<dyn Plugin>>) -> Self {
        let mut state = Self {
            doc: Arc::new(doc),
            selection,
            plugins: plugins.into(),
            slices: HashMap::new(),
        };
        let plugins = Arc::clone(&state.plugins);
        for plugin in plugins.iter() {
            let slice = plugin.init(&state);
            state.slices.insert(plugin.key(), slice);
        }
        state
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    /// Start a transaction on this state
    pub fn tr(&self) -> Transaction {
        Transaction::new(self.selection)
    }

    /// Typed access to a plugin slice
    pub fn slice<T: Any>(&self, key: PluginKey) -> Option<&T> {
        self.slices.get(&key).and_then(|s| s.downcast_ref::<T>())
    }

    /// Apply a single transaction, running every plugin reducer
    pub fn apply(&self, tr: &Transaction) -> EditorState {
        let selection = if tr.selection_set() {
            tr.selection()
        } else {
            self.selection
        };
        let slices = self
            .plugins
            .iter()
            .filter_map(|plugin| {
                let key = plugin.key();
                self.slices
                    .get(&key)
                    .map(|slice| (key, plugin.apply(tr, slice, self)))
            })
            .collect();
        EditorState {
            doc: Arc::clone(&self.doc),
            selection,
            plugins: Arc::clone(&self.plugins),
            slices,
        }
    }

    /// Apply a root transaction and everything plugins append in response.
    ///
    /// Every plugin is shown the transactions it has not seen yet, together
    /// with the state it last saw. The loop ends after a full pass over the
    /// plugins appends nothing.
    pub fn apply_transaction(&self, root: Transaction) -> Applied {
        let mut state = self.apply(&root);
        let mut transactions = vec![root];
        // (state last seen, number of transactions seen) per plugin
        let mut seen: Vec<(EditorState, usize)> =
            self.plugins.iter().map(|_| (self.clone(), 0)).collect();

        for round in 0.. {
            if round == MAX_APPEND_ROUNDS {
                tracing::warn!(
                    "Append loop hit {} rounds, stopping with {} transactions",
                    MAX_APPEND_ROUNDS,
                    transactions.len()
                );
                break;
            }

            let mut appended = false;
            for (i, plugin) in self.plugins.iter().enumerate() {
                let (old, count) = &seen[i];
                if *count < transactions.len() {
                    if let Some(mut tr) =
                        plugin.append_transaction(&transactions[*count..], old, &state)
                    {
                        tr.mark_appended(plugin.key());
                        tracing::debug!(plugin = %plugin.key(), ?tr, "Appended transaction");
                        state = state.apply(&tr);
                        transactions.push(tr);
                        appended = true;
                    }
                }
                seen[i] = (state.clone(), transactions.len());
            }

            if !appended {
                break;
            }
        }

        Applied {
            state,
            transactions,
        }
    }

    /// Decorations of every plugin, merged
    pub fn decorations(&self) -> DecorationSet {
        self.plugins
            .iter()
            .fold(DecorationSet::empty(), |set, plugin| {
                set.merge(plugin.decorations(self))
            })
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.plugins.iter().map(|p| p.key()).collect();
        f.debug_struct("EditorState")
            .field("doc_size", &self.doc.content_size())
            .field("selection", &self.selection)
            .field("plugins", &keys)
            .finish()
    }
}
