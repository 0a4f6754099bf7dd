//! Transactions: one committed edit step plus its metadata.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::selection::Selection;
use crate::plugin::PluginKey;

type MetaValue = Arc<dyn Any + Send + Sync>;

/// An edit step produced by user input or appended by a plugin.
///
/// The document is never changed by a transaction in this crate; a transaction
/// can replace the selection and carries typed metadata keyed by plugin.
#[derive(Clone)]
pub struct Transaction {
    before: Selection,
    selection: Option<Selection>,
    meta: HashMap<PluginKey, MetaValue>,
    appended_by: Option<PluginKey>,
}

impl Transaction {
    /// Start a transaction from a state whose selection is `before`
    pub fn new(before: Selection) -> Self {
        Self {
            before,
            selection: None,
            meta: HashMap::new(),
            appended_by: None,
        }
    }

    /// Replace the selection
    pub fn set_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Attach metadata under `key`, replacing any previous value
    pub fn set_meta<T: Any + Send + Sync>(mut self, key: PluginKey, value: T) -> Self {
        self.meta.insert(key, Arc::new(value));
        self
    }

    /// Metadata stored under `key`, if present and of type `T`
    pub fn meta<T: Any>(&self, key: PluginKey) -> Option<&T> {
        self.meta.get(&key).and_then(|v| v.downcast_ref::<T>())
    }

    pub fn has_meta(&self, key: PluginKey) -> bool {
        self.meta.contains_key(&key)
    }

    /// Selection after this transaction
    pub fn selection(&self) -> Selection {
        self.selection.unwrap_or(self.before)
    }

    /// Selection of the state the transaction was started from
    pub fn selection_before(&self) -> Selection {
        self.before
    }

    /// Whether the transaction explicitly sets a selection
    pub fn selection_set(&self) -> bool {
        self.selection.is_some()
    }

    /// Plugin that appended this transaction, `None` for root transactions
    pub fn appended_by(&self) -> Option<PluginKey> {
        self.appended_by
    }

    pub(crate) fn mark_appended(&mut self, key: PluginKey) {
        self.appended_by = Some(key);
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.meta.keys().map(PluginKey::name).collect();
        keys.sort_unstable();
        f.debug_struct("Transaction")
            .field("before", &self.before)
            .field("selection", &self.selection)
            .field("meta", &keys)
            .field("appended_by", &self.appended_by)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: PluginKey = PluginKey::new("test");
    const OTHER: PluginKey = PluginKey::new("other");

    #[test]
    fn test_selection_defaults_to_before() {
        let tr = Transaction::new(Selection::cursor(4));
        assert!(!tr.selection_set());
        assert_eq!(tr.selection(), Selection::cursor(4));

        let tr = tr.set_selection(Selection::cursor(7));
        assert!(tr.selection_set());
        assert_eq!(tr.selection(), Selection::cursor(7));
        assert_eq!(tr.selection_before(), Selection::cursor(4));
    }

    #[test]
    fn test_typed_meta() {
        let tr = Transaction::new(Selection::cursor(0)).set_meta(KEY, 42u32);
        assert_eq!(tr.meta::<u32>(KEY), Some(&42));
        assert_eq!(tr.meta::<i64>(KEY), None);
        assert_eq!(tr.meta::<u32>(OTHER), None);
        assert!(tr.has_meta(KEY));
        assert!(!tr.has_meta(OTHER));
    }
}
