//! Session model - the complete state of one editing session
//!
//! Document tree, selections, transactions and the immutable editor state
//! snapshot, plus [`Session`] which owns the current snapshot.

pub mod document;
pub mod parser;
pub mod selection;
pub mod state;
pub mod transaction;

pub use document::{Block, MarkKind, Node, NodeKind, ResolvedPos};
pub use parser::{parse_markup, ParseError};
pub use selection::{Bias, Selection};
pub use state::{Applied, EditorState, MAX_APPEND_ROUNDS};
pub use transaction::Transaction;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ClusterConfig;
use crate::decoration::DecorationSet;
use crate::plugin::Plugin;
use crate::widgets::{OffsetState, OffsetTraversalController, WidgetCluster};

/// The complete session model
#[derive(Debug, Clone)]
pub struct Session {
    /// Current state snapshot
    pub state: EditorState,
    /// Configuration the session was created from
    pub config: ClusterConfig,
}

impl Session {
    /// Parse the configured content and install the traversal controller.
    /// The cursor starts at the beginning of the document.
    pub fn new(config: ClusterConfig) -> Result<Self> {
        let doc = parse_markup(&config.content).context("Failed to parse session content")?;
        config.validate(&doc)?;

        let selection = Selection::near(&doc, 0, Bias::Forward);
        let controller: Arc<dyn Plugin> = Arc::new(OffsetTraversalController::new(
            WidgetCluster::new(config.anchor_pos, config.widget_count),
        ));
        let state = EditorState::create(doc, selection, vec![controller]);

        tracing::debug!(
            anchor = config.anchor_pos,
            widgets = config.widget_count.get(),
            "Session created"
        );
        Ok(Self { state, config })
    }

    pub fn cluster(&self) -> WidgetCluster {
        WidgetCluster::new(self.config.anchor_pos, self.config.widget_count)
    }

    /// Current offset (0 if the controller slice is missing)
    pub fn offset(&self) -> usize {
        OffsetTraversalController::state(&self.state)
            .unwrap_or(OffsetState::new())
            .offset()
    }

    /// Apply a transaction through the full append pipeline
    pub fn dispatch(&mut self, tr: Transaction) -> Vec<Transaction> {
        let Applied {
            state,
            transactions,
        } = self.state.apply_transaction(tr);
        self.state = state;
        transactions
    }

    pub fn decorations(&self) -> DecorationSet {
        self.state.decorations()
    }

    /// Plain-text rendering of the current state
    pub fn render(&self) -> String {
        crate::view::render(&self.state)
    }
}
