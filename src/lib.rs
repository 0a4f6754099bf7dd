//! sidestep - stepped cursor traversal for co-located widgets
//!
//! Several zero-width widgets anchored at one document position would let a
//! single cursor step jump past all of them. This crate orders such widgets
//! deterministically and turns one movement gesture into one step per widget,
//! following the Elm Architecture pattern: messages produce transactions,
//! transactions produce new immutable states.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod decoration;
pub mod messages;
pub mod model;
pub mod plugin;
pub mod tracing;
pub mod update;
pub mod view;
pub mod widgets;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ClusterConfig;
pub use decoration::{DecorationSet, WidgetDecoration};
pub use messages::{Direction, Msg};
pub use model::{EditorState, Selection, Session, Transaction};
pub use plugin::{Plugin, PluginKey};
pub use widgets::{compute_side, OffsetIntent, OffsetState, OffsetTraversalController};
