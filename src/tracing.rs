//! Debug tracing infrastructure
//!
//! Structured logging with scoped filtering for debugging offset and
//! selection transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sidestep::widgets=trace` - reducer steps and widget sides
//! - `RUST_LOG=sidestep::update=debug` - dispatch diffs
//!
//! # Log Files
//!
//! Logs are written to `~/.config/sidestep/logs/sidestep.log` with daily rotation.

use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{Selection, Session};
use crate::widgets::OffsetTraversalController;

/// Initialize tracing with console output and a log file in the default logs dir
pub fn init() -> Result<(), String> {
    let logs_dir = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };
    init_with_logs_dir(logs_dir)
}

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// logs at debug level. Fails if a global subscriber is already installed.
pub fn init_with_logs_dir(logs_dir: Option<PathBuf>) -> Result<(), String> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = logs_dir.map(|dir| {
        let file_appender =
            tracing_appender::rolling::daily(dir, crate::config_paths::LOG_FILE_PREFIX);
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}

/// Lightweight snapshot of selection and offset for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetSnapshot {
    pub selection: Selection,
    pub offset: Option<usize>,
}

impl OffsetSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            selection: session.state.selection(),
            offset: OffsetTraversalController::state(&session.state).map(|s| s.offset()),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &OffsetSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.selection != other.selection {
            changes.push(format!(
                "selection {} → {}",
                describe(self.selection),
                describe(other.selection)
            ));
        }
        if self.offset != other.offset {
            changes.push(format!(
                "offset {:?} → {:?}",
                self.offset, other.offset
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(selection: Selection) -> String {
    match selection {
        Selection::Text { anchor, head } if anchor == head => format!("|{}", head),
        Selection::Text { anchor, head } => format!("{}..{}", anchor, head),
        Selection::Node { pos } => format!("node@{}", pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let a = OffsetSnapshot {
            selection: Selection::cursor(6),
            offset: Some(0),
        };
        let b = OffsetSnapshot {
            selection: Selection::cursor(6),
            offset: Some(1),
        };
        let c = OffsetSnapshot {
            selection: Selection::text(1, 5),
            offset: Some(1),
        };
        assert_eq!(a.diff(&a), None);
        assert_eq!(a.diff(&b).as_deref(), Some("offset Some(0) → Some(1)"));
        assert_eq!(b.diff(&c).as_deref(), Some("selection |6 → 1..5"));
    }

    #[test]
    fn test_init_installs_only_once() {
        let dir = tempfile::tempdir().unwrap();
        // Only one global subscriber can ever be installed
        let _ = init_with_logs_dir(Some(dir.path().to_path_buf()));
        assert!(init_with_logs_dir(None).is_err());
    }
}
