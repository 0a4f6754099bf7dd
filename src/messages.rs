//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editor messages (cursor movement and selection)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // === Basic Movement ===
    /// Move cursor in a direction (Arrow keys)
    MoveCursor(Direction),
    /// Move cursor to start of the textblock (Home key)
    MoveCursorLineStart,
    /// Move cursor to end of the textblock (End key)
    MoveCursorLineEnd,
    /// Move cursor to start of document (Ctrl+Home)
    MoveCursorDocumentStart,
    /// Move cursor to end of document (Ctrl+End)
    MoveCursorDocumentEnd,
    /// Set cursor to a document position (mouse click)
    SetCursorPosition(usize),

    // === Selection ===
    /// Move head and extend selection (Shift+Arrow)
    MoveCursorWithSelection(Direction),
    /// Select from anchor to head (mouse drag)
    SetSelection { anchor: usize, head: usize },
    /// Select all text (Cmd+A)
    SelectAll,
    /// Collapse selection to its head (Escape)
    ClearSelection,
}
