//! Selection targets for movement and selection messages.

use crate::messages::{Direction, Msg};
use crate::model::{Bias, Node, Selection};

/// Selection `msg` asks for, starting from `current`.
///
/// Returns `None` when the message cannot move anything (for example a
/// horizontal move at the very end of the document).
pub fn target_selection(doc: &Node, current: Selection, msg: &Msg) -> Option<Selection> {
    let target = match *msg {
        Msg::MoveCursor(Direction::Right) => move_right(doc, current),
        Msg::MoveCursor(Direction::Left) => move_left(doc, current),
        Msg::MoveCursor(Direction::Up) => move_vertical(doc, current, Bias::Backward),
        Msg::MoveCursor(Direction::Down) => move_vertical(doc, current, Bias::Forward),
        Msg::MoveCursorWithSelection(Direction::Right) => extend(doc, current, Bias::Forward),
        Msg::MoveCursorWithSelection(Direction::Left) => extend(doc, current, Bias::Backward),
        Msg::MoveCursorWithSelection(Direction::Up | Direction::Down) => {
            let Selection::Text { anchor, .. } = current else {
                return None;
            };
            let bias = if msg == &Msg::MoveCursorWithSelection(Direction::Up) {
                Bias::Backward
            } else {
                Bias::Forward
            };
            let head = move_vertical(doc, current, bias)?.head();
            Some(Selection::text(anchor, head))
        }
        Msg::MoveCursorLineStart => textblock_edge(doc, current, Bias::Backward),
        Msg::MoveCursorLineEnd => textblock_edge(doc, current, Bias::Forward),
        Msg::MoveCursorDocumentStart => Some(Selection::near(doc, 0, Bias::Forward)),
        Msg::MoveCursorDocumentEnd => {
            Some(Selection::near(doc, doc.content_size(), Bias::Backward))
        }
        Msg::SetCursorPosition(pos) => Some(Selection::near(doc, pos, Bias::Forward)),
        Msg::SetSelection { anchor, head } if anchor == head => {
            Some(Selection::near(doc, head, Bias::Forward))
        }
        Msg::SetSelection { anchor, head } => Some(Selection::between(doc, anchor, head)),
        Msg::SelectAll => Some(Selection::between(doc, 0, doc.content_size())),
        Msg::ClearSelection => match current {
            Selection::Text { head, .. } => Some(Selection::cursor(head)),
            Selection::Node { .. } => None,
        },
    };
    target.filter(|t| *t != current)
}

/// One position right: collapses ranges to their end, steps over block
/// boundaries, and selects leaf blocks it runs into
fn move_right(doc: &Node, current: Selection) -> Option<Selection> {
    match current {
        Selection::Node { pos } => Some(Selection::near(doc, pos + 1, Bias::Forward)),
        Selection::Text { .. } if !current.is_empty() => Some(Selection::cursor(current.to())),
        Selection::Text { head, .. } => {
            let block = doc.textblock_at(head)?;
            if head < block.content_end() {
                Some(Selection::cursor(head + 1))
            } else {
                Selection::find_from(doc, block.end(), Bias::Forward)
            }
        }
    }
}

fn move_left(doc: &Node, current: Selection) -> Option<Selection> {
    match current {
        Selection::Node { pos } => Some(Selection::near(doc, pos, Bias::Backward)),
        Selection::Text { .. } if !current.is_empty() => Some(Selection::cursor(current.from())),
        Selection::Text { head, .. } => {
            let block = doc.textblock_at(head)?;
            if head > block.content_start() {
                Some(Selection::cursor(head - 1))
            } else {
                Selection::find_from(doc, block.pos, Bias::Backward)
            }
        }
    }
}

/// Move the head one position, keeping the anchor; only lands in textblocks
fn extend(doc: &Node, current: Selection, bias: Bias) -> Option<Selection> {
    let Selection::Text { anchor, head } = current else {
        return match bias {
            Bias::Forward => move_right(doc, current),
            Bias::Backward => move_left(doc, current),
        };
    };
    let block = doc.textblock_at(head)?;
    let head = match bias {
        Bias::Forward if head < block.content_end() => head + 1,
        Bias::Backward if head > block.content_start() => head - 1,
        Bias::Forward => doc
            .blocks()
            .find(|b| b.is_textblock() && b.pos >= block.end())?
            .content_start(),
        Bias::Backward => doc
            .blocks()
            .filter(|b| b.is_textblock() && b.end() <= block.pos)
            .last()?
            .content_end(),
    };
    Some(Selection::text(anchor, head))
}

/// Same offset into the previous (`Backward`) or next (`Forward`) textblock,
/// or the current block's edge when there is none
fn move_vertical(doc: &Node, current: Selection, bias: Bias) -> Option<Selection> {
    let head = current.head();
    let block = doc.textblock_at(head)?;
    let column = head - block.content_start();
    let neighbour = match bias {
        Bias::Backward => doc
            .blocks()
            .filter(|b| b.is_textblock() && b.end() <= block.pos)
            .last(),
        Bias::Forward => doc
            .blocks()
            .find(|b| b.is_textblock() && b.pos >= block.end()),
    };
    let pos = match neighbour {
        Some(next) => (next.content_start() + column).min(next.content_end()),
        None if bias == Bias::Backward => block.content_start(),
        None => block.content_end(),
    };
    Some(Selection::cursor(pos))
}

fn textblock_edge(doc: &Node, current: Selection, bias: Bias) -> Option<Selection> {
    let block = doc.textblock_at(current.head())?;
    Some(Selection::cursor(match bias {
        Bias::Backward => block.content_start(),
        Bias::Forward => block.content_end(),
    }))
}
