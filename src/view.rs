//! Plain-text view of an editor state
//!
//! Paragraphs are separated by newlines, images draw as `▣`, widgets as their
//! glyph in render order. A collapsed cursor draws as `|` and sorts at side 0
//! among the widgets at its position; a range draws `[` at its start and `]`
//! at its end.

use crate::decoration::{DecorationSet, WidgetDecoration};
use crate::model::{EditorState, Node, NodeKind, Selection};

const CURSOR: char = '|';
const RANGE_START: char = '[';
const RANGE_END: char = ']';
const IMAGE: char = '▣';

/// Render `state` with its own decorations
pub fn render(state: &EditorState) -> String {
    render_with(state.doc(), state.selection(), &state.decorations())
}

/// Render a document, selection and decoration set
pub fn render_with(doc: &Node, selection: Selection, decorations: &DecorationSet) -> String {
    let mut out = String::new();
    let emit_at = |out: &mut String, pos: usize| {
        emit_position(out, pos, selection, decorations);
    };

    let blocks: Vec<_> = doc.blocks().collect();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match block.node.kind() {
            NodeKind::Image => {
                emit_at(&mut out, block.pos);
                out.push(IMAGE);
                // Adjacent leaf blocks share this position; the next one emits it
                let next_is_leaf = blocks
                    .get(i + 1)
                    .is_some_and(|next| next.node.kind() == NodeKind::Image);
                if !next_is_leaf {
                    emit_at(&mut out, block.end());
                }
            }
            _ => {
                let mut pos = block.content_start();
                for ch in block.node.text_content().chars() {
                    emit_at(&mut out, pos);
                    out.push(ch);
                    pos += 1;
                }
                emit_at(&mut out, pos);
            }
        }
    }
    out
}

/// Widgets, cursor and range brackets at one position.
///
/// Selection markers sit at side 0: after widgets with a negative side,
/// before the rest.
fn emit_position(out: &mut String, pos: usize, selection: Selection, decorations: &DecorationSet) {
    let mut markers = String::new();
    if !selection.is_empty() && selection.to() == pos {
        markers.push(RANGE_END);
    }
    if selection.cursor_pos() == Some(pos) {
        markers.push(CURSOR);
    }
    if !selection.is_empty() && selection.from() == pos {
        markers.push(RANGE_START);
    }

    let (before, after): (Vec<&WidgetDecoration>, Vec<&WidgetDecoration>) =
        decorations.widgets_at(pos).partition(|w| w.before_cursor());
    out.extend(before.iter().map(|w| w.kind.glyph()));
    out.push_str(&markers);
    out.extend(after.iter().map(|w| w.kind.glyph()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_markup;

    #[test]
    fn test_render_cursor_and_blocks() {
        let doc = parse_markup("<p>ab</p><img><p>c</p>").unwrap();
        let out = render_with(&doc, Selection::cursor(2), &DecorationSet::empty());
        assert_eq!(out, "a|b\n▣\nc");
    }

    #[test]
    fn test_render_cursor_between_widgets() {
        let doc = parse_markup("<p>ab</p>").unwrap();
        let set = DecorationSet::create(
            &doc,
            vec![
                WidgetDecoration::new(2, 0, -0.8),
                WidgetDecoration::new(2, 1, 1.6),
            ],
        );
        assert_eq!(render_with(&doc, Selection::cursor(2), &set), "a¤|¤b");
        assert_eq!(render_with(&doc, Selection::cursor(1), &set), "|a¤¤b");
    }

    #[test]
    fn test_render_range_and_node_selection() {
        let doc = parse_markup("<p>abc</p><img>").unwrap();
        assert_eq!(
            render_with(&doc, Selection::text(3, 1), &DecorationSet::empty()),
            "[ab]c\n▣"
        );
        assert_eq!(
            render_with(&doc, Selection::Node { pos: 5 }, &DecorationSet::empty()),
            "abc\n[▣]"
        );
    }
}
