//! Selection types for the document model.

use super::document::Node;

/// Search direction when resolving a position to a valid selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bias {
    #[default]
    Forward,
    Backward,
}

impl Bias {
    pub fn reversed(self) -> Self {
        match self {
            Bias::Forward => Bias::Backward,
            Bias::Backward => Bias::Forward,
        }
    }
}

/// The active selection of an editor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Text selection with anchor (fixed end) and head (moving end).
    /// Collapsed when `anchor == head`.
    Text { anchor: usize, head: usize },
    /// A selected leaf block; `pos` is the position just before it
    Node { pos: usize },
}

impl Selection {
    /// Create a collapsed text selection
    pub fn cursor(pos: usize) -> Self {
        Selection::Text {
            anchor: pos,
            head: pos,
        }
    }

    pub fn text(anchor: usize, head: usize) -> Self {
        Selection::Text { anchor, head }
    }

    /// Position of the collapsed cursor, `None` for ranges and node selections
    pub fn cursor_pos(&self) -> Option<usize> {
        match *self {
            Selection::Text { anchor, head } if anchor == head => Some(head),
            _ => None,
        }
    }

    pub fn anchor(&self) -> usize {
        match *self {
            Selection::Text { anchor, .. } => anchor,
            Selection::Node { pos } => pos,
        }
    }

    pub fn head(&self) -> usize {
        match *self {
            Selection::Text { head, .. } => head,
            Selection::Node { pos } => pos + 1,
        }
    }

    pub fn from(&self) -> usize {
        self.anchor().min(self.head())
    }

    pub fn to(&self) -> usize {
        self.anchor().max(self.head())
    }

    pub fn is_empty(&self) -> bool {
        self.from() == self.to()
    }

    /// Nearest valid selection to `pos`.
    ///
    /// Searches in the bias direction first, then the other one. A textblock
    /// yields a cursor at its nearest content edge, a leaf block yields a node
    /// selection. Positions past the end of the document are clamped.
    pub fn near(doc: &Node, pos: usize, bias: Bias) -> Self {
        let pos = pos.min(doc.content_size());
        if doc.is_valid_cursor(pos) {
            return Selection::cursor(pos);
        }
        Self::find_from(doc, pos, bias)
            .or_else(|| Self::find_from(doc, pos, bias.reversed()))
            // Unreachable for a well-formed `block+` document
            .unwrap_or(Selection::cursor(0))
    }

    /// First selectable spot at or beyond `pos` in `bias` direction
    pub fn find_from(doc: &Node, pos: usize, bias: Bias) -> Option<Self> {
        let candidate = match bias {
            Bias::Forward => doc.blocks().find(|b| b.pos >= pos),
            Bias::Backward => doc.blocks().filter(|b| b.end() <= pos).last(),
        }?;
        Some(if candidate.is_textblock() {
            match bias {
                Bias::Forward => Selection::cursor(candidate.content_start()),
                Bias::Backward => Selection::cursor(candidate.content_end()),
            }
        } else {
            Selection::Node { pos: candidate.pos }
        })
    }

    /// Text selection spanning `anchor` to `head`, each resolved to the
    /// nearest valid position facing the other end
    pub fn between(doc: &Node, anchor: usize, head: usize) -> Self {
        let (anchor_bias, head_bias) = if anchor <= head {
            (Bias::Forward, Bias::Backward)
        } else {
            (Bias::Backward, Bias::Forward)
        };
        let anchor = Self::near_text(doc, anchor, anchor_bias);
        let head = Self::near_text(doc, head, head_bias);
        Selection::Text { anchor, head }
    }

    /// Like [`Selection::near`] but only lands on textblock positions
    fn near_text(doc: &Node, pos: usize, bias: Bias) -> usize {
        let pos = pos.min(doc.content_size());
        if doc.is_valid_cursor(pos) {
            return pos;
        }
        let ranges = doc.textblock_ranges();
        let forward = || ranges.iter().map(|r| *r.start()).find(|start| *start > pos);
        let backward = || ranges.iter().map(|r| *r.end()).filter(|end| *end < pos).last();
        let found = match bias {
            Bias::Forward => forward().or_else(backward),
            Bias::Backward => backward().or_else(forward),
        };
        found.unwrap_or(pos)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::cursor(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parser::parse_markup;

    fn doc() -> Node {
        parse_markup("<p>abc</p><img><p>de</p>").unwrap()
    }

    #[test]
    fn test_cursor_pos_only_for_collapsed_text() {
        assert_eq!(Selection::cursor(3).cursor_pos(), Some(3));
        assert_eq!(Selection::text(1, 3).cursor_pos(), None);
        assert_eq!(Selection::Node { pos: 5 }.cursor_pos(), None);
    }

    #[test]
    fn test_from_to() {
        let sel = Selection::text(5, 2);
        assert_eq!(sel.from(), 2);
        assert_eq!(sel.to(), 5);
        assert!(!sel.is_empty());

        let node = Selection::Node { pos: 5 };
        assert_eq!((node.from(), node.to()), (5, 6));
        assert!(!node.is_empty());
    }

    #[test]
    fn test_near_valid_position_is_identity() {
        assert_eq!(Selection::near(&doc(), 2, Bias::Forward), Selection::cursor(2));
    }

    #[test]
    fn test_near_resolves_block_boundaries() {
        let doc = doc();
        // <p>abc</p> spans 0..5, <img> 5..6, <p>de</p> 6..10
        assert_eq!(Selection::near(&doc, 0, Bias::Forward), Selection::cursor(1));
        assert_eq!(Selection::near(&doc, 5, Bias::Forward), Selection::Node { pos: 5 });
        assert_eq!(Selection::near(&doc, 5, Bias::Backward), Selection::cursor(4));
        assert_eq!(Selection::near(&doc, 6, Bias::Forward), Selection::cursor(7));
        assert_eq!(Selection::near(&doc, 10, Bias::Forward), Selection::cursor(9));
        assert_eq!(Selection::near(&doc, 99, Bias::Forward), Selection::cursor(9));
    }

    #[test]
    fn test_between_resolves_ends_towards_each_other() {
        let doc = parse_markup("<p>An example</p>").unwrap();
        assert_eq!(Selection::between(&doc, 0, 5), Selection::text(1, 5));
        assert_eq!(Selection::between(&doc, 14, 3), Selection::text(11, 3));
    }
}
