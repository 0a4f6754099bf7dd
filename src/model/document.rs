//! Document tree and position arithmetic
//!
//! The schema is deliberately small: a document holds blocks, a block is either
//! a paragraph of inline text or an image leaf. Positions count tokens:
//! one per character of text, one for each opening and closing boundary of a
//! non-leaf block, and one for a leaf block. The document's own boundaries are
//! not counted, so position 0 is before the first block.

use std::fmt;
use std::ops::RangeInclusive;

/// Node kinds known to the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level node, content `block+`
    Doc,
    /// Block holding `inline*` content
    Paragraph,
    /// Selectable leaf block
    Image,
    /// Inline text run
    Text,
}

impl NodeKind {
    pub fn is_textblock(self) -> bool {
        self == NodeKind::Paragraph
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Image | NodeKind::Text)
    }
}

/// Mark kinds known to the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkKind {
    /// Wraps a sub-range of inline text (`<example>`)
    Example,
}

impl MarkKind {
    pub fn tag(self) -> &'static str {
        match self {
            MarkKind::Example => "example",
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Doc(Vec<Node>),
    Paragraph(Vec<Node>),
    Image,
    Text { text: String, marks: Vec<MarkKind> },
}

impl Node {
    pub fn doc(blocks: Vec<Node>) -> Self {
        Node::Doc(blocks)
    }

    pub fn paragraph(inline: Vec<Node>) -> Self {
        Node::Paragraph(inline)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<MarkKind>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Doc(_) => NodeKind::Doc,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Image => NodeKind::Image,
            Node::Text { .. } => NodeKind::Text,
        }
    }

    /// Child nodes (empty for leaves)
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Doc(children) | Node::Paragraph(children) => children,
            Node::Image | Node::Text { .. } => &[],
        }
    }

    /// Size of the node's content in position tokens
    pub fn content_size(&self) -> usize {
        match self {
            Node::Text { text, .. } => text.chars().count(),
            _ => self.content().iter().map(Node::node_size).sum(),
        }
    }

    /// Size of the node including its own boundaries
    pub fn node_size(&self) -> usize {
        match self {
            Node::Text { .. } => self.content_size(),
            Node::Image => 1,
            Node::Doc(_) | Node::Paragraph(_) => self.content_size() + 2,
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            _ => self.content().iter().map(Node::text_content).collect(),
        }
    }

    /// Marks on a text node (empty for everything else)
    pub fn marks(&self) -> &[MarkKind] {
        match self {
            Node::Text { marks, .. } => marks,
            _ => &[],
        }
    }

    /// Top-level blocks with their positions
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            children: self.content().iter(),
            pos: 0,
        }
    }

    /// The textblock whose content range contains `pos` (edges inclusive)
    pub fn textblock_at(&self, pos: usize) -> Option<Block<'_>> {
        self.blocks()
            .filter(|b| b.is_textblock())
            .find(|b| b.content_start() <= pos && pos <= b.content_end())
    }

    /// Content ranges of every textblock, edges inclusive, in document order
    pub fn textblock_ranges(&self) -> Vec<RangeInclusive<usize>> {
        self.blocks()
            .filter(|b| b.is_textblock())
            .map(|b| b.content_start()..=b.content_end())
            .collect()
    }

    /// Depth and parent of `pos`, `None` past the end of the document
    pub fn resolve(&self, pos: usize) -> Option<ResolvedPos> {
        if pos > self.content_size() {
            return None;
        }
        Some(match self.textblock_at(pos) {
            Some(block) => ResolvedPos {
                pos,
                depth: 1,
                parent: block.node.kind(),
                parent_offset: pos - block.content_start(),
            },
            None => ResolvedPos {
                pos,
                depth: 0,
                parent: NodeKind::Doc,
                parent_offset: pos,
            },
        })
    }

    /// Whether a collapsed cursor may sit at `pos`
    pub fn is_valid_cursor(&self, pos: usize) -> bool {
        self.resolve(pos).is_some_and(|r| r.in_textblock())
    }
}

/// A position with the node it points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPos {
    pub pos: usize,
    /// 0 between top-level blocks, 1 inside a block's content
    pub depth: usize,
    pub parent: NodeKind,
    /// Offset into the parent's content
    pub parent_offset: usize,
}

impl ResolvedPos {
    pub fn in_textblock(&self) -> bool {
        self.parent.is_textblock()
    }
}

impl fmt::Display for Node {
    /// Markup form, the inverse of [`crate::model::parser::parse_markup`]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Doc(blocks) => blocks.iter().try_for_each(|b| write!(f, "{}", b)),
            Node::Paragraph(inline) => {
                write!(f, "<p>")?;
                inline.iter().try_for_each(|n| write!(f, "{}", n))?;
                write!(f, "</p>")
            }
            Node::Image => write!(f, "<img>"),
            Node::Text { text, marks } => {
                for mark in marks {
                    write!(f, "<{}>", mark.tag())?;
                }
                for ch in text.chars() {
                    match ch {
                        '&' => write!(f, "&amp;")?,
                        '<' => write!(f, "&lt;")?,
                        '>' => write!(f, "&gt;")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                for mark in marks.iter().rev() {
                    write!(f, "</{}>", mark.tag())?;
                }
                Ok(())
            }
        }
    }
}

/// A top-level block and the position just before it
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub node: &'a Node,
    pub pos: usize,
}

impl Block<'_> {
    pub fn is_textblock(&self) -> bool {
        self.node.kind().is_textblock()
    }

    /// Position just after the block
    pub fn end(&self) -> usize {
        self.pos + self.node.node_size()
    }

    /// First position inside the block's content
    pub fn content_start(&self) -> usize {
        if self.node.kind().is_leaf() {
            self.pos
        } else {
            self.pos + 1
        }
    }

    /// Last position inside the block's content
    pub fn content_end(&self) -> usize {
        if self.node.kind().is_leaf() {
            self.end()
        } else {
            self.end() - 1
        }
    }
}

/// Iterator over top-level blocks, see [`Node::blocks`]
pub struct Blocks<'a> {
    children: std::slice::Iter<'a, Node>,
    pos: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.children.next()?;
        let block = Block {
            node,
            pos: self.pos,
        };
        self.pos += node.node_size();
        Some(block)
    }
}
