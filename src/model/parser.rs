//! Markup parser for document content
//!
//! Markup is read as XML with `roxmltree` after a light normalisation pass:
//! the fragment is wrapped in a synthetic root, HTML void elements (`<img>`,
//! `<br>`, `<hr>`, ...) are closed, and `<!DOCTYPE ...>` style declarations
//! and processing instructions are dropped.
//!
//! The schema knows `<p>` paragraphs, `<img>` leaf blocks and the `<example>`
//! mark. Unknown elements are transparent (their content is kept), stray
//! top-level inline content is wrapped in a paragraph, and whitespace-only
//! text between blocks is dropped.

use std::fmt;

use super::document::{MarkKind, Node};

/// Name of the synthetic root element wrapped around every fragment
const ROOT: &str = "sidestep-doc";

/// HTML elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Errors produced by [`parse_markup`]
#[derive(Debug)]
pub enum ParseError {
    /// Malformed markup: unterminated tag, mismatched or unexpected closing
    /// tag, element left open, unknown entity
    Xml(roxmltree::Error),
    /// Block element inside a paragraph
    NestedBlock { tag: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Xml(e) => write!(f, "malformed markup: {}", e),
            ParseError::NestedBlock { tag } => {
                write!(f, "<{}> is not allowed inside a paragraph", tag)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Xml(e) => Some(e),
            ParseError::NestedBlock { .. } => None,
        }
    }
}

impl From<roxmltree::Error> for ParseError {
    fn from(e: roxmltree::Error) -> ParseError {
        ParseError::Xml(e)
    }
}

/// Parse a markup fragment into a document node
pub fn parse_markup(input: &str) -> Result<Node, ParseError> {
    let xml = normalize(input);
    let document = roxmltree::Document::parse(&xml)?;

    let mut builder = Builder::default();
    builder.inflate_children(document.root_element(), &[])?;
    Ok(builder.finish())
}

/// Rewrite an HTML-ish fragment into a single well-formed XML element
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2 * ROOT.len() + 5);
    out.push('<');
    out.push_str(ROOT);
    out.push('>');

    let mut rest = input;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];

        if rest.starts_with("<!--") {
            // Comments may contain '>', copy through to their terminator
            let end = rest.find("-->").map_or(rest.len(), |i| i + 3);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        // Unterminated tags are left for the XML parser to report
        let Some(gt) = rest.find('>') else {
            break;
        };
        let tag = &rest[..=gt];
        rest = &rest[gt + 1..];

        if tag.starts_with("<!") || tag.starts_with("<?") {
            continue;
        }
        let closing = tag.starts_with("</");
        if !is_void(tag_name(tag)) {
            out.push_str(tag);
        } else if !closing {
            out.push_str(tag.trim_end_matches('>').trim_end_matches('/'));
            out.push_str("/>");
        }
        // Closing tags of void elements are dropped
    }

    out.push_str(rest);
    out.push_str("</");
    out.push_str(ROOT);
    out.push('>');
    out
}

fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Node>,
    /// Inline content of the paragraph being built
    inline: Option<Vec<Node>>,
    /// Inside an explicit `<p>`
    in_paragraph: bool,
}

impl Builder {
    fn inflate_children(
        &mut self,
        xml: roxmltree::Node,
        marks: &[MarkKind],
    ) -> Result<(), ParseError> {
        for child in xml.children() {
            if child.is_text() {
                self.push_text(child.text().unwrap_or_default(), marks);
            } else if child.is_element() {
                self.inflate_element(child, marks)?;
            }
        }
        Ok(())
    }

    fn inflate_element(
        &mut self,
        xml: roxmltree::Node,
        marks: &[MarkKind],
    ) -> Result<(), ParseError> {
        let name = xml.tag_name().name().to_ascii_lowercase();
        match name.as_str() {
            "p" | "img" if self.in_paragraph => Err(ParseError::NestedBlock {
                tag: name.clone(),
            }),
            "p" => {
                self.finish_paragraph();
                self.inline = Some(Vec::new());
                self.in_paragraph = true;
                self.inflate_children(xml, marks)?;
                self.in_paragraph = false;
                self.finish_paragraph();
                Ok(())
            }
            "img" => {
                self.finish_paragraph();
                self.blocks.push(Node::Image);
                Ok(())
            }
            "example" => {
                let mut marks = marks.to_vec();
                marks.push(MarkKind::Example);
                marks.sort();
                marks.dedup();
                self.inflate_children(xml, &marks)
            }
            _ => self.inflate_children(xml, marks),
        }
    }

    fn push_text(&mut self, text: &str, marks: &[MarkKind]) {
        if text.is_empty() {
            return;
        }
        if self.inline.is_none() && text.trim().is_empty() {
            return;
        }
        let inline = self.inline.get_or_insert_with(Vec::new);
        // Adjacent runs with identical marks collapse into one text node
        if let Some(Node::Text {
            text: last,
            marks: last_marks,
        }) = inline.last_mut()
        {
            if last_marks.as_slice() == marks {
                last.push_str(text);
                return;
            }
        }
        inline.push(Node::marked_text(text, marks.to_vec()));
    }

    fn finish_paragraph(&mut self) {
        if let Some(inline) = self.inline.take() {
            self.blocks.push(Node::paragraph(inline));
        }
    }

    fn finish(mut self) -> Node {
        self.finish_paragraph();
        if self.blocks.is_empty() {
            self.blocks.push(Node::paragraph(Vec::new()));
        }
        Node::doc(self.blocks)
    }
}
