//! `scraper`-backed implementation of the DOM node model

use crate::dom::{DomNode, NodeKind};
use ego_tree::NodeRef;
use scraper::{Html, Node};

/// A parsed HTML document
///
/// html5ever never rejects input: malformed markup is repaired the way a
/// browser would, so parsing is infallible.
pub struct Document {
    html: Html,
}

impl Document {
    /// Root node of the parse tree (kind `Document`)
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.html.tree.root()
    }
}

/// Parses HTML text into a [`Document`]
///
/// # Example
///
/// ```
/// use webpage_analyzer::dom::{parse_document, DomNode, NodeKind};
///
/// let document = parse_document("<!DOCTYPE html><title>Hi</title>");
/// assert_eq!(document.root().kind(), NodeKind::Document);
/// ```
pub fn parse_document(content: &str) -> Document {
    Document {
        html: Html::parse_document(content),
    }
}

impl<'a> DomNode<'a> for NodeRef<'a, Node> {
    fn kind(self) -> NodeKind {
        match self.value() {
            Node::Document => NodeKind::Document,
            Node::Doctype(_) => NodeKind::Doctype,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(self) -> Option<&'a str> {
        match self.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }

    fn attributes(self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        match self.value() {
            Node::Element(element) => Box::new(element.attrs()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn text(self) -> Option<&'a str> {
        match self.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        }
    }

    fn doctype_declaration(self) -> Option<String> {
        match self.value() {
            Node::Doctype(doctype) => {
                let parts = [doctype.name(), doctype.public_id(), doctype.system_id()];
                Some(
                    parts
                        .iter()
                        .filter(|part| !part.is_empty())
                        .copied()
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            }
            _ => None,
        }
    }

    fn first_child(self) -> Option<Self> {
        NodeRef::first_child(&self)
    }

    fn next_sibling(self) -> Option<Self> {
        NodeRef::next_sibling(&self)
    }

    fn attr(self, name: &str) -> Option<&'a str> {
        match self.value() {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }
}
