//! DOM node model consumed by the HTML analyzer
//!
//! The analyzer never looks at raw markup. It walks a tree through the
//! [`DomNode`] trait, which exposes just enough of a parse tree for depth-first
//! traversal: a node-kind discriminator, element tag names, ordered attributes,
//! text content, and first-child/next-sibling navigation.
//!
//! The production implementation wraps the `scraper` (html5ever) tree; tests
//! can supply their own synthetic trees.

mod html;
mod walk;

pub use html::{parse_document, Document};
pub use walk::{walk, walk_unbounded};

/// Discriminates the kinds of nodes the analyzer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of the parse tree
    Document,
    /// `<!DOCTYPE ...>` declaration
    Doctype,
    /// Any element (`<a>`, `<form>`, ...)
    Element,
    /// Character data
    Text,
    /// Comments, processing instructions, fragments
    Other,
}

/// A node of an HTML parse tree
///
/// Nodes are cheap handles (`Copy`) borrowing from a tree that lives for `'a`.
pub trait DomNode<'a>: Copy {
    /// The kind of this node
    fn kind(self) -> NodeKind;

    /// Lower-case tag name for elements, None otherwise
    fn tag_name(self) -> Option<&'a str>;

    /// Attributes of an element in source order (empty for other kinds)
    fn attributes(self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    /// Character data of a text node, None otherwise
    fn text(self) -> Option<&'a str>;

    /// Full declaration text of a doctype node, None otherwise
    ///
    /// For `<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "...">` this is
    /// the name followed by the public and system identifiers.
    fn doctype_declaration(self) -> Option<String>;

    /// First child in document order
    fn first_child(self) -> Option<Self>;

    /// Next sibling in document order
    fn next_sibling(self) -> Option<Self>;

    /// Value of the first attribute named `name`
    fn attr(self, name: &str) -> Option<&'a str> {
        self.attributes()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// True if this is an element with the given tag name
    fn is_element(self, name: &str) -> bool {
        self.kind() == NodeKind::Element && self.tag_name() == Some(name)
    }

    /// Text of the first child, when that child is a text node
    fn first_child_text(self) -> Option<&'a str> {
        self.first_child().and_then(|child| child.text())
    }
}
