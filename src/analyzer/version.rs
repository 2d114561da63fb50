//! HTML version detection
//!
//! The DOCTYPE declaration decides the version when present. Without one,
//! the document is reported as HTML5 if it uses any HTML5-only markup.

use crate::analyzer::keywords::{
    DOCTYPE_PATTERNS, HTML5_ATTRIBUTES, HTML5_ELEMENTS, HTML5_INPUT_TYPES,
    VERSION_HTML5, VERSION_UNKNOWN,
};
use crate::dom::{walk, walk_unbounded, DomNode, NodeKind};
use std::ops::ControlFlow;

/// Detects the HTML version of the document rooted at `root`
pub fn detect_version<'a, N: DomNode<'a>>(root: N, max_depth: usize) -> &'static str {
    if let Some(declaration) = find_doctype(root) {
        if let Some(version) = match_doctype(&declaration) {
            return version;
        }
    }

    if has_html5_features(root, max_depth) {
        VERSION_HTML5
    } else {
        VERSION_UNKNOWN
    }
}

/// Returns the lower-cased declaration of the first doctype node
fn find_doctype<'a, N: DomNode<'a>>(root: N) -> Option<String> {
    walk_unbounded(root, |node, _| match node.kind() {
        NodeKind::Doctype => match node.doctype_declaration() {
            Some(declaration) => ControlFlow::Break(declaration.to_lowercase()),
            None => ControlFlow::Continue(()),
        },
        _ => ControlFlow::Continue(()),
    })
}

/// Matches a lower-cased doctype declaration against the ordered pattern table
pub fn match_doctype(declaration: &str) -> Option<&'static str> {
    DOCTYPE_PATTERNS
        .iter()
        .find(|(required, _)| required.iter().all(|part| declaration.contains(part)))
        .map(|(_, version)| *version)
}

/// True if any HTML5-only element, input type, or global attribute is present
fn has_html5_features<'a, N: DomNode<'a>>(root: N, max_depth: usize) -> bool {
    walk(root, max_depth, |node, _| {
        if node.kind() != NodeKind::Element {
            return ControlFlow::Continue(());
        }

        let tag = node.tag_name().unwrap_or_default();
        if HTML5_ELEMENTS.contains(&tag) {
            return ControlFlow::Break(());
        }

        if tag == "input" {
            if let Some(input_type) = node.attr("type") {
                if HTML5_INPUT_TYPES.contains(&input_type.to_lowercase().as_str()) {
                    return ControlFlow::Break(());
                }
            }
        }

        if node
            .attributes()
            .any(|(key, _)| HTML5_ATTRIBUTES.contains(&key))
        {
            return ControlFlow::Break(());
        }

        ControlFlow::Continue(())
    })
    .is_some()
}
