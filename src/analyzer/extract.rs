//! Title, heading, and hyperlink extraction

use crate::analyzer::keywords::HEADING_TAGS;
use crate::dom::{walk, walk_unbounded, DomNode, NodeKind};
use std::collections::BTreeMap;
use std::ops::ControlFlow;

/// Extracts the document title
///
/// Returns the trimmed text of the first `<title>` whose first child is a
/// non-blank text node, or an empty string.
pub fn extract_title<'a, N: DomNode<'a>>(root: N) -> String {
    walk_unbounded(root, |node, _| {
        if node.is_element("title") {
            if let Some(text) = node.first_child_text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return ControlFlow::Break(trimmed.to_string());
                }
            }
        }
        ControlFlow::Continue(())
    })
    .unwrap_or_default()
}

/// Counts `h1`..`h6` elements
///
/// Only tags that occur get an entry.
pub fn extract_headings<'a, N: DomNode<'a>>(root: N, max_depth: usize) -> BTreeMap<String, usize> {
    let mut headings = BTreeMap::new();

    walk::<_, (), _>(root, max_depth, |node, _| {
        if node.kind() == NodeKind::Element {
            if let Some(tag) = node.tag_name().filter(|tag| HEADING_TAGS.contains(tag)) {
                *headings.entry(tag.to_string()).or_insert(0) += 1;
            }
        }
        ControlFlow::Continue(())
    });

    headings
}

/// Collects the raw `href` of every `<a>` with a non-empty `href`
///
/// One entry per anchor in document order; values are returned exactly as
/// written in the markup. When an anchor repeats `href`, the first non-empty
/// one is used.
pub fn extract_links<'a, N: DomNode<'a>>(root: N, max_depth: usize) -> Vec<String> {
    let mut links = Vec::new();

    walk::<_, (), _>(root, max_depth, |node, _| {
        if node.is_element("a") {
            if let Some((_, href)) = node
                .attributes()
                .find(|(key, value)| *key == "href" && !value.is_empty())
            {
                links.push(href.to_string());
            }
        }
        ControlFlow::Continue(())
    });

    links
}
