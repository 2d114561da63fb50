//! Stack-based depth-first traversal with a depth guard

use crate::dom::DomNode;
use std::ops::ControlFlow;

/// Visits `root` and its descendants in document order
///
/// Each node is visited with its depth (root = 0). Nodes deeper than
/// `max_depth` are neither visited nor descended into. The visitor can stop
/// the walk early by returning `ControlFlow::Break`, whose value is returned.
///
/// The walk keeps an explicit stack instead of recursing, so arbitrarily deep
/// input cannot exhaust the call stack.
pub fn walk<'a, N, B, F>(root: N, max_depth: usize, mut visit: F) -> Option<B>
where
    N: DomNode<'a>,
    F: FnMut(N, usize) -> ControlFlow<B>,
{
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        // Siblings share the depth, so the whole run can be skipped
        if depth > max_depth {
            continue;
        }

        if let ControlFlow::Break(value) = visit(node, depth) {
            return Some(value);
        }

        if depth > 0 {
            if let Some(sibling) = node.next_sibling() {
                stack.push((sibling, depth));
            }
        }

        // Pushed last so the subtree is finished before the next sibling
        if let Some(child) = node.first_child() {
            stack.push((child, depth + 1));
        }
    }

    None
}

/// Same as [`walk`] without a depth limit
pub fn walk_unbounded<'a, N, B, F>(root: N, visit: F) -> Option<B>
where
    N: DomNode<'a>,
    F: FnMut(N, usize) -> ControlFlow<B>,
{
    walk(root, usize::MAX, visit)
}
