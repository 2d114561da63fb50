//! Login form detection
//!
//! A page has a login form when it has a password input AND at least one
//! login-context signal somewhere in the document. Signals come from input
//! naming, form and control attributes, and the leading text of common
//! text-bearing elements. All matching is case-insensitive substring matching.

use crate::analyzer::keywords::{
    contains_any, CONTROL_ATTRIBUTES, FORM_ATTRIBUTES, INPUT_ATTRIBUTES, LOGIN_INPUT_TOKENS,
    LOGIN_KEYWORDS, TEXT_ELEMENTS,
};
use crate::dom::{walk, DomNode, NodeKind};
use std::ops::ControlFlow;

/// Signals gathered while walking the document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LoginSignals {
    password_field: bool,
    login_context: bool,
}

impl LoginSignals {
    fn complete(&self) -> bool {
        self.password_field && self.login_context
    }
}

/// Returns true if the document contains a login form
pub fn has_login_form<'a, N: DomNode<'a>>(root: N, max_depth: usize) -> bool {
    let mut signals = LoginSignals::default();

    walk(root, max_depth, |node, _| {
        if node.kind() == NodeKind::Element {
            inspect_element(node, &mut signals);
        }
        if signals.complete() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    signals.complete()
}

fn inspect_element<'a, N: DomNode<'a>>(node: N, signals: &mut LoginSignals) {
    let tag = node.tag_name().unwrap_or_default();

    match tag {
        "input" => {
            let is_password = node
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("password"));
            if is_password {
                signals.password_field = true;
            }
            if attributes_match(node, INPUT_ATTRIBUTES, LOGIN_INPUT_TOKENS) {
                signals.login_context = true;
            }
        }
        "form" => {
            if attributes_match(node, FORM_ATTRIBUTES, LOGIN_KEYWORDS) {
                signals.login_context = true;
            }
        }
        "button" | "a" => {
            if attributes_match(node, CONTROL_ATTRIBUTES, LOGIN_KEYWORDS) {
                signals.login_context = true;
            }
        }
        _ => {}
    }

    if TEXT_ELEMENTS.contains(&tag) {
        if let Some(text) = node.first_child_text() {
            if contains_any(&text.trim().to_lowercase(), LOGIN_KEYWORDS) {
                signals.login_context = true;
            }
        }
    }
}

/// True if any of `attributes` on `node` contains one of `needles`
fn attributes_match<'a, N: DomNode<'a>>(node: N, attributes: &[&str], needles: &[&str]) -> bool {
    node.attributes()
        .filter(|(key, _)| attributes.contains(key))
        .any(|(_, value)| contains_any(&value.to_lowercase(), needles))
}
