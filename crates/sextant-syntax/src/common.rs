//! Small helpers over raw tree-sitter nodes.

use miette::SourceSpan;
use sextant_source::TextRange;
use tree_sitter::Node;

/// Creates a SourceSpan from a Node's byte range
pub fn create_span(node: &Node) -> SourceSpan {
    SourceSpan::new(node.start_byte().into(), node.end_byte() - node.start_byte())
}

/// Byte range of a node
pub fn text_range(node: &Node) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

/// Extracts text from a Node, yielding `""` on invalid UTF-8 or an out-of-range node
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// All children of a node, anonymous tokens included
pub fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children of a node, in document order
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Named children that are not comments or attributes
pub fn significant_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    named_children(node)
        .into_iter()
        .filter(|child| !is_trivia(child))
        .collect()
}

/// Every child stored under `field`, in document order
pub fn children_by_field<'t>(node: &Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// First child (named or not) with the given kind
pub fn find_first_child<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    children(node).into_iter().find(|child| child.kind() == kind)
}

/// Whether a node has an anonymous token child such as `mut` or `..`
pub fn has_token(node: &Node, token: &str) -> bool {
    children(node)
        .iter()
        .any(|child| !child.is_named() && child.kind() == token)
}

/// The field name under which `node` is stored in its parent, if any
pub fn field_name_of(node: &Node) -> Option<&'static str> {
    let parent = node.parent()?;
    let mut cursor = parent.walk();
    if !cursor.goto_first_child() {
        return None;
    }
    loop {
        if cursor.node() == *node {
            return cursor.field_name();
        }
        if !cursor.goto_next_sibling() {
            return None;
        }
    }
}

/// Nearest ancestor (excluding `node` itself) satisfying `pred`
pub fn ancestor_where<'t>(node: &Node<'t>, pred: impl Fn(&Node<'t>) -> bool) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if pred(&candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Nearest ancestor of the given kind
pub fn ancestor_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    ancestor_where(node, |n| n.kind() == kind)
}

/// Whether `inner` lies inside `outer` (or is `outer`)
pub fn contains(outer: &Node, inner: &Node) -> bool {
    outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
}

/// Comments, attributes and other nodes with no semantic weight
pub fn is_trivia(node: &Node) -> bool {
    matches!(
        node.kind(),
        "line_comment" | "block_comment" | "attribute_item" | "inner_attribute_item"
    )
}
