//! Tree normalization between parsing and rendering.
//!
//! Two rewrites happen here so the renderer can stay simple:
//!
//! - every `table` is rebuilt to hold exactly `thead > tr` (the first row
//!   found anywhere beneath it) and `tbody > tr*` (the rest), whatever the
//!   source nesting looked like
//! - runs of adjacent `ul`/`ol` siblings are grouped under a synthetic
//!   wrapper element, so the renderer can join them without blank lines
//!   (Google Docs exports one `ol` per indent level)

use crate::ast::{AttributeMap, Element, Node};

/// Tag name of the synthetic element wrapping adjacent lists.
pub const LIST_GROUP_TAG: &str = "htmldown:list-group";

/// Returns a normalized copy of the tree.
#[must_use]
pub fn restruct(node: &Node) -> Node {
    match node {
        Node::Element(element) => Node::Element(restruct_element(element)),
        Node::Text(content) => Node::Text(content.clone()),
    }
}

fn restruct_element(element: &Element) -> Element {
    if element.tag == "table" {
        restruct_table(element)
    } else {
        let children = group_adjacent_lists(&element.children);
        Element::with_children(&element.tag, &element.attributes, children)
    }
}

fn group_adjacent_lists(nodes: &[Node]) -> Vec<Node> {
    let mut children = Vec::new();
    let mut run: Vec<Node> = Vec::new();

    for child in nodes {
        if child.is_list_element() {
            run.push(restruct(child));
        } else {
            flush_list_run(&mut children, &mut run);
            children.push(restruct(child));
        }
    }
    flush_list_run(&mut children, &mut run);

    children
}

fn flush_list_run(children: &mut Vec<Node>, run: &mut Vec<Node>) {
    if !run.is_empty() {
        children.push(Node::Element(Element::with_children(
            LIST_GROUP_TAG,
            &AttributeMap::new(),
            std::mem::take(run),
        )));
    }
}

/// Rebuilds a table as `thead > tr` plus `tbody > tr*`.
///
/// Rows are taken in document order from anywhere beneath the table, so
/// sources with bare `tr` children or extra section elements normalize to
/// the same shape. A table with no rows keeps no children at all.
fn restruct_table(element: &Element) -> Element {
    let mut table = Element::new("table", &element.attributes);

    let mut rows = Vec::new();
    for child in &element.children {
        collect_rows(child, &mut rows);
    }

    let mut rows = rows.into_iter();
    let Some(head_row) = rows.next() else {
        return table;
    };

    table.children.push(Node::Element(Element::with_children(
        "thead",
        &AttributeMap::new(),
        vec![head_row],
    )));
    table.children.push(Node::Element(Element::with_children(
        "tbody",
        &AttributeMap::new(),
        rows.collect(),
    )));

    table
}

fn collect_rows(node: &Node, rows: &mut Vec<Node>) {
    if let Node::Element(element) = node {
        if element.tag == "tr" {
            rows.push(node.clone());
        } else {
            for child in &element.children {
                collect_rows(child, rows);
            }
        }
    }
}
