//! Markdown rendering over the normalized document tree.
//!
//! Rendering is block-oriented: a container's children split into blocks
//! (block-level elements stand alone, consecutive inline nodes coalesce
//! into one block) and blocks are joined by a blank line. Inline
//! rendering has a table mode, because pipe tables cannot hold real line
//! breaks or paragraphs.

use tracing::warn;

use crate::ast::{is_block_element, Element, Node};
use crate::entity;
use crate::restruct::LIST_GROUP_TAG;

/// Renders a normalized document tree to Markdown.
pub struct Renderer<'a> {
    root: &'a Node,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer over `root`.
    #[must_use]
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    /// Renders the tree to Markdown.
    ///
    /// A non-empty result always ends with exactly one newline. For an
    /// `html` root only the `body` is rendered; `head` content never is.
    #[must_use]
    pub fn render(&self) -> String {
        let content = match self.root {
            Node::Element(element) if element.tag == "html" => element
                .children
                .iter()
                .filter_map(Node::as_element)
                .find(|child| child.tag == "body")
                .map(|body| self.render_blocks(&body.children))
                .unwrap_or_default(),
            Node::Element(element) if element.tag == "body" => {
                self.render_blocks(&element.children)
            }
            other => self.render_blocks(std::slice::from_ref(other)),
        };

        if content.is_empty() {
            content
        } else {
            format!("{content}\n")
        }
    }

    /// Renders a child list as blank-line-separated blocks.
    fn render_blocks(&self, nodes: &[Node]) -> String {
        let mut blocks: Vec<String> = Vec::new();
        let mut inline_run = String::new();

        for node in nodes {
            match node.as_element() {
                Some(element) if is_block_node(element) => {
                    if !inline_run.is_empty() {
                        blocks.push(std::mem::take(&mut inline_run));
                    }
                    let block = self.render_block(element);
                    if !block.is_empty() {
                        blocks.push(block);
                    }
                }
                _ => inline_run.push_str(&self.render_inline(node, false)),
            }
        }
        if !inline_run.is_empty() {
            blocks.push(inline_run);
        }

        blocks.join("\n\n")
    }

    fn render_block(&self, element: &Element) -> String {
        if renders_nothing(&element.tag) {
            return String::new();
        }

        match element.tag.as_str() {
            "h1" => format!("# {}", self.render_inline_children(element, false)),
            "h2" => format!("## {}", self.render_inline_children(element, false)),
            "h3" => format!("### {}", self.render_inline_children(element, false)),
            "h4" => format!("#### {}", self.render_inline_children(element, false)),
            "h5" => format!("##### {}", self.render_inline_children(element, false)),
            "h6" => format!("###### {}", self.render_inline_children(element, false)),
            "p" | "pre" => self.render_inline_children(element, false),
            "hr" => "---".to_string(),
            "blockquote" => prefix_lines(&self.render_blocks(&element.children), "> "),
            "ul" => self.render_list(element, false),
            "ol" => self.render_list(element, true),
            "table" => self.render_table(element),
            LIST_GROUP_TAG => self.render_list_group(element),
            // Remaining block elements are plain containers.
            _ => self.render_blocks(&element.children),
        }
    }

    /// Adjacent lists render as one block with single newlines between
    /// them, so indented continuation lists line up under their parents.
    fn render_list_group(&self, element: &Element) -> String {
        let lists: Vec<String> = element
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|list| self.render_block(list))
            .filter(|rendered| !rendered.is_empty())
            .collect();
        lists.join("\n")
    }

    fn render_list(&self, element: &Element, ordered: bool) -> String {
        let (marker, continuation) = if ordered { ("1. ", "   ") } else { ("- ", "  ") };
        let indent = "    ".repeat(indent_level(element));

        let mut items = Vec::new();
        for item in
            element.children.iter().filter_map(Node::as_element).filter(|child| child.tag == "li")
        {
            let content = self.render_blocks(&item.children);
            let mut lines = content.lines();
            let mut rendered = String::new();
            match lines.next() {
                Some(first) => {
                    rendered.push_str(&indent);
                    rendered.push_str(marker);
                    rendered.push_str(first);
                }
                None => {
                    rendered.push_str(&indent);
                    rendered.push_str(marker.trim_end());
                }
            }
            for line in lines {
                rendered.push('\n');
                rendered.push_str(&indent);
                rendered.push_str(continuation);
                rendered.push_str(line);
            }
            items.push(rendered);
        }

        items.join("\n")
    }

    /// Renders a normalized table (`thead > tr`, `tbody > tr*`) as a
    /// pipe table. A rowless table renders nothing.
    fn render_table(&self, element: &Element) -> String {
        let mut sections = element.children.iter().filter_map(Node::as_element);
        let Some(thead) = sections.next() else {
            return String::new();
        };
        let Some(head_row) = thead.children.first().and_then(Node::as_element) else {
            return String::new();
        };

        let header = self.table_cells(head_row);
        let mut lines = vec![format_row(&header), format!("|{}", "---|".repeat(header.len()))];

        if let Some(tbody) = sections.next() {
            for row in tbody.children.iter().filter_map(Node::as_element) {
                lines.push(format_row(&self.table_cells(row)));
            }
        }

        lines.join("\n")
    }

    fn table_cells(&self, row: &Element) -> Vec<String> {
        row.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|child| child.tag == "td" || child.tag == "th")
            .map(|cell| self.render_inline_children(cell, true))
            .collect()
    }

    fn render_inline(&self, node: &Node, in_table: bool) -> String {
        let element = match node {
            Node::Text(content) => return entity::decode_references(content),
            Node::Element(element) => element,
        };

        if renders_nothing(&element.tag) {
            return String::new();
        }

        match element.tag.as_str() {
            "br" => {
                if in_table {
                    // Pipe tables cannot hold real line breaks.
                    "<br>".to_string()
                } else {
                    "\n".to_string()
                }
            }
            "em" | "i" => format!("_{}_", self.render_inline_children(element, in_table)),
            "strong" | "b" => format!("**{}**", self.render_inline_children(element, in_table)),
            "del" | "s" => format!("~{}~", self.render_inline_children(element, in_table)),
            "code" => format!("`{}`", self.render_inline_children(element, in_table)),
            "a" => self.render_anchor(element, in_table),
            "img" => raw_passthrough(element, None),
            "rt" | "rp" => String::new(),
            "abbr" | "bdi" | "bdo" | "caption" | "cite" | "col" | "colgroup" | "data"
            | "details" | "dfn" | "ins" | "kbd" | "mark" | "menu" | "q" | "ruby" | "samp"
            | "small" | "span" | "sub" | "summary" | "sup" | "time" | "u" | "var" | "wbr" => {
                self.render_inline_children(element, in_table)
            }
            // Inside table cells block structure flattens to inline text.
            _ if in_table && is_block_element(&element.tag) => {
                self.render_inline_children(element, in_table)
            }
            other => {
                warn!(tag = other, "skipping unsupported element");
                String::new()
            }
        }
    }

    fn render_inline_children(&self, element: &Element, in_table: bool) -> String {
        element.children.iter().map(|child| self.render_inline(child, in_table)).collect()
    }

    /// `[text](href)` when `href` is the only attribute; bare text when
    /// there are none; raw HTML passthrough otherwise (an anchor with a
    /// `name` has no Markdown equivalent).
    fn render_anchor(&self, element: &Element, in_table: bool) -> String {
        let text = self.render_inline_children(element, in_table);
        if element.attributes.is_empty() {
            return text;
        }
        if element.attributes.len() == 1 {
            if let Some(Some(href)) = element.attributes.get("href") {
                return format!("[{text}]({href})");
            }
        }
        raw_passthrough(element, Some(&text))
    }
}

fn is_block_node(element: &Element) -> bool {
    is_block_element(&element.tag) || element.tag == LIST_GROUP_TAG
}

/// Elements whose content never reaches the Markdown output.
fn renders_nothing(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "audio"
            | "button"
            | "canvas"
            | "datalist"
            | "dialog"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "head"
            | "header"
            | "hgroup"
            | "iframe"
            | "input"
            | "label"
            | "legend"
            | "map"
            | "meter"
            | "noscript"
            | "object"
            | "optgroup"
            | "option"
            | "output"
            | "picture"
            | "progress"
            | "script"
            | "search"
            | "select"
            | "slot"
            | "source"
            | "style"
            | "template"
            | "textarea"
            | "track"
            | "video"
    )
}

fn prefix_lines(content: &str, prefix: &str) -> String {
    content.lines().map(|line| format!("{prefix}{line}")).collect::<Vec<_>>().join("\n")
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Reconstructs the element as literal HTML, attributes alphabetical.
fn raw_passthrough(element: &Element, inner: Option<&str>) -> String {
    let mut attrs = String::new();
    for (name, value) in &element.attributes {
        attrs.push(' ');
        match value {
            Some(value) => {
                attrs.push_str(name);
                attrs.push_str("=\"");
                attrs.push_str(value);
                attrs.push('"');
            }
            None => attrs.push_str(name),
        }
    }

    match inner {
        Some(inner) => format!("<{tag}{attrs}>{inner}</{tag}>", tag = element.tag),
        None => format!("<{tag}{attrs}>", tag = element.tag),
    }
}

/// Indent level for Google-Docs-style exports, where a list's `class`
/// ends in `-<level>`.
fn indent_level(element: &Element) -> usize {
    element
        .attributes
        .get("class")
        .and_then(|value| value.as_deref())
        .and_then(|class| class.rsplit('-').next())
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttributeMap;

    fn element(tag: &str, children: Vec<Node>) -> Node {
        Node::Element(Element::with_children(tag, &AttributeMap::new(), children))
    }

    fn text(content: &str) -> Node {
        Node::Text(content.to_string())
    }

    fn render(node: &Node) -> String {
        Renderer::new(node).render()
    }

    #[test]
    fn heading_levels_map_to_hash_prefixes() {
        let body = element(
            "body",
            vec![element("h1", vec![text("one")]), element("h3", vec![text("three")])],
        );
        assert_eq!(render(&body), "# one\n\n### three\n");
    }

    #[test]
    fn blockquote_prefixes_every_line() {
        let body = element(
            "body",
            vec![element(
                "blockquote",
                vec![element("p", vec![text("a")]), element("p", vec![text("b")])],
            )],
        );
        assert_eq!(render(&body), "> a\n> \n> b\n");
    }

    #[test]
    fn list_continuation_lines_align_with_marker() {
        let body = element(
            "body",
            vec![element(
                LIST_GROUP_TAG,
                vec![element(
                    "ol",
                    vec![element("li", vec![text("hello"), element("br", vec![]), text("world")])],
                )],
            )],
        );
        assert_eq!(render(&body), "1. hello\n   world\n");
    }

    #[test]
    fn class_suffix_indents_google_doc_lists() {
        let mut attributes = AttributeMap::new();
        attributes.insert("class".to_string(), Some("lst-kix_abc-1".to_string()));
        let list = Node::Element(Element::with_children(
            "ul",
            &attributes,
            vec![element("li", vec![text("deep")])],
        ));
        let body = element("body", vec![element(LIST_GROUP_TAG, vec![list])]);
        assert_eq!(render(&body), "    - deep\n");
    }

    #[test]
    fn table_cells_flatten_blocks_and_escape_breaks() {
        let cell = element(
            "td",
            vec![element("p", vec![text("a"), element("br", vec![]), text("b")])],
        );
        let body = element(
            "body",
            vec![element(
                "table",
                vec![
                    element("thead", vec![element("tr", vec![element("th", vec![text("h")])])]),
                    element("tbody", vec![element("tr", vec![cell])]),
                ],
            )],
        );
        assert_eq!(render(&body), "| h |\n|---|\n| a<br>b |\n");
    }

    #[test]
    fn anchor_with_href_becomes_a_link() {
        let mut attributes = AttributeMap::new();
        attributes.insert("href".to_string(), Some("https://example.com".to_string()));
        let anchor =
            Node::Element(Element::with_children("a", &attributes, vec![text("hello")]));
        let body = element("body", vec![anchor]);
        assert_eq!(render(&body), "[hello](https://example.com)\n");
    }

    #[test]
    fn anchor_with_other_attributes_passes_through_raw() {
        let mut attributes = AttributeMap::new();
        attributes.insert("name".to_string(), Some("target".to_string()));
        let anchor =
            Node::Element(Element::with_children("a", &attributes, vec![text("hello")]));
        let body = element("body", vec![anchor]);
        assert_eq!(render(&body), "<a name=\"target\">hello</a>\n");
    }

    #[test]
    fn non_content_elements_render_nothing() {
        let body = element(
            "body",
            vec![element("script", vec![text("alert(1)")]), element("p", vec![text("kept")])],
        );
        assert_eq!(render(&body), "kept\n");
    }

    #[test]
    fn empty_body_renders_empty_string() {
        let body = element("body", vec![]);
        assert_eq!(render(&body), "");
    }

    #[test]
    fn html_root_renders_only_its_body() {
        let html = element(
            "html",
            vec![
                element("head", vec![element("title", vec![text("ignored")])]),
                element("body", vec![text("shown")]),
            ],
        );
        assert_eq!(render(&html), "shown\n");
    }
}
