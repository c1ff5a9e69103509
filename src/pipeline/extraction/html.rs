//! HTML to plain text for fetched pages and converted DOCX bodies.

use scraper::node::Element;
use scraper::{Html, Node};

use super::sanitize::linearize_text;

/// Elements whose whole subtree is never content.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside", "form"];

/// Elements that start a new line when their direct text begins.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6", "table", "tr",
];

fn is_excluded(el: &Element) -> bool {
    EXCLUDED_TAGS.contains(&el.name())
        || el.attr("role") == Some("navigation")
        || el.attr("aria-hidden") == Some("true")
        || el.attr("hidden").is_some()
}

/// Convert an HTML document or fragment to plain text.
///
/// Navigation, chrome and hidden subtrees are dropped. Each text node is
/// whitespace-collapsed; a newline separates text whose parent is a new
/// block element, a single space separates everything else. The result is
/// then linearized (one sentence per line) and trimmed.
pub fn html_to_plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    let mut last_block = None;

    for node in document.tree.root().descendants() {
        let Node::Text(raw) = node.value() else {
            continue;
        };
        let Some(parent) = node.parent() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(is_excluded);
        if hidden {
            continue;
        }

        let content = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            continue;
        }

        let parent_is_block = parent
            .value()
            .as_element()
            .is_some_and(|el| BLOCK_TAGS.contains(&el.name()));

        if parent_is_block && last_block != Some(parent.id()) {
            if !text.is_empty() {
                text.push('\n');
            }
            last_block = Some(parent.id());
        } else if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&content);
    }

    linearize_text(&text).trim().to_string()
}
