//! Selector-based text extraction over parsed HTML documents.
//!
//! Mirrors what a browser's `innerText` would give: block elements start new
//! lines, `script`/`style` are skipped, and every result goes through
//! [`clean_text`]. Selectors that fail to parse are skipped, never an error,
//! so adapters can list optimistic selectors first.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::clean::clean_text;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg"];

fn parse_selector(sel: &str) -> Option<Selector> {
    match Selector::parse(sel) {
        Ok(s) => Some(s),
        Err(_) => {
            tracing::trace!(selector = sel, "skipping unsupported selector");
            None
        }
    }
}

/// Visible text of an element with line breaks at block boundaries.
pub fn element_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(el, &mut raw);

    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    clean_text(&lines.join("\n"))
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(&WS_RE.replace_all(text, " "));
            }
            Node::Element(element) => {
                let name = element.name();
                if SKIP_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Text of the first element matched by the first selector that yields non-empty text.
pub fn pick_text(doc: &Html, selectors: &[&str]) -> String {
    for sel in selectors {
        let Some(selector) = parse_selector(sel) else {
            continue;
        };
        if let Some(el) = doc.select(&selector).next() {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Attribute value of the first element matched by the first selector that yields a non-empty value.
pub fn pick_attr(doc: &Html, selectors: &[&str], attr: &str) -> String {
    for sel in selectors {
        let Some(selector) = parse_selector(sel) else {
            continue;
        };
        if let Some(el) = doc.select(&selector).next() {
            let value = clean_text(el.value().attr(attr).unwrap_or_default());
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// Non-empty texts of every element matched by any of the selectors, in order.
pub fn pick_all_text(doc: &Html, selectors: &[&str]) -> Vec<String> {
    let mut items = Vec::new();
    for sel in selectors {
        let Some(selector) = parse_selector(sel) else {
            continue;
        };
        for el in doc.select(&selector) {
            let text = element_text(el);
            if !text.is_empty() {
                items.push(text);
            }
        }
    }
    items
}

/// Text of the first element matched by `selector` whose text matches `re`.
///
/// Useful when the only stable anchor is the wording, not the markup.
pub fn pick_text_matching(doc: &Html, selector: &str, re: &Regex) -> String {
    let Some(selector) = parse_selector(selector) else {
        return String::new();
    };
    doc.select(&selector)
        .map(element_text)
        .find(|t| !t.is_empty() && re.is_match(t))
        .unwrap_or_default()
}

/// `content` of `<meta property=...>` or `<meta name=...>`.
pub fn meta_content(doc: &Html, property_or_name: &str) -> String {
    let by_property = format!(r#"meta[property="{property_or_name}"]"#);
    let by_name = format!(r#"meta[name="{property_or_name}"]"#);
    pick_attr(doc, &[by_property.as_str(), by_name.as_str()], "content")
}

/// Visible text of the whole page body (or the document root without a body).
pub fn page_text(doc: &Html) -> String {
    let body = parse_selector("body").and_then(|sel| doc.select(&sel).next());
    element_text(body.unwrap_or_else(|| doc.root_element()))
}
