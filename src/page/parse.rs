// SPDX-License-Identifier: MPL-2.0
//! HTML loading.
//!
//! Parsing is delegated to `scraper` (html5ever underneath), which is lenient
//! with malformed markup. Only the `<body>` subtree is kept, plus the page
//! title.

use super::{Document, ElementId};
use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Node, Selector};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Elements whose content never renders.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Reads and parses the page at `path`, resolving images against its directory.
pub fn load_page(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::InvalidData => Error::Page(format!("{} is not UTF-8", path.display())),
        _ => Error::from(err),
    })?;
    let document = parse_html(&source, path.parent());
    debug!(
        path = %path.display(),
        elements = document.len(),
        "page parsed"
    );
    Ok(document)
}

/// Parses an HTML source into a [`Document`].
#[must_use]
pub fn parse_html(source: &str, base_dir: Option<&Path>) -> Document {
    let html = Html::parse_document(source);
    let mut document = Document::new();
    document.set_base_dir(base_dir.map(Path::to_path_buf));

    if let Some(title) = extract_title(&html) {
        document.set_title(title);
    }

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = html.select(&selector).next() {
            let root = document.body();
            for (name, value) in body.value().attrs() {
                apply_attribute(&mut document, root, name, value);
            }
            build(&mut document, root, body);
        }
    }

    document
}

fn build(document: &mut Document, parent: ElementId, source: ElementRef<'_>) {
    for child in source.children() {
        match child.value() {
            Node::Element(element) => {
                if SKIPPED_TAGS.contains(&element.name()) {
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let id = document.create_element(element.name());
                for (name, value) in element.attrs() {
                    apply_attribute(document, id, name, value);
                }
                document.append_child(parent, id);
                build(document, id, child_ref);
            }
            Node::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if !collapsed.is_empty() {
                    document.push_text(parent, &collapsed);
                }
            }
            _ => {}
        }
    }
}

fn apply_attribute(document: &mut Document, id: ElementId, name: &str, value: &str) {
    if name.eq_ignore_ascii_case("style") {
        for (property, value) in parse_inline_style(value) {
            document.set_style(id, property, value);
        }
    } else {
        document.set_attribute(id, name, value);
    }
}

/// Splits `a: b; c: d` into declarations, skipping malformed ones.
fn parse_inline_style(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        let (property, value) = (property.trim(), value.trim());
        (!property.is_empty() && !value.is_empty()).then_some((property, value))
    })
}

fn extract_title(html: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = html.select(&selector).next()?;
    let text = collapse_whitespace(&title.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
