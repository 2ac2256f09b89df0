// SPDX-License-Identifier: MPL-2.0
//! In-memory model of the hosted page.
//!
//! The page is parsed once from HTML into an arena of [`Element`]s. Everything
//! the reveal and lightbox behaviors touch (class markers, attributes, inline
//! styles, text, layout rectangles) lives here, so the document stays the
//! single source of truth that the view renders from.

pub mod layout;
mod parse;
pub mod scroll_lock;

pub use layout::{layout, LayoutMetrics, Rect};
pub use parse::{load_page, parse_html};
pub use scroll_lock::{ScrollLease, ScrollLock};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Stable handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Returns the arena index of this element.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single element node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Rect,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Own text content (text nodes directly under this element).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Arena-backed element tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    title: Option<String>,
    base_dir: Option<PathBuf>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: ElementId(0),
            title: None,
            base_dir: None,
        }
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn set_base_dir(&mut self, dir: Option<PathBuf>) {
        self.base_dir = dir;
    }

    /// Number of elements in the arena, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body_children().is_empty()
    }

    #[must_use]
    pub fn body_children(&self) -> &[ElementId] {
        self.get(self.body).children()
    }

    /// Returns the element behind `id`.
    ///
    /// Ids are only minted by this document, so lookups cannot miss.
    #[must_use]
    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Creates a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag));
        id
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old_parent) = self.get(child).parent {
            self.get_mut(old_parent).children.retain(|c| *c != child);
        }
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// All descendants of `root` in document (pre-)order, excluding `root`.
    #[must_use]
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.get(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.get(id).children.iter().rev().copied());
        }
        out
    }

    /// Elements under body carrying `class`, in document order.
    #[must_use]
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|id| self.get(*id).has_class(class))
            .collect()
    }

    /// First descendant of `root` with the given tag.
    #[must_use]
    pub fn first_by_tag(&self, root: ElementId, tag: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.get(*id).tag == tag)
    }

    /// Walks `levels` parents up from `id`.
    #[must_use]
    pub fn ancestor(&self, id: ElementId, levels: usize) -> Option<ElementId> {
        let mut current = id;
        for _ in 0..levels {
            current = self.get(current).parent?;
        }
        Some(current)
    }

    /// Whether any ancestor of `id` (not `id` itself) carries `class`.
    #[must_use]
    pub fn has_ancestor_with_class(&self, id: ElementId, class: &str) -> bool {
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            if self.get(parent).has_class(class) {
                return true;
            }
            current = self.get(parent).parent;
        }
        false
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).has_class(class)
    }

    /// Adds `class`; returns `true` if it was not present before.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        let element = self.get_mut(id);
        if element.has_class(class) {
            return false;
        }
        element.classes.push(class.to_string());
        true
    }

    /// Removes `class`; returns `true` if it was present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        let element = self.get_mut(id);
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        element.classes.len() != before
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.remove_class(id, class) {
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).attribute(name)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            let value = value.into();
            self.get_mut(id).classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        self.get_mut(id).attributes.insert(name, value.into());
    }

    /// Reads a `data-*` attribute, e.g. `data(id, "caption")` for `data-caption`.
    #[must_use]
    pub fn data(&self, id: ElementId, key: &str) -> Option<&str> {
        self.get(id).attribute(&format!("data-{key}"))
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).text()
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.get_mut(id).text = text.into();
    }

    pub(crate) fn push_text(&mut self, id: ElementId, text: &str) {
        let element = self.get_mut(id);
        if !element.text.is_empty() {
            element.text.push(' ');
        }
        element.text.push_str(text);
    }

    #[must_use]
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id).style(property)
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        self.get_mut(id)
            .styles
            .insert(property.trim().to_ascii_lowercase(), value.into());
    }

    pub fn remove_style(&mut self, id: ElementId, property: &str) {
        self.get_mut(id).styles.remove(property);
    }

    #[must_use]
    pub fn rect(&self, id: ElementId) -> Rect {
        self.get(id).rect
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        self.get_mut(id).rect = rect;
    }

    /// Top edge of `id` relative to the viewport top, given the page scroll.
    #[must_use]
    pub fn bounding_top(&self, id: ElementId, scroll_top: f32) -> f32 {
        self.get(id).rect.top - scroll_top
    }

    /// Resolves an image `src` against the page directory.
    ///
    /// Absolute paths and URLs with a scheme are returned unchanged.
    #[must_use]
    pub fn resolve_source(&self, src: &str) -> String {
        let src = src.trim();
        if src.contains("://") || src.starts_with("data:") || Path::new(src).is_absolute() {
            return src.to_string();
        }
        match &self.base_dir {
            Some(dir) => dir.join(src).to_string_lossy().into_owned(),
            None => src.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let section = doc.create_element("section");
        doc.add_class(section, "reveal");
        let figure = doc.create_element("div");
        let img = doc.create_element("img");
        doc.append_child(doc.body(), section);
        doc.append_child(section, figure);
        doc.append_child(figure, img);
        (doc, section, figure, img)
    }

    #[test]
    fn descendants_are_in_document_order() {
        let (mut doc, section, figure, img) = sample();
        let trailing = doc.create_element("p");
        doc.append_child(doc.body(), trailing);

        assert_eq!(
            doc.descendants(doc.body()),
            vec![section, figure, img, trailing]
        );
    }

    #[test]
    fn class_operations_report_changes() {
        let (mut doc, section, ..) = sample();

        assert!(!doc.add_class(section, "reveal"));
        assert!(doc.add_class(section, "active"));
        assert!(doc.has_class(section, "active"));
        assert!(!doc.toggle_class(section, "active"));
        assert!(doc.toggle_class(section, "active"));
        assert!(doc.remove_class(section, "active"));
        assert!(!doc.remove_class(section, "active"));
    }

    #[test]
    fn ancestor_walks_up_and_stops_at_root() {
        let (doc, section, figure, img) = sample();

        assert_eq!(doc.ancestor(img, 0), Some(img));
        assert_eq!(doc.ancestor(img, 1), Some(figure));
        assert_eq!(doc.ancestor(img, 2), Some(section));
        assert_eq!(doc.ancestor(img, 3), Some(doc.body()));
        assert_eq!(doc.ancestor(img, 4), None);
        assert!(doc.has_ancestor_with_class(img, "reveal"));
        assert!(!doc.has_ancestor_with_class(section, "reveal"));
    }

    #[test]
    fn append_child_reparents() {
        let (mut doc, section, figure, _) = sample();
        doc.append_child(doc.body(), figure);

        assert!(doc.get(section).children().is_empty());
        assert_eq!(doc.get(figure).parent(), Some(doc.body()));
    }

    #[test]
    fn data_reads_prefixed_attribute() {
        let (mut doc, _, _, img) = sample();
        doc.set_attribute(img, "data-caption", "Summer");

        assert_eq!(doc.data(img, "caption"), Some("Summer"));
        assert_eq!(doc.data(img, "missing"), None);
    }

    #[test]
    fn class_attribute_replaces_class_list() {
        let (mut doc, section, ..) = sample();
        doc.set_attribute(section, "class", "one  two");

        assert_eq!(doc.get(section).classes(), ["one", "two"]);
    }

    #[test]
    fn bounding_top_subtracts_scroll() {
        let (mut doc, section, ..) = sample();
        doc.set_rect(
            section,
            Rect {
                top: 500.0,
                height: 40.0,
                ..Rect::default()
            },
        );

        assert_eq!(doc.bounding_top(section, 120.0), 380.0);
    }

    #[test]
    fn resolve_source_joins_relative_paths() {
        let mut doc = Document::new();
        doc.set_base_dir(Some(PathBuf::from("/srv/page")));

        assert_eq!(
            doc.resolve_source("img/a.jpg"),
            Path::new("/srv/page").join("img/a.jpg").to_string_lossy()
        );
        assert_eq!(
            doc.resolve_source("https://example.org/a.jpg"),
            "https://example.org/a.jpg"
        );
    }
}
