//! Headless element tree for the DOM adapters.
//!
//! A small, single-threaded stand-in for the browser DOM: elements with a
//! class list, inline custom properties, text and children. The adapters in
//! [`crate::adapters`] mutate it the way they would mutate a page, and the
//! result can be serialized to HTML.

use crate::style::{CssValue, StyleMap};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

struct Node {
    tag: String,
    classes: Vec<String>,
    style: StyleMap,
    text: String,
    children: Vec<Element>,
    parent: Weak<RefCell<Node>>,
    reflows: u32,
}

/// Shared handle to an element. Clones refer to the same node.
#[derive(Clone)]
pub struct Element {
    node: Rc<RefCell<Node>>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                tag: tag.to_string(),
                classes: Vec::new(),
                style: StyleMap::new(),
                text: String::new(),
                children: Vec::new(),
                parent: Weak::new(),
                reflows: 0,
            })),
        }
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// Element with initial text content.
    pub fn with_text(tag: &str, text: &str) -> Self {
        let element = Self::new(tag);
        element.set_text_content(text);
        element
    }

    pub fn tag(&self) -> String {
        self.node.borrow().tag.clone()
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    // Class list

    pub fn add_class(&self, class: &str) {
        if class.is_empty() {
            return;
        }
        let mut node = self.node.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.node.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.node.borrow().classes.clone()
    }

    /// Replace the whole class list with the whitespace-separated `class_name`.
    pub fn set_class_name(&self, class_name: &str) {
        let mut node = self.node.borrow_mut();
        node.classes.clear();
        for class in class_name.split_whitespace() {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn class_name(&self) -> String {
        self.node.borrow().classes.join(" ")
    }

    // Inline style

    pub fn set_style_property(&self, property: &str, value: impl Into<CssValue>) {
        self.node.borrow_mut().style.set(property, value);
    }

    pub fn style_property(&self, property: &str) -> Option<CssValue> {
        self.node.borrow().style.get(property).cloned()
    }

    pub fn style(&self) -> StyleMap {
        self.node.borrow().style.clone()
    }

    // Text and children

    /// Own text followed by the text of every descendant.
    pub fn text_content(&self) -> String {
        let node = self.node.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text_content());
        }
        text
    }

    /// Replace all children with plain text.
    pub fn set_text_content(&self, text: &str) {
        self.clear_children();
        self.node.borrow_mut().text = text.to_string();
    }

    /// Drop text and children, like `innerHTML = ''`.
    pub fn clear_children(&self) {
        let children = {
            let mut node = self.node.borrow_mut();
            node.text.clear();
            std::mem::take(&mut node.children)
        };
        for child in children {
            child.node.borrow_mut().parent = Weak::new();
        }
    }

    /// Append `child`, detaching it from any previous parent.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        self.node.borrow_mut().children.push(child.clone());
    }

    /// Detach from the parent. No-op for detached elements.
    pub fn remove(&self) {
        let parent = self.node.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|sibling| !Rc::ptr_eq(&sibling.node, &self.node));
            self.node.borrow_mut().parent = Weak::new();
        }
    }

    pub fn parent(&self) -> Option<Element> {
        self.node.borrow().parent.upgrade().map(|node| Element { node })
    }

    pub fn is_connected_to(&self, ancestor: &Element) -> bool {
        let mut current = self.parent();
        while let Some(element) = current {
            if element.ptr_eq(ancestor) {
                return true;
            }
            current = element.parent();
        }
        false
    }

    pub fn children(&self) -> Vec<Element> {
        self.node.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.node.borrow().children.len()
    }

    pub fn last_child(&self) -> Option<Element> {
        self.node.borrow().children.last().cloned()
    }

    /// First child carrying `class` that is not the last child, like
    /// `querySelector('.class:not(:last-child)')` over direct children.
    pub fn first_child_with_class_not_last(&self, class: &str) -> Option<Element> {
        let node = self.node.borrow();
        let count = node.children.len();
        node.children
            .iter()
            .take(count.saturating_sub(1))
            .find(|child| child.has_class(class))
            .cloned()
    }

    // Layout

    /// Record a forced layout read (`offsetWidth`), which restarts CSS
    /// animations in a browser.
    pub fn force_reflow(&self) {
        self.node.borrow_mut().reflows += 1;
    }

    pub fn reflow_count(&self) -> u32 {
        self.node.borrow().reflows
    }

    // Serialization

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        let node = self.node.borrow();
        let _ = write!(out, "<{}", node.tag);
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&node.classes.join(" ")));
        }
        if !node.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape_html(&node.style.to_inline()));
        }
        out.push('>');
        out.push_str(&escape_html(&node.text));
        for child in &node.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Restart a CSS animation by removing and re-adding its class.
///
/// An empty class name does nothing.
pub fn replay_animation(element: &Element, class_name: &str) {
    if class_name.is_empty() {
        return;
    }
    element.remove_class(class_name);
    element.force_reflow();
    element.add_class(class_name);
}
