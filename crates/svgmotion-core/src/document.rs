//! Parsed SVG document: the shared artifact between extraction and export.
//!
//! Extraction assigns ids in place here, and the compiler later re-locates
//! the same elements by those ids, so both sides must operate on the same
//! document value (or one serialized from it) rather than reparsing the raw
//! upload.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::ParseError;

/// Id of the style container the compiler owns inside exported documents.
/// Reused on recompilation instead of inserting a second stylesheet.
pub const STYLE_ELEMENT_ID: &str = "svgmotion-styles";

#[derive(Clone, Debug)]
pub struct SvgDocument {
    root: Element,
}

impl SvgDocument {
    pub fn parse(markup: &str) -> Result<Self, ParseError> {
        let root = Element::parse(markup.as_bytes())?;
        Ok(SvgDocument { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize back to markup, without an XML declaration.
    pub fn to_markup(&self) -> Result<String, ParseError> {
        let mut out: Vec<u8> = Vec::new();
        let config = EmitterConfig::new()
            .write_document_declaration(false)
            .perform_indent(false);
        self.root
            .write_with_config(&mut out, config)
            .map_err(|e| ParseError::Serialize(e.to_string()))?;
        String::from_utf8(out).map_err(|e| ParseError::Serialize(e.to_string()))
    }

    /// Visit every element below the root, depth-first in document order.
    pub fn for_each_descendant_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        walk_mut(&mut self.root, f);
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        find_by_id(&self.root, id)
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_by_id_mut(&mut self.root, id)
    }

    /// Find or create a `<g id=...>` for a group layer. Created groups are
    /// appended to the root, in the root's namespace.
    pub fn ensure_group_element(&mut self, id: &str) {
        if self.element_by_id(id).is_some() {
            return;
        }
        let mut group = Element::new("g");
        group.namespace = self.root.namespace.clone();
        group.namespaces = self.root.namespaces.clone();
        group.attributes.insert("id".to_string(), id.to_string());
        self.root.children.push(XMLNode::Element(group));
    }

    /// Move the element with `child_id` (wherever it sits) into the group
    /// element with `group_id`. No-op when either is missing or the child is
    /// already a direct member of the group.
    pub fn adopt_element(&mut self, group_id: &str, child_id: &str) {
        let already_member = self
            .element_by_id(group_id)
            .map(|group| {
                group.children.iter().any(|node| {
                    matches!(node, XMLNode::Element(e) if element_id(e) == Some(child_id))
                })
            })
            .unwrap_or(false);
        if already_member {
            return;
        }
        let Some(node) = detach_by_id(&mut self.root, child_id) else {
            return;
        };
        match find_by_id_mut(&mut self.root, group_id) {
            Some(group) => group.children.push(node),
            // Group vanished between the checks; put the child back at the root
            // rather than dropping drawable content.
            None => self.root.children.push(node),
        }
    }

    /// Set the compiled stylesheet, inserting or reusing the single style
    /// container as the first child of the root.
    pub fn set_style_content(&mut self, css: &str) {
        let existing = self.root.children.iter().position(|node| {
            matches!(node, XMLNode::Element(e) if e.name == "style" && element_id(e) == Some(STYLE_ELEMENT_ID))
        });
        let mut style = match existing.map(|i| self.root.children.remove(i)) {
            Some(XMLNode::Element(e)) => e,
            _ => {
                let mut e = Element::new("style");
                e.namespace = self.root.namespace.clone();
                e.namespaces = self.root.namespaces.clone();
                e.attributes
                    .insert("id".to_string(), STYLE_ELEMENT_ID.to_string());
                e
            }
        };
        style.children.clear();
        style.children.push(XMLNode::Text(css.to_string()));
        self.root.children.insert(0, XMLNode::Element(style));
    }
}

#[inline]
fn element_id(el: &Element) -> Option<&str> {
    el.attributes.get("id").map(String::as_str)
}

fn walk_mut(el: &mut Element, f: &mut dyn FnMut(&mut Element)) {
    for node in el.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            f(child);
            walk_mut(child, f);
        }
    }
}

fn find_by_id<'a>(el: &'a Element, id: &str) -> Option<&'a Element> {
    if element_id(el) == Some(id) {
        return Some(el);
    }
    for node in &el.children {
        if let XMLNode::Element(child) = node {
            if let Some(found) = find_by_id(child, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_by_id_mut<'a>(el: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if element_id(el) == Some(id) {
        return Some(el);
    }
    for node in el.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            if let Some(found) = find_by_id_mut(child, id) {
                return Some(found);
            }
        }
    }
    None
}

fn detach_by_id(el: &mut Element, id: &str) -> Option<XMLNode> {
    let direct = el.children.iter().position(|node| {
        matches!(node, XMLNode::Element(e) if element_id(e) == Some(id))
    });
    if let Some(i) = direct {
        return Some(el.children.remove(i));
    }
    for node in el.children.iter_mut() {
        if let XMLNode::Element(child) = node {
            if let Some(found) = detach_by_id(child, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Append a class token if not already present. Idempotent.
pub fn add_class_token(el: &mut Element, token: &str) {
    let classes = el.attributes.get("class").cloned().unwrap_or_default();
    if classes.split_whitespace().any(|t| t == token) {
        return;
    }
    let value = if classes.trim().is_empty() {
        token.to_string()
    } else {
        format!("{} {token}", classes.trim_end())
    };
    el.attributes.insert("class".to_string(), value);
}

/// Remove a class token if present, dropping the attribute when it empties.
pub fn remove_class_token(el: &mut Element, token: &str) {
    let Some(classes) = el.attributes.get("class") else {
        return;
    };
    if !classes.split_whitespace().any(|t| t == token) {
        return;
    }
    let remaining = classes
        .split_whitespace()
        .filter(|t| *t != token)
        .collect::<Vec<_>>()
        .join(" ");
    if remaining.is_empty() {
        el.attributes.remove("class");
    } else {
        el.attributes.insert("class".to_string(), remaining);
    }
}
