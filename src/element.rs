//! UI element tree model
//!
//! The engine does not render anything: an external UI layer materializes
//! the tree and hands it over. `Element` is the neutral shape both sides
//! agree on — a tag, an attribute map, the native slots handlers read and
//! write (`value`, `checked`, `selected`, `text`), and children.
//!
//! Serde derives let a UI layer (or a test) materialize a whole tree from
//! a JSON fixture.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute names recognized by the binding engine.
pub mod attr {
    /// Dotted path into the data value; required for a node to bind.
    pub const FIELD: &str = "field";
    /// Overrides the structural tag used to select a handler.
    pub const FIELD_TYPE: &str = "field-type";
    /// Per-node read override: function name or format expression.
    pub const GETTER: &str = "getter";
    /// Per-node write override: function name or format expression.
    pub const SETTER: &str = "setter";
    /// Literal `"true"` visits children of a field-bearing node.
    pub const RECURSION: &str = "recursion";
    /// Fallback applied on write when the resolved value is null.
    pub const DEFAULT: &str = "default";
}

/// One node of the caller-supplied UI tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    /// Structural kind, lowercase (`"input"`, `"select"`, `"div"`, ...).
    pub tag: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    /// Native scalar slot (inputs, options).
    #[serde(default)]
    pub value: String,
    /// Choice-member state (radio/checkbox inputs).
    #[serde(default)]
    pub checked: bool,
    /// Option state (select options).
    #[serde(default)]
    pub selected: bool,
    /// Own text content; [`Element::deep_text`] gathers descendants too.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an arbitrary attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the `field` attribute
    pub fn with_field(self, path: impl Into<String>) -> Self {
        self.with_attr(attr::FIELD, path)
    }

    /// Set the native value slot
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set own text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the checked flag
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the selected flag
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The `field` attribute, if any
    pub fn field(&self) -> Option<&str> {
        self.attr(attr::FIELD)
    }

    /// Whether children of a field-bearing node should be visited.
    /// Only the literal `"true"` enables descent.
    pub fn recursion_enabled(&self) -> bool {
        self.attr(attr::RECURSION) == Some("true")
    }

    /// Own text plus all descendant text, in document order
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Visit every descendant (excluding self), document order
    pub fn for_each_descendant<F: FnMut(&Element)>(&self, f: &mut F) {
        for child in &self.children {
            f(child);
            child.for_each_descendant(f);
        }
    }

    /// Mutably visit every descendant (excluding self), document order
    pub fn for_each_descendant_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        for child in &mut self.children {
            f(child);
            child.for_each_descendant_mut(f);
        }
    }
}
