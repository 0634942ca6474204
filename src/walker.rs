//! Tree walker
//!
//! Drives a complete `pull` (tree → data) or `push` (data → tree) pass in
//! one synchronous call. For each direct child of the visited node: the
//! effective tag is the `field-type` attribute, else the structural tag;
//! a registry hit (or the generic default, for field-bearing nodes) plus a
//! `field` attribute means the child binds. Descent under a bound node is
//! gated on `recursion="true"`; fieldless nodes always descend.
//!
//! No error escapes a pass. Unparseable paths, unknown override names,
//! and unrecognized tags each degrade to skipping that node's binding
//! while the rest of the tree keeps synchronizing.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::context::Context;
use crate::element::{attr, Element};
use crate::handlers::{default_handler, handler_for, Handler};
use crate::path;

/// Copy UI values into a fresh data value.
pub fn pull(tree: &mut Element, ctx: &Context) -> Value {
    pull_into(tree, Value::Object(Map::new()), ctx)
}

/// Copy UI values into an existing data value and return it.
pub fn pull_into(tree: &mut Element, mut data: Value, ctx: &Context) -> Value {
    debug!(tag = %tree.tag, "pull pass");
    pull_children(tree, &mut data, ctx);
    data
}

/// Copy data values into the UI tree.
pub fn push(tree: &mut Element, data: &Value, ctx: &Context) {
    debug!(tag = %tree.tag, "push pass");
    push_children(tree, data, ctx);
}

/// Handler selection: a registry hit wins; a field-bearing node with an
/// unrecognized tag falls back to the generic default.
fn select_handler(tag: &str, has_field: bool) -> Option<&'static dyn Handler> {
    handler_for(tag).or_else(|| has_field.then(default_handler))
}

fn effective_tag(el: &Element) -> String {
    el.attr(attr::FIELD_TYPE).unwrap_or(&el.tag).to_string()
}

fn pull_children(parent: &mut Element, data: &mut Value, ctx: &Context) {
    for child in &mut parent.children {
        let field = child.field().map(str::to_string);
        let tag = effective_tag(child);

        if let (Some(handler), Some(field)) = (select_handler(&tag, field.is_some()), &field) {
            let value = handler.get(child, ctx);
            trace!(field = %field, tag = %tag, "pulled");
            path::set(data, field, value);
            if !child.recursion_enabled() {
                continue;
            }
        }
        if !child.children.is_empty() {
            pull_children(child, data, ctx);
        }
    }
}

fn push_children(parent: &mut Element, data: &Value, ctx: &Context) {
    for child in &mut parent.children {
        let field = child.field().map(str::to_string);
        let tag = effective_tag(child);

        if let (Some(handler), Some(field)) = (select_handler(&tag, field.is_some()), &field) {
            // Absent paths bind as null; the handler's default policy
            // (or the node's `default` attribute) takes it from there
            let value = path::get(data, field).unwrap_or(Value::Null);
            trace!(field = %field, tag = %tag, "pushed");
            handler.set(child, value, ctx);
            if !child.recursion_enabled() {
                continue;
            }
        }
        if !child.children.is_empty() {
            push_children(child, data, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(field: &str, value: &str) -> Element {
        Element::new("input").with_field(field).with_value(value)
    }

    #[test]
    fn pull_walks_direct_children() {
        let ctx = Context::new();
        let mut tree = Element::new("form")
            .with_child(input("person.name", "Alice"))
            .with_child(input("person.age", "30"));
        let data = pull(&mut tree, &ctx);
        assert_eq!(data, json!({"person": {"name": "Alice", "age": "30"}}));
    }

    #[test]
    fn pull_into_merges_with_existing_data() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(input("person.name", "Alice"));
        let data = pull_into(&mut tree, json!({"kept": true}), &ctx);
        assert_eq!(data, json!({"kept": true, "person": {"name": "Alice"}}));
    }

    #[test]
    fn fieldless_nodes_always_descend() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("fieldset")
                .with_child(Element::new("div").with_child(input("deep", "v"))),
        );
        assert_eq!(pull(&mut tree, &ctx), json!({"deep": "v"}));
    }

    #[test]
    fn bound_node_without_recursion_is_a_leaf() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("div")
                .with_field("outer")
                .with_text("shell")
                .with_child(input("inner", "hidden")),
        );
        let data = pull(&mut tree, &ctx);
        assert_eq!(data.get("inner"), None);
    }

    #[test]
    fn recursion_true_descends_under_bound_node() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("div")
                .with_field("outer")
                .with_attr(attr::RECURSION, "true")
                .with_text("shell")
                .with_child(input("inner", "seen")),
        );
        let data = pull(&mut tree, &ctx);
        assert_eq!(data.get("inner"), Some(&json!("seen")));
    }

    #[test]
    fn recursion_false_is_not_true() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("div")
                .with_field("outer")
                .with_attr(attr::RECURSION, "false")
                .with_child(input("inner", "hidden")),
        );
        assert_eq!(pull(&mut tree, &ctx).get("inner"), None);
    }

    #[test]
    fn field_type_overrides_structural_tag() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("div")
                .with_attr(attr::FIELD_TYPE, "checkbox")
                .with_field("tags")
                .with_child(Element::new("input").with_value("a").with_checked(true)),
        );
        assert_eq!(pull(&mut tree, &ctx), json!({"tags": ["a"]}));
    }

    #[test]
    fn unknown_tag_with_field_uses_default_handler() {
        let ctx = Context::new();
        let mut tree = Element::new("form")
            .with_child(Element::new("span").with_field("label").with_text("Hello"));
        assert_eq!(pull(&mut tree, &ctx), json!({"label": "Hello"}));
    }

    #[test]
    fn unknown_tag_without_field_skips_but_descends() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(
            Element::new("section")
                .with_attr(attr::FIELD_TYPE, "custom-widget")
                .with_child(input("x", "1")),
        );
        assert_eq!(pull(&mut tree, &ctx), json!({"x": "1"}));
    }

    #[test]
    fn handler_only_binds_with_a_field() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(Element::new("input").with_value("loose"));
        assert_eq!(pull(&mut tree, &ctx), json!({}));
    }

    #[test]
    fn push_writes_ui_values() {
        let ctx = Context::new();
        let mut tree = Element::new("form")
            .with_child(input("person.name", ""))
            .with_child(input("person.age", ""));
        push(&mut tree, &json!({"person": {"name": "Bob", "age": 41}}), &ctx);
        assert_eq!(tree.children[0].value, "Bob");
        assert_eq!(tree.children[1].value, "41");
    }

    #[test]
    fn push_missing_path_applies_default_attribute() {
        let ctx = Context::new();
        let mut tree = Element::new("form")
            .with_child(input("absent.path", "stale").with_attr(attr::DEFAULT, "N/A"));
        push(&mut tree, &json!({}), &ctx);
        assert_eq!(tree.children[0].value, "N/A");
    }

    #[test]
    fn push_missing_path_without_default_clears() {
        let ctx = Context::new();
        let mut tree = Element::new("form").with_child(input("absent.path", "stale"));
        push(&mut tree, &json!({}), &ctx);
        assert_eq!(tree.children[0].value, "");
    }

    #[test]
    fn malformed_attributes_never_abort_the_pass() {
        let ctx = Context::new();
        let mut tree = Element::new("form")
            .with_child(input("a..broken", "x"))
            .with_child(input("", "y"))
            .with_child(input("ok", "z").with_attr(attr::GETTER, "unknownFn"));
        let data = pull(&mut tree, &ctx);
        // Broken siblings are skipped, the unknown getter degrades to the
        // default read, and the pass completes
        assert_eq!(data, json!({"ok": "z"}));
    }
}
