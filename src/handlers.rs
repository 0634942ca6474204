//! Type handler registry
//!
//! Maps a node's effective tag to the pair of operations that read its UI
//! value (`get`) and apply a data value to it (`set`). The tag set is
//! closed: `input`/`textarea`, `radio`, `checkbox`, `select`, plus the
//! generic default used for any field-bearing node with an unrecognized
//! tag.
//!
//! Every handler consults the expression resolver first. A resolved setter
//! function performs the write itself and suppresses the default logic; a
//! format expression transforms the value feeding the default logic; a
//! resolved value of null falls back to the node's `default` attribute
//! before being applied.

use serde_json::Value;

use crate::context::{value_text, Context};
use crate::element::{attr, Element};
use crate::expr::{self, Override};

/// Stateless get/set pair for one tag variant.
pub trait Handler {
    /// Extract the node's current UI value.
    fn get(&self, el: &mut Element, ctx: &Context) -> Value;
    /// Apply a data value to the node's UI state.
    fn set(&self, el: &mut Element, value: Value, ctx: &Context);
}

/// Look up the handler registered for a tag.
pub fn handler_for(tag: &str) -> Option<&'static dyn Handler> {
    match tag {
        "input" | "textarea" => Some(&InputHandler),
        "radio" => Some(&RadioHandler),
        "checkbox" => Some(&CheckboxHandler),
        "select" => Some(&SelectHandler),
        _ => None,
    }
}

/// Generic handler applied to field-bearing nodes with unrecognized tags.
pub fn default_handler() -> &'static dyn Handler {
    &DefaultHandler
}

/// Run the getter override, falling back to `raw` when none applies.
fn overridden_get<F>(el: &mut Element, ctx: &Context, raw: F) -> Value
where
    F: FnOnce(&Element) -> Value,
{
    match expr::getter_override(el, ctx) {
        Override::Function(f) => f(el, None, ctx).unwrap_or_else(|| raw(el)),
        Override::Format(expression) => {
            let current = raw(el);
            ctx.format(&expression, &current).unwrap_or(current)
        }
        Override::Absent => raw(el),
    }
}

/// Run the setter override. Returns the value still to be written, or
/// `None` when a function override already performed the write.
fn overridden_set(el: &mut Element, value: Value, ctx: &Context) -> Option<Value> {
    match expr::setter_override(el, ctx) {
        Override::Function(f) => {
            f(el, Some(&value), ctx);
            None
        }
        Override::Format(expression) => {
            let formatted = ctx.format(&expression, &value);
            Some(formatted.unwrap_or(value))
        }
        Override::Absent => Some(value),
    }
}

/// Substitute the node's `default` attribute for a null value.
fn with_default(el: &Element, value: Value) -> Value {
    if value.is_null() {
        match el.attr(attr::DEFAULT) {
            Some(def) => Value::String(def.to_string()),
            None => Value::Null,
        }
    } else {
        value
    }
}

/// Values to match choice members against: a list stays a list, any
/// scalar becomes a one-element list.
fn match_targets(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_text).collect(),
        scalar => vec![value_text(scalar)],
    }
}

fn is_choice_member(el: &Element) -> bool {
    el.tag == "input"
}

/// Single-value input or text area. Binds the native `value` slot.
struct InputHandler;

impl Handler for InputHandler {
    fn get(&self, el: &mut Element, ctx: &Context) -> Value {
        overridden_get(el, ctx, |el| Value::String(el.value.clone()))
    }

    fn set(&self, el: &mut Element, value: Value, ctx: &Context) {
        let Some(resolved) = overridden_set(el, value, ctx) else {
            return;
        };
        let resolved = with_default(el, resolved);
        el.value = value_text(&resolved);
    }
}

/// Single-choice group. Members are descendant `input` elements.
struct RadioHandler;

impl Handler for RadioHandler {
    fn get(&self, el: &mut Element, ctx: &Context) -> Value {
        overridden_get(el, ctx, |el| {
            let mut found = None;
            el.for_each_descendant(&mut |node| {
                if found.is_none() && is_choice_member(node) && node.checked {
                    found = Some(node.value.clone());
                }
            });
            found.map(Value::String).unwrap_or(Value::Null)
        })
    }

    fn set(&self, el: &mut Element, value: Value, ctx: &Context) {
        let Some(resolved) = overridden_set(el, value, ctx) else {
            return;
        };
        let resolved = with_default(el, resolved);
        let target = value_text(&resolved);

        let mut matched = false;
        el.for_each_descendant(&mut |node| {
            if is_choice_member(node) && node.value == target {
                matched = true;
            }
        });
        // No member carries this value: leave the group untouched
        if !matched {
            return;
        }
        el.for_each_descendant_mut(&mut |node| {
            if is_choice_member(node) {
                node.checked = node.value == target;
            }
        });
    }
}

/// Multi-choice group. Members are descendant `input` elements; `get`
/// always yields a list, in document order.
struct CheckboxHandler;

impl Handler for CheckboxHandler {
    fn get(&self, el: &mut Element, ctx: &Context) -> Value {
        overridden_get(el, ctx, |el| {
            let mut values = Vec::new();
            el.for_each_descendant(&mut |node| {
                if is_choice_member(node) && node.checked {
                    values.push(Value::String(node.value.clone()));
                }
            });
            Value::Array(values)
        })
    }

    fn set(&self, el: &mut Element, value: Value, ctx: &Context) {
        let Some(resolved) = overridden_set(el, value, ctx) else {
            return;
        };
        let resolved = with_default(el, resolved);
        let targets = match_targets(&resolved);
        el.for_each_descendant_mut(&mut |node| {
            if is_choice_member(node) {
                node.checked = targets.contains(&node.value);
            }
        });
    }
}

/// Selection list. Options are descendant `option` elements; `get` yields
/// null for no selection, the bare value for one, a list for several.
struct SelectHandler;

impl Handler for SelectHandler {
    fn get(&self, el: &mut Element, ctx: &Context) -> Value {
        overridden_get(el, ctx, |el| {
            let mut values = Vec::new();
            el.for_each_descendant(&mut |node| {
                if node.tag == "option" && node.selected {
                    values.push(node.value.clone());
                }
            });
            match values.len() {
                0 => Value::Null,
                1 => Value::String(values.remove(0)),
                _ => Value::Array(values.into_iter().map(Value::String).collect()),
            }
        })
    }

    fn set(&self, el: &mut Element, value: Value, ctx: &Context) {
        let Some(resolved) = overridden_set(el, value, ctx) else {
            return;
        };
        let resolved = with_default(el, resolved);
        let targets = match_targets(&resolved);
        el.for_each_descendant_mut(&mut |node| {
            if node.tag == "option" && targets.contains(&node.value) {
                node.selected = true;
            }
        });
    }
}

/// Generic display node. Binds text content.
struct DefaultHandler;

impl Handler for DefaultHandler {
    fn get(&self, el: &mut Element, ctx: &Context) -> Value {
        overridden_get(el, ctx, |el| Value::String(el.deep_text()))
    }

    fn set(&self, el: &mut Element, value: Value, ctx: &Context) {
        let Some(resolved) = overridden_set(el, value, ctx) else {
            return;
        };
        let resolved = with_default(el, resolved);
        el.text = value_text(&resolved);
    }
}
