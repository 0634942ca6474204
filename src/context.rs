//! Binding context
//!
//! Per-call configuration, passed explicitly to `pull`/`push` — there is no
//! module-level state. Carries the pluggable `format` function used to
//! evaluate non-identifier getter/setter expressions and the named function
//! table that getter/setter identifiers resolve through.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::element::Element;

/// Placeholder replaced with the current value in format expressions.
pub const PLACEHOLDER: &str = "$";

/// Named getter/setter override.
///
/// Called with `None` as the value during a pull: return `Some(v)` to make
/// `v` the pulled value, `None` to fall back to the handler's default read.
/// Called with `Some(value)` during a push: the call itself is the write,
/// and the handler's default write logic is skipped.
pub type OverrideFn = Arc<dyn Fn(&mut Element, Option<&Value>, &Context) -> Option<Value>>;

/// Pluggable expression evaluator. `None` means evaluation failed; the
/// caller treats that as "no override".
pub type FormatFn = Arc<dyn Fn(&str, &Value) -> Option<Value>>;

/// Per-call options for a pull/push pass.
#[derive(Clone)]
pub struct Context {
    format: FormatFn,
    functions: HashMap<String, OverrideFn>,
}

impl Context {
    /// Context with the default `$`-substituting format and no named
    /// functions
    pub fn new() -> Self {
        Self {
            format: Arc::new(|expr, value| Some(default_format(expr, value))),
            functions: HashMap::new(),
        }
    }

    /// Replace the format function
    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&str, &Value) -> Option<Value> + 'static,
    {
        self.format = Arc::new(format);
        self
    }

    /// Register a named getter/setter override
    pub fn with_function<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Element, Option<&Value>, &Context) -> Option<Value> + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
        self
    }

    /// Evaluate a format expression against the current value
    pub fn format(&self, expression: &str, current: &Value) -> Option<Value> {
        (self.format)(expression, current)
    }

    /// Look up a named override
    pub fn function(&self, name: &str) -> Option<OverrideFn> {
        self.functions.get(name).cloned()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Context").field("functions", &names).finish()
    }
}

/// Default format: substitute the current value for every `$` in the
/// expression.
pub fn default_format(expression: &str, current: &Value) -> Value {
    Value::String(expression.replace(PLACEHOLDER, &value_text(current)))
}

/// Display form of a scalar, used for placeholder substitution and for
/// comparing data values against native UI values.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_format_substitutes_placeholder() {
        assert_eq!(
            default_format("height: $ cm", &json!(175)),
            json!("height: 175 cm")
        );
        assert_eq!(default_format("$/$", &json!("x")), json!("x/x"));
        assert_eq!(default_format("no placeholder", &json!(1)), json!("no placeholder"));
    }

    #[test]
    fn value_text_scalars() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(17.5)), "17.5");
        assert_eq!(value_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn function_registration_and_lookup() {
        let ctx = Context::new().with_function("getText", |_, _, _| Some(json!("fixed")));
        assert!(ctx.function("getText").is_some());
        assert!(ctx.function("other").is_none());
    }

    #[test]
    fn custom_format_is_used() {
        let ctx = Context::new().with_format(|expr, value| {
            Some(json!(format!("{expr}:{}", value_text(value))))
        });
        assert_eq!(ctx.format("e", &json!(2)), Some(json!("e:2")));
    }

    #[test]
    fn debug_lists_function_names() {
        let ctx = Context::new()
            .with_function("b", |_, _, _| None)
            .with_function("a", |_, _, _| None);
        assert_eq!(format!("{ctx:?}"), r#"Context { functions: ["a", "b"] }"#);
    }
}
