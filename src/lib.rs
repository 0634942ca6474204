//! treebind - bidirectional field binding between JSON data and UI trees
//!
//! A caller-supplied [`Element`] tree is annotated with `field` paths and
//! optional `field-type`/`getter`/`setter`/`recursion`/`default` attributes.
//! [`pull`] copies the tree's native UI values into a nested
//! [`serde_json::Value`]; [`push`] copies a data value back into the tree.
//! Both passes are synchronous, tolerate partially-populated data, and
//! never raise for per-node failures.
//!
//! ```
//! use serde_json::json;
//! use treebind::{pull, push, Context, Element};
//!
//! let mut form = Element::new("form")
//!     .with_child(Element::new("input").with_field("person.name").with_value("Alice"));
//!
//! let ctx = Context::new();
//! assert_eq!(pull(&mut form, &ctx), json!({"person": {"name": "Alice"}}));
//!
//! push(&mut form, &json!({"person": {"name": "Bob"}}), &ctx);
//! assert_eq!(form.children[0].value, "Bob");
//! ```

pub mod context;
pub mod element;
pub mod error;
pub mod expr;
pub mod handlers;
pub mod path;
pub mod walker;

pub use context::{default_format, value_text, Context, FormatFn, OverrideFn, PLACEHOLDER};
pub use element::{attr, Element};
pub use error::BindError;
pub use expr::Override;
pub use handlers::{default_handler, handler_for, Handler};
pub use walker::{pull, pull_into, push};
