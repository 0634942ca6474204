//! Getter/setter override resolution
//!
//! A node's `getter`/`setter` attribute is either a bare identifier
//! (resolved through the context function table) or a format expression
//! (evaluated by the pluggable `Context::format`). The literal tokens
//! `@setter`/`@getter` alias the opposite attribute so one expression can
//! serve both directions.
//!
//! Resolution never fails: every dead end is `Override::Absent` and the
//! handler's default logic applies.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::context::{Context, OverrideFn};
use crate::element::{attr, Element};

/// Identifiers may only contain letters, digits, underscore, and `$`.
/// Anything else is a format expression, never a function reference.
static IDENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_$]+$").unwrap());

/// Getter attribute token borrowing the setter expression.
const ALIAS_SETTER: &str = "@setter";
/// Setter attribute token borrowing the getter expression.
const ALIAS_GETTER: &str = "@getter";

/// Outcome of resolving a getter/setter attribute.
pub enum Override {
    /// Named callable from the context function table.
    Function(OverrideFn),
    /// Format expression for [`Context::format`].
    Format(String),
    /// No usable override declared.
    Absent,
}

/// Resolve the node's read override.
pub fn getter_override(el: &Element, ctx: &Context) -> Override {
    resolve(el.attr(attr::GETTER), el.attr(attr::SETTER), ALIAS_SETTER, ctx)
}

/// Resolve the node's write override.
pub fn setter_override(el: &Element, ctx: &Context) -> Override {
    resolve(el.attr(attr::SETTER), el.attr(attr::GETTER), ALIAS_GETTER, ctx)
}

fn resolve(
    declared: Option<&str>,
    opposite: Option<&str>,
    alias_token: &str,
    ctx: &Context,
) -> Override {
    let Some(mut expression) = declared else {
        return Override::Absent;
    };
    if expression == alias_token {
        match opposite {
            Some(other) => expression = other,
            None => return Override::Absent,
        }
    }
    if expression.is_empty() {
        return Override::Absent;
    }

    if IDENT_PATTERN.is_match(expression) {
        match ctx.function(expression) {
            Some(f) => Override::Function(f),
            None => {
                trace!(identifier = expression, "unknown override function, ignored");
                Override::Absent
            }
        }
    } else {
        Override::Format(expression.to_string())
    }
}
