//! Dotted field paths into nested JSON
//!
//! Supports:
//! - `a.b.c` (object keys)
//! - `items.0.name` (numeric segments address list positions)
//!
//! `get` returns `None` for anything absent instead of erroring; `set`
//! auto-vivifies missing intermediates and silently drops writes that
//! collide with a non-container value. The walker relies on both behaviors
//! to stay total over heterogeneous, partially-populated data.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::BindError;

/// A parsed field-path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key access: `.name`
    Key(String),
    /// List position access: `.0`
    Index(usize),
}

/// Parse a dotted field path into segments
///
/// Examples:
/// - `"person.address.city"` → `[Key("person"), Key("address"), Key("city")]`
/// - `"items.0.name"` → `[Key("items"), Index(0), Key("name")]`
pub fn parse(path: &str) -> Result<Vec<Segment>, BindError> {
    if path.is_empty() {
        return Err(BindError::invalid_path(path, "path is empty"));
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            return Err(BindError::invalid_path(path, "empty segment"));
        }
        if let Ok(index) = part.parse::<usize>() {
            segments.push(Segment::Index(index));
        } else {
            segments.push(Segment::Key(part.to_string()));
        }
    }

    Ok(segments)
}

/// Read the value at `path`, or `None` if any step is absent or the path
/// does not parse. Never errors, never panics.
pub fn get(data: &Value, path: &str) -> Option<Value> {
    let segments = parse(path).ok()?;
    let mut current = data;
    for segment in &segments {
        current = match segment {
            Segment::Key(key) => current.get(key)?,
            Segment::Index(index) => current.get(*index)?,
        };
    }
    Some(current.clone())
}

/// Write `value` at `path`, creating empty objects (or padding lists with
/// nulls) for missing intermediates. A segment that collides with an
/// existing non-container value drops the write.
pub fn set(data: &mut Value, path: &str, value: Value) {
    let segments = match parse(path) {
        Ok(segments) => segments,
        Err(err) => {
            trace!(path, %err, "write dropped");
            return;
        }
    };
    // parse() rejects empty paths, so split_last always succeeds
    let Some((last, intermediate)) = segments.split_last() else {
        return;
    };

    let mut current = data;
    for segment in intermediate {
        match descend(current, segment) {
            Some(next) => current = next,
            None => {
                trace!(path, ?segment, "segment collides with non-container, write dropped");
                return;
            }
        }
    }

    match last {
        Segment::Key(key) => {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            match current.as_object_mut() {
                Some(map) => {
                    map.insert(key.clone(), value);
                }
                None => trace!(path, "final segment collides with non-object, write dropped"),
            }
        }
        Segment::Index(index) => {
            if current.is_null() {
                *current = Value::Array(Vec::new());
            }
            match current.as_array_mut() {
                Some(list) => {
                    if list.len() <= *index {
                        list.resize(*index + 1, Value::Null);
                    }
                    list[*index] = value;
                }
                None => trace!(path, "final segment collides with non-list, write dropped"),
            }
        }
    }
}

/// Step one segment deeper, vivifying a missing container.
fn descend<'a>(current: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match segment {
        Segment::Key(key) => {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let map = current.as_object_mut()?;
            Some(map.entry(key.clone()).or_insert(Value::Null))
        }
        Segment::Index(index) => {
            if current.is_null() {
                *current = Value::Array(Vec::new());
            }
            let list = current.as_array_mut()?;
            if list.len() <= *index {
                list.resize(*index + 1, Value::Null);
            }
            Some(&mut list[*index])
        }
    }
}
