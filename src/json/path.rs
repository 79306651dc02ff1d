//! Dotted key paths over nested JSON values
//!
//! A path is a sequence of object keys separated by `.`, optionally
//! followed by bracketed array indices: `profile.name`, `servers[0].host`,
//! `matrix[1][2]`.

use crate::types::{ConfError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Largest array index a path may address. Assignment pads arrays with
/// `null` up to the index, so this also bounds that allocation.
pub const MAX_INDEX: usize = 65_535;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A parsed, non-empty key path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |why: &str| {
            ConfError::validation(format!("Expecting key to be valid path: {:?} ({})", raw, why))
        };

        if raw.is_empty() {
            return Err(invalid("empty"));
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };

            // Indices must follow a key: `[0]` and `a.[0]` are rejected
            if key.is_empty() {
                return Err(invalid("empty segment"));
            }
            segments.push(Segment::Key(key.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| invalid("unterminated bracket"))?;
                let digits = &rest[1..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("index must be a non-negative integer"));
                }
                let idx = digits
                    .parse::<usize>()
                    .ok()
                    .filter(|idx| *idx <= MAX_INDEX)
                    .ok_or_else(|| invalid("index out of range"))?;
                segments.push(Segment::Index(idx));

                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid("unexpected text after index"));
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 && matches!(seg, Segment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

fn as_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Look up the value at `path`. Missing keys yield `None`.
pub fn get_path<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    path.segments.iter().try_fold(root, |current, seg| match (current, seg) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Object(map), Segment::Index(idx)) => map.get(&idx.to_string()),
        (Value::Array(items), Segment::Key(key)) => as_index(key).and_then(|i| items.get(i)),
        (Value::Array(items), Segment::Index(idx)) => items.get(*idx),
        _ => None,
    })
}

/// Take the value at `path` out of `root`. Missing keys yield `None`.
pub fn take_path(root: Value, path: &KeyPath) -> Option<Value> {
    path.segments.iter().try_fold(root, |current, seg| match (current, seg) {
        (Value::Object(mut map), Segment::Key(key)) => map.remove(key),
        (Value::Object(mut map), Segment::Index(idx)) => map.remove(&idx.to_string()),
        (Value::Array(items), Segment::Key(key)) => {
            as_index(key).and_then(|i| items.into_iter().nth(i))
        }
        (Value::Array(items), Segment::Index(idx)) => items.into_iter().nth(*idx),
        _ => None,
    })
}

/// Assign `value` at `path`, creating intermediate containers.
///
/// Key segments create objects, index segments create arrays. An
/// intermediate that cannot hold the next segment is replaced. Addressing
/// an array slot beyond [`MAX_INDEX`] is a validation error.
pub fn set_path(root: &mut Value, path: &KeyPath, value: Value) -> Result<()> {
    let mut current = root;
    for seg in &path.segments {
        current = child_mut(current, seg)?;
    }
    *current = value;
    Ok(())
}

fn child_mut<'a>(current: &'a mut Value, seg: &Segment) -> Result<&'a mut Value> {
    match seg {
        Segment::Key(key) => match as_index(key) {
            Some(idx) if current.is_array() => array_slot(current, idx),
            _ => Ok(object_slot(current, key.clone())),
        },
        Segment::Index(idx) => {
            if current.is_object() {
                Ok(object_slot(current, idx.to_string()))
            } else {
                array_slot(current, *idx)
            }
        }
    }
}

fn object_slot(current: &mut Value, key: String) -> &mut Value {
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => map.entry(key).or_insert(Value::Null),
        _ => unreachable!("replaced with an object above"),
    }
}

fn array_slot(current: &mut Value, idx: usize) -> Result<&mut Value> {
    if idx > MAX_INDEX {
        return Err(ConfError::validation(format!(
            "Expecting key to be valid path: index {} exceeds {}",
            idx, MAX_INDEX
        )));
    }
    if !current.is_array() {
        *current = Value::Array(Vec::new());
    }
    match current {
        Value::Array(items) => {
            if items.len() <= idx {
                items.resize(idx + 1, Value::Null);
            }
            Ok(&mut items[idx])
        }
        _ => unreachable!("replaced with an array above"),
    }
}
