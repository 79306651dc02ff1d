//! On-disk document encoding and the provenance marker

use crate::types::{ConfError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::Path;

/// Reserved top-level key present in every file written by this crate
pub const SENTINEL_KEY: &str = "__user-conf__";

/// A config document as seen by callers
pub type Document = Map<String, Value>;

/// Serialize `doc` with the marker injected, tab-indented
pub(crate) fn encode(doc: &Document) -> Result<Vec<u8>> {
    let mut stored = doc.clone();
    stored.insert(SENTINEL_KEY.to_string(), Value::Bool(true));

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    stored.serialize(&mut ser)?;
    Ok(buf)
}

/// Parse file contents read after construction, hiding the marker
pub(crate) fn decode(path: &Path, bytes: &[u8]) -> Result<Document> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(mut doc) => {
            doc.remove(SENTINEL_KEY);
            Ok(doc)
        }
        _ => Err(ConfError::NotConfigFile(path.to_path_buf())),
    }
}

/// Check that an existing file was written by this crate
pub(crate) fn verify(path: &Path, bytes: &[u8]) -> Result<()> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| ConfError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    match value.get(SENTINEL_KEY) {
        Some(Value::Bool(true)) => Ok(()),
        _ => Err(ConfError::NotConfigFile(path.to_path_buf())),
    }
}

/// Validate a caller-supplied whole document
pub(crate) fn expect_object(value: Value, what: &str) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfError::validation(format!("Expecting {} to be object", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        expect_object(value, "doc").unwrap()
    }

    #[test]
    fn test_encode_injects_marker_with_tabs() {
        let bytes = encode(&doc(json!({"name": "Ada"}))).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\n\t\"name\": \"Ada\""));
        assert!(text.contains("\"__user-conf__\": true"));
    }

    #[test]
    fn test_encode_empty_document() {
        let bytes = encode(&Document::new()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"__user-conf__": true}));
    }

    #[test]
    fn test_decode_hides_marker() {
        let bytes = encode(&doc(json!({"a": {"b": 1}}))).unwrap();
        let decoded = decode(Path::new("x.json"), &bytes).unwrap();
        assert_eq!(Value::Object(decoded), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = decode(Path::new("x.json"), b"[1, 2]").unwrap_err();
        assert!(matches!(err, ConfError::NotConfigFile(_)));

        let err = decode(Path::new("x.json"), b"{ nope").unwrap_err();
        assert!(matches!(err, ConfError::Json(_)));
    }

    #[test]
    fn test_verify() {
        let path = Path::new("x.json");
        assert!(verify(path, br#"{"__user-conf__": true}"#).is_ok());
        assert!(matches!(
            verify(path, br#"{"__user-conf__": false}"#),
            Err(ConfError::NotConfigFile(_))
        ));
        assert!(matches!(
            verify(path, br#"{"name": "x"}"#),
            Err(ConfError::NotConfigFile(_))
        ));
        assert!(matches!(verify(path, b"true"), Err(ConfError::NotConfigFile(_))));
        assert!(matches!(verify(path, b"{,}"), Err(ConfError::Corrupt { .. })));
    }

    #[test]
    fn test_expect_object() {
        let err = expect_object(json!("text"), "diff").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: Expecting diff to be object");
    }
}
