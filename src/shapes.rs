//! Response-shape normalization for the transcription service.
//!
//! The service does not honor a single response contract. Depending on
//! routing and model it may answer with any of:
//! 1. `{"text": "..."}`
//! 2. `{"generated_text": "..."}`
//! 3. `[{"text": "..."}]` (or `generated_text` inside the first element)
//!
//! Rather than cascading field checks, each accepted layout is an explicit
//! [`ResponseShape`] with a pure extractor, tried in a fixed priority order.
//! The first shape that matches wins.

use serde_json::Value;

/// One accepted JSON layout the service may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// An object with a `text` field.
    TextField,

    /// An object with a `generated_text` field.
    GeneratedTextField,

    /// A non-empty array whose first element carries either field.
    ArrayFirstElement,
}

impl ResponseShape {
    /// All shapes, in match-priority order.
    pub const PRIORITY: [ResponseShape; 3] = [
        ResponseShape::TextField,
        ResponseShape::GeneratedTextField,
        ResponseShape::ArrayFirstElement,
    ];

    /// Extract the transcription text if `value` matches this shape.
    pub fn extract(&self, value: &Value) -> Option<String> {
        match self {
            ResponseShape::TextField => string_field(value, "text"),
            ResponseShape::GeneratedTextField => string_field(value, "generated_text"),
            ResponseShape::ArrayFirstElement => {
                let first = value.as_array()?.first()?;
                string_field(first, "text").or_else(|| string_field(first, "generated_text"))
            }
        }
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field)?.as_str().map(str::to_owned)
}

/// Normalize a raw response body into transcription text.
///
/// Returns `None` when the body is not JSON or matches none of the known
/// shapes; the caller reports that as an unrecognized-shape failure.
pub fn normalize_response(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ResponseShape::PRIORITY
        .iter()
        .find_map(|shape| shape.extract(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_all_three_shapes_to_the_same_text() {
        assert_eq!(
            normalize_response(r#"{"text":"hello"}"#).as_deref(),
            Some("hello")
        );
        assert_eq!(
            normalize_response(r#"{"generated_text":"hello"}"#).as_deref(),
            Some("hello")
        );
        assert_eq!(
            normalize_response(r#"[{"text":"hello"}]"#).as_deref(),
            Some("hello")
        );
        assert_eq!(
            normalize_response(r#"[{"generated_text":"hello"}]"#).as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn text_field_wins_over_generated_text() {
        let body = r#"{"text":"primary","generated_text":"secondary"}"#;
        assert_eq!(normalize_response(body).as_deref(), Some("primary"));
    }

    #[test]
    fn unknown_shapes_normalize_to_none() {
        assert_eq!(normalize_response(r#"{"foo":"bar"}"#), None);
        assert_eq!(normalize_response(r#"[]"#), None);
        assert_eq!(normalize_response(r#"[{"foo":"bar"}]"#), None);
        assert_eq!(normalize_response(r#""just a string""#), None);
        assert_eq!(normalize_response("not json at all"), None);
    }

    #[test]
    fn non_string_fields_do_not_match() {
        assert_eq!(normalize_response(r#"{"text":42}"#), None);
    }
}
