//! JSON pretty-printing.
//!
//! Response bodies declared as JSON are shown re-indented with two spaces.

use crate::formatter::FormatError;
use serde::Serialize;
use serde_json::Value;

/// Pretty-prints an already parsed JSON value with 2-space indentation.
pub fn format_value_pretty(value: &Value) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::JsonError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}

/// Parses `json` and pretty-prints it with 2-space indentation.
///
/// # Errors
///
/// `FormatError::JsonError` if the text is not valid JSON.
///
/// # Examples
///
/// ```
/// use api_tester::formatter::json::format_json_pretty;
///
/// let formatted = format_json_pretty(r#"{"ok":true}"#).unwrap();
/// assert_eq!(formatted, "{\n  \"ok\": true\n}");
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;
    format_value_pretty(&value)
}
