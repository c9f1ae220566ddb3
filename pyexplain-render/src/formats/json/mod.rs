//! JSON format
//!
//! Serde encoding of a [`Document`]: `{"blocks": [...]}` with internally tagged blocks (see
//! [`crate::blocks`]). This is the format to hand rendered explanations to another program, and
//! the only lossless one: it parses back to the exact same document.
//!
//! Options:
//! - `pretty` (bool, default `true`): indent the output.

use crate::blocks::Document;
use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use std::collections::HashMap;

/// Format implementation for JSON
pub struct JsonFormat;

impl JsonFormat {
    fn write(doc: &Document, pretty: bool) -> Result<String, FormatError> {
        let result = if pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Block list as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid block JSON: {e}")))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Self::write(doc, true)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["pretty"])?;
        Self::write(doc, bool_option(options, "pretty", true)?)
    }
}
