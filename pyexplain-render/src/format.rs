//! Format trait definition
//!
//! Every output (and the two inputs, Markdown and JSON) is a [`Format`]: a named conversion
//! between text and a block [`Document`].

use crate::blocks::Document;
use crate::error::FormatError;
use std::collections::HashMap;

/// Trait for document formats
///
/// Formats can support parsing (text → Document), serialization (Document → text), or both.
/// Only `markdown` and `json` parse; the presentation formats are write-only.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.blocks.iter().map(|b| b.plain_text().to_uppercase()).collect())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used for detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into text
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with format specific options (`--extra-*` on the command line).
    ///
    /// The default implementation accepts no options. Formats with knobs override it.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Read a boolean option, accepting the usual spellings.
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    match options.get(key).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            other => Err(FormatError::SerializationError(format!(
                "Invalid boolean value '{other}' for option '{key}'"
            ))),
        },
    }
}

/// Reject options a format does not understand.
pub(crate) fn check_known_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support parameter(s): {}",
        unknown.join(", ")
    )))
}
