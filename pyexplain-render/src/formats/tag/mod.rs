//! XML-like block tag serialization
//!
//! A debugging view of the block sequence, one tag per block.
//!
//! ## Format
//!
//! - Block kind → tag name (kebab-case)
//! - Scalar fields → attributes
//! - Text → text content, paragraph segments and code lines → nested tags
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <heading level="2">Name Error</heading>
//!   <paragraph>
//!     <strong>What happened:</strong>
//!   </paragraph>
//!   <list-item ordered="true">Check for typos</list-item>
//!   <spacer/>
//!   <code-block>
//!     <line>print(my_variable)</line>
//!   </code-block>
//! </document>
//! ```
//!
//! Unlike the HTML output, empty paragraph segments are kept so the exact split is visible.

use crate::blocks::{Block, Document};
use crate::error::FormatError;
use crate::format::Format;

fn to_tag_name(kind: &str) -> String {
    let mut tag = String::new();
    for (i, c) in kind.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            tag.push('-');
        }
        tag.extend(c.to_lowercase());
    }
    tag
}

fn format_block(block: &Block, output: &mut String) {
    let tag = to_tag_name(block.kind());
    match block {
        Block::Heading { level, text } => {
            output.push_str(&format!(
                "  <{tag} level=\"{level}\">{}</{tag}>\n",
                escape_xml(text)
            ));
        }
        Block::ListItem { ordered, text } => {
            output.push_str(&format!(
                "  <{tag} ordered=\"{ordered}\">{}</{tag}>\n",
                escape_xml(text)
            ));
        }
        Block::Spacer => output.push_str(&format!("  <{tag}/>\n")),
        Block::Paragraph { segments } => {
            output.push_str(&format!("  <{tag}>\n"));
            for segment in segments {
                let inner = if segment.emphasized { "strong" } else { "text" };
                output.push_str(&format!(
                    "    <{inner}>{}</{inner}>\n",
                    escape_xml(&segment.text)
                ));
            }
            output.push_str(&format!("  </{tag}>\n"));
        }
        Block::CodeBlock { lines } => {
            output.push_str(&format!("  <{tag}>\n"));
            for line in lines {
                output.push_str(&format!("    <line>{}</line>\n", escape_xml(line)));
            }
            output.push_str(&format!("  </{tag}>\n"));
        }
    }
}

/// Serialize a document to the tag format
pub fn serialize_document(doc: &Document) -> String {
    let mut result = String::new();
    result.push_str("<document>\n");
    for block in &doc.blocks {
        format_block(block, &mut result);
    }
    result.push_str("</document>\n");
    result
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// Format implementation for XML-like tag format
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like tag dump of the block sequence"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }
}
