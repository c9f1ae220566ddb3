//! Markdown format implementation
//!
//! Parsing is the line renderer in [`crate::render`]. Serialization writes blocks back out as the
//! Markdown subset the renderer understands.
//!
//! # Element Mapping Table
//!
//! | Block              | Markdown                     | Notes                                         |
//! |--------------------|------------------------------|-----------------------------------------------|
//! | Heading (1, 2)     | `# text`, `## text`          | Other levels are clamped into 1..=2            |
//! | Paragraph          | text with `**` toggles       | A marker is written at every emphasis change  |
//! | ListItem unordered | `- text`                     | `* ` items come back as `- `                  |
//! | ListItem ordered   | `1. text`                    | Original numbers are not kept by the renderer |
//! | Spacer             | empty line                   |                                               |
//! | CodeBlock          | ```` ``` ```` fenced lines   | Info strings are not kept by the renderer     |
//!
//! # Lossy Conversions
//!
//! - Ordered item numbers, fence info strings and the content of unterminated fences never reach
//!   the block model, so they cannot be written back.
//! - Any line outside a fence that came from the renderer is written back so that rendering it
//!   again gives the same block.

pub mod serializer;

use crate::blocks::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Line-oriented Markdown (headings, bold, lists, code fences)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(Document::from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
