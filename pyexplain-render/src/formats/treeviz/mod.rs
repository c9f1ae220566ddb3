//! Treeviz formatter for block documents
//!
//! A compact terminal view: one line per block, code blocks expanded one level with their lines.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (label truncated to `label-width` characters)
//!
//! Example:
//!
//! ```text
//! ⧉ Document (4 blocks)
//! ├─ § h2 Name Error
//! ├─ ⎯
//! ├─ ¶ 𝐁 What happened:
//! └─ 𝒱 2 lines
//!   ├─ ↵ my_variable = 10
//!   └─ ↵ print(my_variable)
//! ```
//!
//! Paragraphs with at least one emphasized segment carry the emphasis icon before their text.
//!
//! Options:
//! - `label-width` (integer, default 30)

use super::icons::get_icon;
use crate::blocks::{Block, Document};
use crate::error::FormatError;
use crate::format::{check_known_options, Format};
use std::collections::HashMap;

pub const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(width).collect();
        short.push('…');
        short
    }
}

fn block_label(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => format!("h{level} {text}"),
        Block::Paragraph { segments } => {
            let text = block.plain_text();
            if segments.iter().any(|s| s.emphasized) {
                format!("{} {text}", get_icon("Emphasis"))
            } else {
                text
            }
        }
        Block::ListItem { ordered, text } => {
            let marker = if *ordered { "1." } else { "-" };
            format!("{marker} {text}")
        }
        Block::Spacer => String::new(),
        Block::CodeBlock { lines } => match lines.len() {
            1 => "1 line".to_string(),
            n => format!("{n} lines"),
        },
    }
}

fn push_line(output: &mut String, prefix: &str, is_last: bool, icon: &str, label: &str) {
    let connector = if is_last { "└─" } else { "├─" };
    if label.is_empty() {
        output.push_str(&format!("{prefix}{connector} {icon}\n"));
    } else {
        output.push_str(&format!("{prefix}{connector} {icon} {label}\n"));
    }
}

/// Convert a document to a treeviz string
pub fn to_treeviz_str(doc: &Document, label_width: usize) -> String {
    let count = doc.blocks.len();
    let noun = if count == 1 { "block" } else { "blocks" };
    let mut output = format!("{} Document ({count} {noun})\n", get_icon("Document"));

    for (i, block) in doc.blocks.iter().enumerate() {
        let is_last = i + 1 == count;
        let label = truncate(&block_label(block), label_width);
        push_line(&mut output, "", is_last, get_icon(block.kind()), &label);

        if let Block::CodeBlock { lines } = block {
            let child_prefix = if is_last { "  " } else { "│ " };
            for (j, line) in lines.iter().enumerate() {
                push_line(
                    &mut output,
                    child_prefix,
                    j + 1 == lines.len(),
                    get_icon("CodeLine"),
                    &truncate(line, label_width),
                );
            }
        }
    }

    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of blocks with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc, DEFAULT_LABEL_WIDTH))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["label-width"])?;
        let width = match options.get("label-width") {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                FormatError::SerializationError(format!("Invalid label-width '{raw}'"))
            })?,
            None => DEFAULT_LABEL_WIDTH,
        };
        Ok(to_treeviz_str(doc, width))
    }
}
