//! Block model
//!
//! The renderer produces a flat, ordered sequence of [`Block`] values. There is no nesting: list
//! items are standalone blocks and code fences collapse into a single [`Block::CodeBlock`].
//!
//! The serde representation is internally tagged so that JSON output reads naturally:
//!
//! ```text
//! {"type":"heading","level":2,"text":"Name Error"}
//! {"type":"paragraph","segments":[{"text":"What happened:","emphasized":true}]}
//! {"type":"list_item","ordered":true,"text":"Check for typos"}
//! {"type":"spacer"}
//! {"type":"code_block","lines":["print(x)"]}
//! ```

use serde::{Deserialize, Serialize};

/// One run of text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// A unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `# ` (level 1) or `## ` (level 2) line
    Heading { level: u8, text: String },
    Paragraph { segments: Vec<Segment> },
    ListItem { ordered: bool, text: String },
    /// Blank or whitespace-only line
    Spacer,
    /// Lines between a pair of fences, verbatim and in order
    CodeBlock { lines: Vec<String> },
}

impl Block {
    /// Paragraph holding the whole line as one plain segment
    pub fn plain_paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            segments: vec![Segment::plain(text)],
        }
    }

    /// Stable, human readable name of the variant (used by the tag and treeviz formats)
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::ListItem { .. } => "ListItem",
            Block::Spacer => "Spacer",
            Block::CodeBlock { .. } => "CodeBlock",
        }
    }

    /// Text of the block with emphasis markers removed; code lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::ListItem { text, .. } => text.clone(),
            Block::Paragraph { segments } => segments.iter().map(|s| s.text.as_str()).collect(),
            Block::Spacer => String::new(),
            Block::CodeBlock { lines } => lines.join("\n"),
        }
    }
}

/// An ordered sequence of blocks, the unit every format reads or writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Render Markdown text into a document. See [`crate::render::render`].
    pub fn from_markdown(text: &str) -> Self {
        Self::new(crate::render::render(text))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
