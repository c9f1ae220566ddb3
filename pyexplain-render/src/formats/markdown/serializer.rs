//! Markdown serialization (Document → Markdown text)

use crate::blocks::{Block, Document, Segment};
use crate::render::{EMPHASIS_MARKER, FENCE_MARKER};

/// Serialize a document to Markdown, one line per block (code blocks span several).
///
/// Lines are joined with `\n` and there is no trailing newline: a trailing newline would render
/// back as an extra spacer.
pub fn serialize_to_markdown(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(doc.blocks.len());

    for block in &doc.blocks {
        match block {
            Block::Heading { level, text } => {
                let hashes = if *level >= 2 { "##" } else { "#" };
                lines.push(format!("{hashes} {text}"));
            }
            Block::Paragraph { segments } => lines.push(write_segments(segments)),
            Block::ListItem { ordered, text } => {
                let marker = if *ordered { "1." } else { "-" };
                lines.push(format!("{marker} {text}"));
            }
            Block::Spacer => lines.push(String::new()),
            Block::CodeBlock { lines: code } => {
                lines.push(FENCE_MARKER.to_string());
                lines.extend(code.iter().cloned());
                lines.push(FENCE_MARKER.to_string());
            }
        }
    }

    lines.join("\n")
}

/// Write paragraph segments, toggling `**` whenever emphasis changes.
///
/// Segments produced by the renderer alternate strictly, so this is the same as joining them on
/// `**`. No closing marker is added at the end of the line: the renderer never pairs markers.
fn write_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut emphasized = false;
    for segment in segments {
        if segment.emphasized != emphasized {
            out.push_str(EMPHASIS_MARKER);
            emphasized = segment.emphasized;
        }
        out.push_str(&segment.text);
    }
    out
}
