//! Line-oriented Markdown renderer
//!
//!     Turns explanation text into an ordered sequence of [`Block`]s in one forward pass over
//!     `\n`-separated lines. This is deliberately not CommonMark: every line is classified on its
//!     own, and the only state carried between lines is whether we are inside a code fence.
//!
//! Classification
//!
//!     Evaluated in this order, first match wins:
//!
//!     | Rule | Line                               | Block                                  |
//!     |------|------------------------------------|----------------------------------------|
//!     | 1    | starts with `## `                  | `Heading { level: 2 }`                 |
//!     | 2    | starts with `# `                   | `Heading { level: 1 }`                 |
//!     | 3    | contains `**`                      | `Paragraph` split on every `**`        |
//!     | 4    | starts with `- ` or `* `           | `ListItem { ordered: false }`          |
//!     | 5    | digits, `.`, one whitespace char   | `ListItem { ordered: true }`           |
//!     | 6    | empty or whitespace only           | `Spacer`                               |
//!     | 7    | anything else                      | single plain segment `Paragraph`       |
//!
//!     Rule 3 assigns emphasis by split index parity (odd indexes are emphasized). Markers are
//!     never paired, so an odd number of `**` leaves the tail of the line emphasized. Callers rely
//!     on the exact output, keep it that way.
//!
//! Fences
//!
//!     A line starting with "```" opens a fence, the next such line closes it. Lines in between
//!     are collected verbatim into one `CodeBlock` emitted at the closing line. Fence lines emit
//!     nothing themselves, so an info string (```` ```python ````) is discarded. A fence still open
//!     at end of input is dropped together with its buffered lines.

use crate::blocks::{Block, Segment};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Opens and closes a code block when found at the start of a line.
pub const FENCE_MARKER: &str = "```";

/// Delimits emphasized runs inside a line.
pub const EMPHASIS_MARKER: &str = "**";

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.").expect("ordered list pattern is valid"));

/// Whitespace as ECMAScript `trim` and `\s` see it: U+FEFF counts, U+0085 does not.
fn is_blank_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Text after a `1. ` style marker, if the line starts with one.
fn ordered_item_text(line: &str) -> Option<&str> {
    let marker = ORDERED_ITEM.find(line)?;
    let rest = &line[marker.end()..];
    let separator = rest.chars().next().filter(|c| is_blank_char(*c))?;
    Some(&rest[separator.len_utf8()..])
}

enum FenceState {
    Normal,
    InFence { lines: Vec<String> },
}

/// Render Markdown text to blocks. Empty input yields no blocks.
pub fn render(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut state = FenceState::Normal;

    for line in text.split('\n') {
        let is_fence = line.starts_with(FENCE_MARKER);
        state = match (state, is_fence) {
            (FenceState::Normal, true) => FenceState::InFence { lines: Vec::new() },
            (FenceState::InFence { lines }, true) => {
                blocks.push(Block::CodeBlock { lines });
                FenceState::Normal
            }
            (FenceState::InFence { mut lines }, false) => {
                lines.push(line.to_string());
                FenceState::InFence { lines }
            }
            (FenceState::Normal, false) => {
                blocks.push(classify_line(line));
                FenceState::Normal
            }
        };
    }

    if let FenceState::InFence { lines } = state {
        debug!(
            dropped_lines = lines.len(),
            "unterminated code fence, buffered lines dropped"
        );
    }

    debug!(blocks = blocks.len(), "rendered markdown");
    blocks
}

/// Classify a single line, ignoring fences.
pub fn classify_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }

    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            text: rest.to_string(),
        };
    }

    if line.contains(EMPHASIS_MARKER) {
        return Block::Paragraph {
            segments: split_emphasis(line),
        };
    }

    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        return Block::ListItem {
            ordered: false,
            text: rest.to_string(),
        };
    }

    if let Some(text) = ordered_item_text(line) {
        return Block::ListItem {
            ordered: true,
            text: text.to_string(),
        };
    }

    if line.chars().all(is_blank_char) {
        return Block::Spacer;
    }

    Block::plain_paragraph(line)
}

/// Split a line on every `**`, alternating plain and emphasized segments.
///
/// Empty segments are kept (`"**b**"` yields `["", "b", ""]`).
pub fn split_emphasis(line: &str) -> Vec<Segment> {
    line.split(EMPHASIS_MARKER)
        .enumerate()
        .map(|(index, part)| Segment {
            text: part.to_string(),
            emphasized: index % 2 == 1,
        })
        .collect()
}
