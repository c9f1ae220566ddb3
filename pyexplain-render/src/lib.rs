//! Rendering for Python error explanations
//!
//!     This crate turns the Markdown an explanation panel receives (from a model or from the
//!     canned fallback table) into typed display blocks, and maps those blocks to the outputs a
//!     caller may want: HTML markup, JSON, or a debugging view.
//!
//!     This is a pure lib, that is, it powers pyexplain-cli but is shell agnostic: no code here
//!     prints, reads environment variables or touches the network. Diagnostics go through
//!     `tracing`; installing a subscriber is the application's business.
//!
//!     The file structure :
//!     .
//!     ├── blocks.rs               # Block, Segment, Document
//!     ├── render.rs               # The line renderer (Markdown → blocks)
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # parse = render.rs, serialize = blocks → Markdown
//!     │   ├── json                # serde encoding of the block list
//!     │   ├── html                # presentation markup
//!     │   ├── tag                 # XML-like dump
//!     │   └── treeviz             # terminal tree
//!     └── explain                 # fallback table and API payloads
//!
//! Core Algorithm
//!
//!     The renderer is a single forward pass over `\n`-separated lines. Each line is classified on
//!     its own (heading, bold paragraph, list item, spacer, paragraph); the only carried state is
//!     whether we are inside a ``` fence, in which case lines are buffered into one code block.
//!     See ./render.rs for the exact precedence and the two preserved quirks (parity based `**`
//!     emphasis, unterminated fences dropped).
//!
//! Formats
//!
//!     Like any conversion in this crate, a format implements the Format trait (./format.rs) and is
//!     registered in the FormatRegistry (./registry.rs). Markdown and JSON parse and serialize,
//!     the presentation formats only serialize.
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # module root so cargo finds the subdirectories
//!     ├── render                  # renderer properties (proptest)
//!     └── explanations            # canned explanations through the formats (insta)
//!         └── snapshots
//!

pub mod blocks;
pub mod error;
pub mod explain;
pub mod format;
pub mod formats;
pub mod registry;
pub mod render;

pub use blocks::{Block, Document, Segment};
pub use error::{ExplainError, FormatError};
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::render;

/// Render Markdown and serialize the blocks with the named format in one step.
pub fn convert(markdown: &str, format: &str) -> Result<String, FormatError> {
    let registry = FormatRegistry::default();
    registry.serialize(&Document::from_markdown(markdown), format)
}
