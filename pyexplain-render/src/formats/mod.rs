//! Format implementations
//!
//! Each format converts between a block [`crate::Document`] and a text representation.
//! `markdown` and `json` read and write; `html`, `tag` and `treeviz` only write.

pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod tag;
pub mod treeviz;

pub use html::{get_default_css, HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tag::TagFormat;
pub use treeviz::TreevizFormat;
