//! HTML format implementation
//!
//! Maps blocks to the markup the explanation panel displays. Export only.
//!
//! # Library Choice
//!
//! Markup is built as an `markup5ever_rcdom` tree and written with the `html5ever` serializer, so
//! escaping and void elements are handled by a browser-grade implementation instead of string
//! concatenation.
//!
//! # Element Mapping Table
//!
//! | Block              | HTML                                              |
//! |--------------------|---------------------------------------------------|
//! | (document)         | `<div class="markdown-content">`                  |
//! | Heading            | `<h1>` / `<h2>`                                   |
//! | Paragraph          | `<p>` with `<span>` (plain) / `<strong>` children |
//! | ListItem           | `<li class="md-list-unordered">` / `md-list-ordered` |
//! | Spacer             | `<div class="md-spacer">`                         |
//! | CodeBlock          | `<pre class="md-code">`, lines joined with `\n`   |
//!
//! List items are emitted without a `<ul>`/`<ol>` wrapper: each line is its own block and the
//! list style comes from the class.
//!
//! # Options
//!
//! - `standalone` (bool): wrap the fragment in a complete HTML5 page with embedded CSS.
//! - `title`: page title for standalone output.
//! - `custom-css`: CSS text appended after the baseline stylesheet (standalone only).

mod serializer;

pub use serializer::{serialize_to_html, HtmlOptions};

use crate::blocks::Document;
use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use std::collections::HashMap;

/// Baseline stylesheet embedded in standalone output
pub fn get_default_css() -> &'static str {
    include_str!("../../../css/baseline.css")
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML markup (fragment or standalone page)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &HtmlOptions::default())
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["standalone", "title", "custom-css"])?;

        let mut html_options = HtmlOptions::default();
        html_options.standalone = bool_option(options, "standalone", html_options.standalone)?;
        if let Some(title) = options.get("title") {
            html_options.title = title.clone();
        }
        if let Some(css) = options.get("custom-css") {
            html_options.custom_css = Some(css.clone());
        }

        serialize_to_html(doc, &html_options)
    }
}
