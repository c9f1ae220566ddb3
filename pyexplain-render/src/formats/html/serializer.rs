//! HTML serialization (Document → HTML)
//!
//! Pipeline: blocks → RcDom nodes → HTML string → optional page wrapper

use super::get_default_css;
use crate::blocks::{Block, Document, Segment};
use crate::error::FormatError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

const DEFAULT_TITLE: &str = "Error Explanation";

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Emit a complete page (doctype, head, embedded CSS) instead of a fragment
    pub standalone: bool,
    pub title: String,
    /// Appended after the baseline CSS in standalone pages
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            title: DEFAULT_TITLE.to_string(),
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a document to HTML
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    let container = build_html_tree(doc);
    let fragment = serialize_node(&container)?;

    debug!(
        blocks = doc.blocks.len(),
        standalone = options.standalone,
        "serialized html"
    );

    if options.standalone {
        Ok(wrap_in_document(&fragment, options))
    } else {
        Ok(fragment)
    }
}

/// Build the `<div class="markdown-content">` tree for a document
fn build_html_tree(doc: &Document) -> Handle {
    let container = create_element("div", vec![("class", "markdown-content")]);

    for block in &doc.blocks {
        let node = match block {
            Block::Heading { level, text } => {
                let tag = if *level >= 2 { "h2" } else { "h1" };
                element_with_text(tag, vec![], text)
            }
            Block::Paragraph { segments } => {
                let para = create_element("p", vec![]);
                for segment in segments {
                    append_segment(&para, segment);
                }
                para
            }
            Block::ListItem { ordered, text } => {
                let class = if *ordered {
                    "md-list-ordered"
                } else {
                    "md-list-unordered"
                };
                element_with_text("li", vec![("class", class)], text)
            }
            Block::Spacer => create_element("div", vec![("class", "md-spacer")]),
            Block::CodeBlock { lines } => {
                element_with_text("pre", vec![("class", "md-code")], &lines.join("\n"))
            }
        };
        append(&container, node);
    }

    container
}

/// Plain segments become `<span>`, emphasized ones `<strong>`. Empty segments are skipped.
fn append_segment(parent: &Handle, segment: &Segment) {
    if segment.text.is_empty() {
        return;
    }
    let tag = if segment.emphasized { "strong" } else { "span" };
    append(parent, element_with_text(tag, vec![], &segment.text));
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

fn element_with_text(tag: &str, attrs: Vec<(&str, &str)>, text: &str) -> Handle {
    let element = create_element(tag, attrs);
    if !text.is_empty() {
        append(&element, create_text(text));
    }
    element
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize a node and its subtree
fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap a fragment in a complete HTML page with embedded CSS
fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let baseline_css = get_default_css();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(&options.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="pyexplain">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{custom_css}
  </style>
</head>
<body>
{body_html}
</body>
</html>
"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
