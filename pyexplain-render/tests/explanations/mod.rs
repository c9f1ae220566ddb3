//! Canned explanations pushed through the output formats
//!
//! The fallback texts are what a user sees whenever the model is unreachable, so their rendered
//! forms are pinned with snapshots.

use insta::assert_snapshot;
use pyexplain_render::explain::{fallback_explanation, resolve, Source};
use pyexplain_render::formats::icons::get_icon;
use pyexplain_render::{Block, Document, FormatRegistry, Segment};
use std::collections::HashMap;

const ZERO_DIVISION_MESSAGE: &str = "ZeroDivisionError: division by zero";
const NAME_ERROR_MESSAGE: &str = "NameError: name 'undefined_variable' is not defined";

fn render_as(message: &str, format: &str) -> String {
    let doc = Document::from_markdown(&fallback_explanation(message));
    FormatRegistry::default()
        .serialize(&doc, format)
        .expect("Failed to serialize explanation")
}

fn snapshot(name: &str, output: &str) {
    insta::with_settings!({
        snapshot_path => "snapshots",
        prepend_module_to_snapshot => false,
    }, {
        assert_snapshot!(name, output);
    });
}

#[test]
fn test_name_error_tag() {
    let tag = render_as(NAME_ERROR_MESSAGE, "tag");
    snapshot("name_error_tag", &tag);
}

#[test]
fn test_zero_division_treeviz() {
    let tree = render_as(ZERO_DIVISION_MESSAGE, "treeviz");
    snapshot("zero_division_treeviz", &tree);
}

#[test]
fn test_zero_division_html() {
    let html = render_as(ZERO_DIVISION_MESSAGE, "html");
    snapshot("zero_division_html", &html);
}

#[test]
fn test_name_error_block_sequence() {
    let doc = Document::from_markdown(&fallback_explanation(NAME_ERROR_MESSAGE));
    let kinds: Vec<&str> = doc.blocks.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "Heading",
            "Spacer",
            "Paragraph",
            "Paragraph",
            "Spacer",
            "Paragraph",
            "Paragraph",
            "Spacer",
            "Paragraph",
            "ListItem",
            "ListItem",
            "ListItem",
            "Spacer",
            "Paragraph",
            "CodeBlock",
        ]
    );
    assert_eq!(
        doc.blocks[2],
        Block::Paragraph {
            segments: vec![
                Segment::plain(""),
                Segment::strong("What happened:"),
                Segment::plain(""),
            ]
        }
    );
}

#[test]
fn test_generic_explanation_html() {
    let html = render_as("SyntaxError: invalid syntax", "html");
    assert!(html.starts_with(r#"<div class="markdown-content"><h2>Error Analysis</h2>"#));
    let intro = "<span>Your code encountered an error: `SyntaxError: invalid syntax`</span>";
    assert!(html.contains(intro));
    let tip = r#"<li class="md-list-unordered">Add print statements to track variable values</li>"#;
    assert!(html.contains(tip));
    assert!(!html.contains("<pre"));
}

#[test]
fn test_generic_explanation_escapes_message_in_html() {
    let html = render_as("TypeError: '<' not supported", "html");
    assert!(html.contains("`TypeError: '&lt;' not supported`"));
}

#[test]
fn test_json_through_registry_round_trips() {
    let registry = FormatRegistry::default();
    let doc = Document::from_markdown(&fallback_explanation(ZERO_DIVISION_MESSAGE));

    let json = registry.serialize(&doc, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["blocks"][0]["type"], "heading");
    assert_eq!(value["blocks"][0]["level"], 2);
    assert_eq!(value["blocks"][13]["type"], "code_block");

    assert_eq!(registry.parse(&json, "json").unwrap(), doc);
}

#[test]
fn test_standalone_html_page() {
    let registry = FormatRegistry::default();
    let doc = Document::from_markdown(&fallback_explanation(NAME_ERROR_MESSAGE));
    let mut options = HashMap::new();
    options.insert("standalone".to_string(), "true".to_string());
    options.insert("title".to_string(), "NameError".to_string());

    let page = registry
        .serialize_with_options(&doc, "html", &options)
        .unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>NameError</title>"));
    assert!(page.contains(".markdown-content h1"));
    assert!(page.contains("<h2>Name Error</h2>"));
}

#[test]
fn test_model_answer_is_rendered_instead_of_fallback() {
    let body =
        r###"{"candidates":[{"content":{"parts":[{"text":"# Why\n\n- **x** is unbound"}]}}]}"###;
    let explanation = resolve(NAME_ERROR_MESSAGE, Some(body));
    assert_eq!(explanation.source, Source::Model);

    let tree = FormatRegistry::default()
        .serialize(&explanation.document(), "treeviz")
        .unwrap();
    assert_eq!(
        tree,
        format!(
            "{doc} Document (3 blocks)\n├─ {h} h1 Why\n├─ {s}\n└─ {p} {b} - x is unbound\n",
            doc = get_icon("Document"),
            h = get_icon("Heading"),
            s = get_icon("Spacer"),
            p = get_icon("Paragraph"),
            b = get_icon("Emphasis"),
        )
    );
}
