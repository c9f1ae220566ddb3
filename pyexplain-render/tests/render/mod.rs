//! Renderer properties over generated input

use proptest::prelude::*;
use pyexplain_render::formats::markdown::serializer::serialize_to_markdown;
use pyexplain_render::render::{render, split_emphasis};
use pyexplain_render::{Block, Document, Segment};

/// Lines that never open a fence
fn fence_free_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9#*. -]{0,24}"
}

proptest! {
    #[test]
    fn plain_line_is_one_plain_paragraph(line in "[a-zA-Z][a-zA-Z ,.!?']{0,40}") {
        prop_assert_eq!(render(&line), vec![Block::plain_paragraph(line.clone())]);
    }

    #[test]
    fn one_block_per_line_without_fences(lines in prop::collection::vec(fence_free_line(), 1..12)) {
        let text = lines.join("\n");
        let expected = if text.is_empty() { 0 } else { lines.len() };
        prop_assert_eq!(render(&text).len(), expected);
    }

    #[test]
    fn rendering_is_repeatable(text in "[a-z#*`0-9. \n-]{0,80}") {
        prop_assert_eq!(render(&text), render(&text));
    }

    #[test]
    fn emphasis_alternates_from_plain(pieces in prop::collection::vec("[a-z ]{0,6}", 2..7)) {
        let line = format!("x{}", pieces.join("**"));
        let segments = split_emphasis(&line);
        prop_assert_eq!(segments.len(), pieces.len());
        for (i, segment) in segments.iter().enumerate() {
            prop_assert_eq!(segment.emphasized, i % 2 == 1);
        }
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(joined, line.replace("**", ""));
    }

    #[test]
    fn markdown_serializer_preserves_blocks(lines in prop::collection::vec(fence_free_line(), 0..10)) {
        // A leading line keeps a lone spacer from serializing to the empty document
        let text = format!("x\n{}", lines.join("\n"));
        let blocks = render(&text);
        let again = render(&serialize_to_markdown(&Document::new(blocks.clone())));
        prop_assert_eq!(again, blocks);
    }

    #[test]
    fn closed_fence_keeps_lines_verbatim(code in prop::collection::vec("[ a-z#*0-9.-]{0,16}", 0..6)) {
        let text = format!("```\n{}\n```", code.join("\n"));
        let expected = if code.is_empty() { vec![String::new()] } else { code.clone() };
        prop_assert_eq!(render(&text), vec![Block::CodeBlock { lines: expected }]);
    }

    #[test]
    fn unterminated_fence_contributes_nothing(
        before in prop::collection::vec("[a-z]{1,8}", 0..4),
        code in prop::collection::vec("[a-z ]{0,8}", 0..4),
    ) {
        let head = before.join("\n");
        let text = if head.is_empty() {
            format!("```\n{}", code.join("\n"))
        } else {
            format!("{head}\n```\n{}", code.join("\n"))
        };
        let expected: Vec<Block> = before.iter().cloned().map(Block::plain_paragraph).collect();
        prop_assert_eq!(render(&text), expected);
    }
}

#[test]
fn test_heading_precedence_over_emphasis() {
    assert_eq!(
        render("## **Bold** heading"),
        vec![Block::Heading {
            level: 2,
            text: "**Bold** heading".to_string()
        }]
    );
}

#[test]
fn test_emphasis_precedence_over_list() {
    assert_eq!(
        render("- **x** item"),
        vec![Block::Paragraph {
            segments: vec![
                Segment::plain("- "),
                Segment::strong("x"),
                Segment::plain(" item"),
            ]
        }]
    );
}

#[test]
fn test_whitespace_only_line_is_spacer() {
    assert_eq!(render(" \t "), vec![Block::Spacer]);
}
