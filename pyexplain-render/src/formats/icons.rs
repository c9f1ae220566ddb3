//! Icon mapping for the treeviz format

/// Get the Unicode icon for a block kind (see [`crate::blocks::Block::kind`])
pub fn get_icon(kind: &str) -> &'static str {
    match kind {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "ListItem" => "•",
        "Spacer" => "⎯",
        "CodeBlock" => "𝒱",
        "CodeLine" => "↵",
        "Emphasis" => "𝐁",
        _ => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mappings() {
        assert_eq!(get_icon("Document"), "⧉");
        assert_eq!(get_icon("Heading"), "§");
        assert_eq!(get_icon("Paragraph"), "¶");
        assert_eq!(get_icon("ListItem"), "•");
        assert_eq!(get_icon("Spacer"), "⎯");
        assert_eq!(get_icon("CodeBlock"), "𝒱");
        assert_eq!(get_icon("CodeLine"), "↵");
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(get_icon("Table"), "○");
    }
}
