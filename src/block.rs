use std::fmt::Write;

/// Fence opening and closing a code block
pub const FENCE: &str = "```";

/// Block-level elements recognised in markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Split a document into blocks separated by blank lines.
///
/// Blocks are trimmed; runs of blank lines never yield empty blocks.
pub fn segment(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block by looking at its own lines only.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.lines().filter(|line| !line.is_empty()).collect();
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return BlockType::Paragraph;
    };
    let first_token = first.split_whitespace().next().unwrap_or_default();
    let last_token = last.split_whitespace().next_back().unwrap_or_default();

    if heading_level(first_token).is_some() {
        BlockType::Heading
    } else if first_token == FENCE && last_token == FENCE {
        BlockType::Code
    } else if lines.iter().all(|line| line.starts_with('>')) {
        BlockType::Quote
    } else if lines.iter().all(|line| line.starts_with('-')) {
        BlockType::UnorderedList
    } else if is_ordered_list(&lines) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Every line starts with its 1-based position followed by `.`
fn is_ordered_list(lines: &[&str]) -> bool {
    let mut marker = String::new();
    lines.iter().enumerate().all(|(i, line)| {
        marker.clear();
        let _ = write!(marker, "{}.", i + 1);
        line.starts_with(marker.as_str())
    })
}

/// Level of a heading marker token such as `###`, if it is one.
pub fn heading_level(token: &str) -> Option<u8> {
    let level = token.len();
    if (1..=6).contains(&level) && token.bytes().all(|b| b == b'#') {
        Some(level as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn segments_paragraphs_and_lists() {
        let md = "
This is **bolded** paragraph

This is another paragraph with _italic_ text and `code` here
This is the same paragraph on a new line

- This is a list
- with items
";
        assert_eq!(
            segment(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
                "- This is a list\n- with items",
            ]
        );
    }

    #[test]
    fn extra_blank_lines_collapse() {
        let md = "first paragraph \n\n\n\n\n\nsecond paragraph\n";
        assert_eq!(segment(md), vec!["first paragraph", "second paragraph"]);
    }

    #[rstest]
    #[case("a\n\n\n\n\n\nb")]
    #[case("a\n\n\n\n\nb")]
    #[case("\n\n\na\n\n  \n\nb\n\n\n")]
    fn never_yields_empty_blocks(#[case] md: &str) {
        assert_eq!(segment(md), vec!["a", "b"]);
    }

    #[test]
    fn empty_document_has_no_blocks() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
    }

    #[rstest]
    #[case("# heading", BlockType::Heading)]
    #[case("## heading", BlockType::Heading)]
    #[case("###### heading", BlockType::Heading)]
    #[case("####### seven hashes", BlockType::Paragraph)]
    #[case("#not a heading", BlockType::Paragraph)]
    #[case("```\ncode goes here\n```", BlockType::Code)]
    #[case("```\nunterminated", BlockType::Paragraph)]
    #[case(
        "> This is a quote line\n> This is another quote line\n> This is a third quote line > > ",
        BlockType::Quote
    )]
    #[case("> quote\nnot quoted", BlockType::Paragraph)]
    #[case("- one\n- two\n- three", BlockType::UnorderedList)]
    #[case("-tight\n- loose", BlockType::UnorderedList)]
    #[case("1. first\n2. second\n3. third", BlockType::OrderedList)]
    #[case("1.item 1\n2.  item 2\n3.\titem 3", BlockType::OrderedList)]
    #[case("1. a\n3. b", BlockType::Paragraph)]
    #[case("2. starts late", BlockType::Paragraph)]
    #[case("01. padded", BlockType::Paragraph)]
    #[case("1. a\n2 b", BlockType::Paragraph)]
    #[case(
        "This is just regular text. > This is not a quote, because it's in regular text.",
        BlockType::Paragraph
    )]
    fn classifies(#[case] block: &str, #[case] expected: BlockType) {
        assert_eq!(classify(block), expected);
    }

    #[test]
    fn ordered_list_with_double_digits() {
        let block = (1..=12)
            .map(|i| format!("{i}. item {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(classify(&block), BlockType::OrderedList);
    }

    #[test]
    fn ordered_list_position_must_match_every_marker() {
        let mut lines = (1..=11).map(|i| format!("{i}. item")).collect::<Vec<_>>();
        lines[10] = "1. item".to_string();
        assert_eq!(classify(&lines.join("\n")), BlockType::Paragraph);
    }

    #[test]
    fn heading_wins_over_other_rules() {
        assert_eq!(classify("# heading\n- item"), BlockType::Heading);
    }

    #[rstest]
    #[case("#", Some(1))]
    #[case("######", Some(6))]
    #[case("#######", None)]
    #[case("", None)]
    #[case("#a", None)]
    fn heading_levels(#[case] token: &str, #[case] expected: Option<u8>) {
        assert_eq!(heading_level(token), expected);
    }
}
