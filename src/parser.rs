use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::block::{self, BlockType, FENCE};
use crate::error::{Error, Result};
use crate::html::Node;
use crate::inline::{self, TextSpan};

/// Compiles the markdown of one block into its HTML node.
pub type BlockCompiler = fn(&str) -> Result<Node>;

impl BlockType {
    /// The compiler responsible for blocks of this type.
    pub fn compiler(self) -> BlockCompiler {
        match self {
            BlockType::Paragraph => paragraph_to_node,
            BlockType::Heading => heading_to_node,
            BlockType::Code => code_to_node,
            BlockType::Quote => quote_to_node,
            BlockType::UnorderedList => unordered_list_to_node,
            BlockType::OrderedList => ordered_list_to_node,
        }
    }
}

/// Compile a single block that has already been classified.
pub fn compile(block: &str, block_type: BlockType) -> Result<Node> {
    (block_type.compiler())(block)
}

/// Parse a markdown document into an HTML tree rooted at a `div`.
pub fn parse(markdown: &str) -> Result<Node> {
    let children = block::segment(markdown)
        .into_iter()
        .map(|block| {
            let block_type = block::classify(block);
            trace!(?block_type, "classified block");
            compile(block, block_type)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Node::parent("div", children))
}

/// Title of a document: the text of its opening `# ` heading.
pub fn extract_title(markdown: &str) -> Result<String> {
    let first = block::segment(markdown)
        .into_iter()
        .next()
        .ok_or(Error::MissingTitle)?;

    let mut parts = first.splitn(2, char::is_whitespace);
    match (parts.next(), parts.next()) {
        (Some("#"), Some(rest)) => Ok(rest.replace('\n', " ").trim().to_string()),
        _ => Err(Error::MissingTitle),
    }
}

fn unordered_marker_re() -> &'static Regex {
    static UNORDERED_MARKER_RE: OnceLock<Regex> = OnceLock::new();
    UNORDERED_MARKER_RE.get_or_init(|| Regex::new(r"^-\s*").unwrap())
}

fn ordered_marker_re() -> &'static Regex {
    static ORDERED_MARKER_RE: OnceLock<Regex> = OnceLock::new();
    ORDERED_MARKER_RE.get_or_init(|| Regex::new(r"^\d+\.\s*").unwrap())
}

/// Join the lines of `text` with spaces and resolve its inline spans.
fn text_to_children(text: &str) -> Result<Vec<Node>> {
    let text = text.replace('\n', " ");
    Ok(inline::resolve(&text)?
        .into_iter()
        .map(TextSpan::into_node)
        .collect())
}

fn paragraph_to_node(block: &str) -> Result<Node> {
    Ok(Node::parent("p", text_to_children(block)?))
}

fn heading_to_node(block: &str) -> Result<Node> {
    let block = block.trim_start();
    let marker = block.split_whitespace().next().unwrap_or_default();
    let level = block::heading_level(marker).unwrap_or(1);
    let text = &block[marker.len()..];
    let text = text.strip_prefix(char::is_whitespace).unwrap_or(text);

    Ok(Node::parent(format!("h{level}"), text_to_children(text)?))
}

fn code_to_node(block: &str) -> Result<Node> {
    let body = block.strip_prefix(FENCE).unwrap_or(block);
    let body = body.strip_prefix(char::is_whitespace).unwrap_or(body);
    let body = body.strip_suffix(FENCE).unwrap_or(body);

    // Code is taken verbatim, never resolved for inline markup
    Ok(Node::parent("pre", vec![TextSpan::code(body).into_node()]))
}

fn quote_to_node(block: &str) -> Result<Node> {
    let text = block
        .lines()
        .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Node::parent("blockquote", text_to_children(&text)?))
}

fn unordered_list_to_node(block: &str) -> Result<Node> {
    Ok(Node::parent("ul", list_items(block, unordered_marker_re())?))
}

fn ordered_list_to_node(block: &str) -> Result<Node> {
    Ok(Node::parent("ol", list_items(block, ordered_marker_re())?))
}

fn list_items(block: &str, marker: &Regex) -> Result<Vec<Node>> {
    block
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let item = marker.replace(line, "");
            Ok(Node::parent("li", text_to_children(&item)?))
        })
        .collect()
}
