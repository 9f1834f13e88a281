mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
pub mod site;

pub use block::{BlockType, classify, segment};
pub use config::{Config, SiteConfig};
pub use error::{Error, Result};
pub use html::{Attributes, LeafNode, Node, ParentNode};
pub use inline::{SpanKind, TextSpan, resolve};
pub use parser::{BlockCompiler, compile, extract_title};

/// Parse markdown into an HTML tree rooted at a `div`.
pub fn markdown_to_html_node(markdown: &str) -> Result<Node> {
    parser::parse(markdown)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    Ok(markdown_to_html_node(markdown)?.to_html())
}
