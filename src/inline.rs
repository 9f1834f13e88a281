use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::html::Node;

/// Formatting of an inline span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

/// A run of inline text with a single formatting.
///
/// For images `text` holds the alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub kind: SpanKind,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Link { url: url.into() })
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, SpanKind::Image { url: url.into() })
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }

    /// Target of a link or source of an image.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            SpanKind::Link { url } | SpanKind::Image { url } => Some(url),
            _ => None,
        }
    }

    /// Convert the span into its HTML leaf.
    pub fn into_node(self) -> Node {
        match self.kind {
            SpanKind::Plain => Node::text(self.text),
            SpanKind::Bold => Node::leaf("b", self.text),
            SpanKind::Italic => Node::leaf("i", self.text),
            SpanKind::Code => Node::leaf("code", self.text),
            SpanKind::Link { url } => Node::leaf("a", self.text).with_attributes([("href", url)]),
            SpanKind::Image { url } => {
                Node::leaf("img", "").with_attributes([("src", url), ("alt", self.text)])
            }
        }
    }
}

/// Emphasis delimiters, applied in this order.
const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Resolve a line of inline markdown into typed spans.
///
/// Images and links are pulled out first so their brackets and URLs are never
/// read as emphasis. Fails if any plain span has an unmatched delimiter.
pub fn resolve(text: &str) -> Result<Vec<TextSpan>> {
    let spans = split_images(vec![TextSpan::plain(text)]);
    let mut spans = split_links(spans);
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, &kind)?;
    }
    Ok(spans)
}

fn image_re() -> &'static Regex {
    static IMAGE_RE: OnceLock<Regex> = OnceLock::new();
    IMAGE_RE.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap())
}

fn link_re() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    LINK_RE.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap())
}

/// Split `![alt](url)` images out of plain spans.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, find_images)
}

/// Split `[text](url)` links out of plain spans.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, find_links)
}

fn find_images(text: &str) -> Vec<(Range<usize>, TextSpan)> {
    image_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.range(), TextSpan::image(&caps[1], &caps[2])))
        })
        .collect()
}

fn find_links(text: &str) -> Vec<(Range<usize>, TextSpan)> {
    let re = link_re();
    let mut found = Vec::new();
    let mut start = 0;
    while let Some(caps) = re.captures_at(text, start) {
        let Some(whole) = caps.get(0) else { break };
        // `![...](...)` is an image, retry from just past the bracket
        if text[..whole.start()].ends_with('!') {
            start = whole.start() + 1;
            continue;
        }
        found.push((whole.range(), TextSpan::link(&caps[1], &caps[2])));
        start = whole.end();
    }
    found
}

fn split_matches<F>(spans: Vec<TextSpan>, find: F) -> Vec<TextSpan>
where
    F: Fn(&str) -> Vec<(Range<usize>, TextSpan)>,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        let mut cursor = 0;
        for (range, extracted) in find(&span.text) {
            push_plain(&mut out, &span.text[cursor..range.start]);
            out.push(extracted);
            cursor = range.end;
        }
        push_plain(&mut out, &span.text[cursor..]);
    }
    out
}

fn push_plain(out: &mut Vec<TextSpan>, text: &str) {
    if !text.is_empty() {
        out.push(TextSpan::plain(text));
    }
}

/// Split plain spans on `delimiter`, turning every enclosed run into `kind`.
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    kind: &SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        if span.text.matches(delimiter).count() % 2 != 0 {
            return Err(Error::UnmatchedDelimiter {
                delimiter,
                text: span.text,
            });
        }
        // A leading delimiter leaves an empty segment at index 0, so enclosed
        // text always sits at odd indices.
        for (index, segment) in span.text.split(delimiter).enumerate() {
            if segment.is_empty() {
                continue;
            }
            let segment_kind = if index % 2 == 0 {
                SpanKind::Plain
            } else {
                kind.clone()
            };
            out.push(TextSpan::new(segment, segment_kind));
        }
    }
    Ok(out)
}
