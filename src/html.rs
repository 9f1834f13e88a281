/// Attributes of an HTML element, kept in insertion order.
///
/// Keys are unique; inserting an existing key replaces its value in place so
/// the original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        let mut attributes = Self::new();
        for (key, value) in pairs {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// An element holding a single value.
///
/// A leaf without a tag renders as its bare value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub tag: Option<String>,
    pub value: String,
    pub attributes: Attributes,
}

/// An element wrapping an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<Node>,
    pub attributes: Attributes,
}

/// A node of the rendered HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl Node {
    /// Untagged leaf: emitted as raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        })
    }

    pub fn with_attributes(mut self, attributes: impl Into<Attributes>) -> Self {
        match &mut self {
            Node::Leaf(leaf) => leaf.attributes = attributes.into(),
            Node::Parent(parent) => parent.attributes = attributes.into(),
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Parent(parent) => Some(&parent.tag),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => &leaf.attributes,
            Node::Parent(parent) => &parent.attributes,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => &parent.children,
        }
    }

    /// Serialize the tree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append the serialized tree to `out`.
    ///
    /// Values are written verbatim, without entity encoding.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Leaf(LeafNode {
                tag: None, value, ..
            }) => out.push_str(value),
            Node::Leaf(LeafNode {
                tag: Some(tag),
                value,
                attributes,
            }) => {
                open_tag(tag, attributes, out);
                out.push_str(value);
                close_tag(tag, out);
            }
            Node::Parent(ParentNode {
                tag,
                children,
                attributes,
            }) => {
                open_tag(tag, attributes, out);
                for child in children {
                    child.write_html(out);
                }
                close_tag(tag, out);
            }
        }
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attributes.write_html(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
