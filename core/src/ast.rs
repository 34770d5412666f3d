//! The arena-owned syntax tree.
//!
//! One [`Ast`] owns everything a parse produced: the node table, the
//! shared child-id pool, and the string table holding decoded literal
//! text. Nodes reference each other through [`NodeId`] handles rather than
//! pointers, so the whole tree drops in one bulk operation and no node can
//! outlive its arena. Callers must not hold ids across the arena's drop;
//! ids are meaningless without the `Ast` that issued them.

use crate::span::Span;

/// Handle to a node inside one [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Index into the arena's node table.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Handle to a string in the arena's string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrId(u32);

/// A contiguous run of child ids in the arena's shared child pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeRange {
    start: u32,
    len: u32,
}

impl NodeRange {
    /// Number of children in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One syntax-tree node.
///
/// The closed variant set mirrors the data model: leaves carry their text
/// (numbers keep their source spelling to preserve precision), aggregates
/// carry ranges into the shared child pool, and `Property` pairs a string
/// key node with a value node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Null { span: Span },
    Bool { value: bool, span: Span },
    Number { text: StrId, span: Span },
    String { text: StrId, span: Span },
    Array { elements: NodeRange, span: Span },
    Object { properties: NodeRange, span: Span },
    Property { key: NodeId, value: NodeId, span: Span },
}

impl Node {
    /// The source region this node covers.
    #[inline]
    pub const fn span(&self) -> Span {
        match self {
            Node::Null { span }
            | Node::Bool { span, .. }
            | Node::Number { span, .. }
            | Node::String { span, .. }
            | Node::Array { span, .. }
            | Node::Object { span, .. }
            | Node::Property { span, .. } => *span,
        }
    }
}

/// An arena-owned syntax tree.
///
/// Produced by a successful parse; read-only afterwards. Dropping the
/// `Ast` releases every node and every decoded string at once.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    children: Vec<NodeId>,
    strings: Vec<Box<str>>,
    root: Option<NodeId>,
}

impl Ast {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The top-level value.
    ///
    /// Present on every `Ast` returned by the parser; the parser never
    /// publishes a tree without a root.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Looks up a node by handle.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Looks up interned text by handle.
    #[inline]
    pub fn text(&self, id: StrId) -> &str {
        &self.strings[id.0 as usize]
    }

    /// Resolves a child range to its node ids.
    #[inline]
    pub fn children(&self, range: NodeRange) -> &[NodeId] {
        &self.children[range.start as usize..(range.start + range.len) as usize]
    }

    /// Total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn intern(&mut self, text: String) -> StrId {
        let id = StrId(self.strings.len() as u32);
        self.strings.push(text.into_boxed_str());
        id
    }

    pub(crate) fn push_children(&mut self, ids: &[NodeId]) -> NodeRange {
        let start = self.children.len() as u32;
        self.children.extend_from_slice(ids);
        NodeRange {
            start,
            len: ids.len() as u32,
        }
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Re-serializes the tree as JSON text.
    ///
    /// Structurally faithful: property order, number spellings, and string
    /// contents are preserved, so parsing the output yields an equal tree.
    /// Trees parsed from the config grammar serialize as their JSON
    /// equivalent.
    pub fn write_json(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.write_node(root, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Node::Null { .. } => out.push_str("null"),
            Node::Bool { value: true, .. } => out.push_str("true"),
            Node::Bool { value: false, .. } => out.push_str("false"),
            Node::Number { text, .. } => out.push_str(self.text(*text)),
            Node::String { text, .. } => write_escaped(self.text(*text), out),
            Node::Array { elements, .. } => {
                out.push('[');
                for (i, child) in self.children(*elements).iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_node(*child, out);
                }
                out.push(']');
            }
            Node::Object { properties, .. } => {
                out.push('{');
                for (i, child) in self.children(*properties).iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_node(*child, out);
                }
                out.push('}');
            }
            Node::Property { key, value, .. } => {
                self.write_node(*key, out);
                out.push(':');
                self.write_node(*value, out);
            }
        }
    }

    /// Structural equality between two trees, ignoring spans and arena
    /// identity. Used by round-trip tests and available to callers that
    /// compare parses of different inputs.
    pub fn tree_eq(&self, other: &Ast) -> bool {
        match (self.root, other.root) {
            (Some(a), Some(b)) => self.node_eq(a, other, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn node_eq(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        match (self.node(a), other.node(b)) {
            (Node::Null { .. }, Node::Null { .. }) => true,
            (Node::Bool { value: va, .. }, Node::Bool { value: vb, .. }) => va == vb,
            (Node::Number { text: ta, .. }, Node::Number { text: tb, .. })
            | (Node::String { text: ta, .. }, Node::String { text: tb, .. }) => {
                self.text(*ta) == other.text(*tb)
            }
            (Node::Array { elements: ea, .. }, Node::Array { elements: eb, .. }) => {
                self.range_eq(*ea, other, *eb)
            }
            (Node::Object { properties: pa, .. }, Node::Object { properties: pb, .. }) => {
                self.range_eq(*pa, other, *pb)
            }
            (
                Node::Property {
                    key: ka, value: va, ..
                },
                Node::Property {
                    key: kb, value: vb, ..
                },
            ) => self.node_eq(*ka, other, *kb) && self.node_eq(*va, other, *vb),
            _ => false,
        }
    }

    fn range_eq(&self, a: NodeRange, other: &Ast, b: NodeRange) -> bool {
        let left = self.children(a);
        let right = other.children(b);
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|(x, y)| self.node_eq(*x, other, *y))
    }
}

fn write_escaped(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
