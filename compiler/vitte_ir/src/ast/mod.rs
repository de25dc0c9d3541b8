//! Flat AST arena.
//!
//! Nodes are allocated into one `Vec<Node>` and refer to their children
//! through a range into a second, shared `Vec<NodeId>`. A node is built in
//! two steps: [`Ast::alloc`] reserves its id (so the parser can hand out the
//! id before the children exist), [`Ast::finish`] seals its children.
//!
//! Slot 0 is reserved, so [`NodeId::INVALID`] never names a live node and
//! every other id returned by the arena stays valid for the arena's lifetime.

mod dump;
mod kind;
mod operators;

use std::fmt;

use crate::{Name, Span};

pub use dump::dump;
pub use kind::NodeKind;
pub use operators::{BinaryOp, UnaryOp};

/// Index of a node in an [`Ast`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node". Never allocated.
    pub const INVALID: NodeId = NodeId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

/// Kind-specific data decoded once by the parser.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    #[default]
    None,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// One AST node.
///
/// `name` holds the declared or referenced identifier, `text` the literal
/// source text (or the message of an `Error` node).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub name: Option<Name>,
    pub text: Option<Name>,
    pub payload: Payload,
    children_start: u32,
    children_len: u32,
}

impl Node {
    fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            name: None,
            text: None,
            payload: Payload::None,
            children_start: 0,
            children_len: 0,
        }
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self.payload {
            Payload::Binary(op) => Some(op),
            _ => None,
        }
    }

    pub fn unary_op(&self) -> Option<UnaryOp> {
        match self.payload {
            Payload::Unary(op) => Some(op),
            _ => None,
        }
    }

    /// Parsed value of an `Int` literal.
    pub fn int_value(&self) -> Option<i64> {
        match self.payload {
            Payload::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Parsed value of a `Float` literal.
    pub fn float_value(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.payload {
            Payload::Bool(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children_len as usize
    }
}

/// Arena holding every node of one parsed file.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    children: Vec<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size for roughly `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        let mut arena = Vec::with_capacity(nodes + 1);
        arena.push(Node::new(NodeKind::Error, Span::DUMMY));
        Ast {
            nodes: arena,
            children: Vec::with_capacity(nodes),
        }
    }

    /// Reserve a node with no children yet.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len()).unwrap_or_else(|_| {
            panic!("AST arena exceeded {} nodes", u32::MAX);
        });
        self.nodes.push(Node::new(kind, span));
        NodeId(index)
    }

    /// Seal the children of `id`. Invalid ids in `children` are dropped.
    pub fn finish(&mut self, id: NodeId, children: &[NodeId]) {
        let start = self.children.len();
        self.children
            .extend(children.iter().copied().filter(|c| c.is_valid()));
        let len = self.children.len() - start;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "children count bounded by u32 node ids"
        )]
        let (start, len) = (start as u32, len as u32);
        let node = &mut self.nodes[id.index()];
        node.children_start = start;
        node.children_len = len;
    }

    /// Allocate and immediately seal a node.
    pub fn add(&mut self, kind: NodeKind, span: Span, children: &[NodeId]) -> NodeId {
        let id = self.alloc(kind, span);
        self.finish(id, children);
        id
    }

    pub fn set_name(&mut self, id: NodeId, name: Name) {
        self.nodes[id.index()].name = Some(name);
    }

    pub fn set_text(&mut self, id: NodeId, text: Name) {
        self.nodes[id.index()].text = Some(text);
    }

    pub fn set_payload(&mut self, id: NodeId, payload: Payload) {
        self.nodes[id.index()].payload = payload;
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    /// Node lookup that tolerates the sentinel and stale ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_valid() {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    /// Node lookup for ids known to come from this arena.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> Option<Name> {
        self.node(id).name
    }

    #[inline]
    pub fn text(&self, id: NodeId) -> Option<Name> {
        self.node(id).text
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let node = self.node(id);
        let start = node.children_start as usize;
        &self.children[start..start + node.children_len as usize]
    }

    /// The `i`th child, or `NodeId::INVALID` when out of range.
    pub fn child(&self, id: NodeId, i: usize) -> NodeId {
        self.children(id).get(i).copied().unwrap_or(NodeId::INVALID)
    }

    /// First child of the given kind.
    pub fn find_child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == kind)
    }

    /// Number of live nodes (the reserved slot is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, node)| {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "arena length checked against u32 in alloc"
                )]
                let id = NodeId(i as u32);
                (id, node)
            })
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
