//! Node - interned RDF term values
//!
//! A node is an immutable (kind, text, meta) value handed out by the
//! [`NodeTable`](crate::table::NodeTable). Handles are cheap to clone
//! (`Arc`-backed) and two handles from the same table compare equal by
//! pointer alone.
//!
//! ## Ordering
//!
//! Nodes use strict total ordering over content: kind first, then text
//! bytes, then literal meta. This is the order every index comparator
//! bottoms out in.
//!
//! ## Identity vs equality
//!
//! `Node::same` is pointer identity and implies value equality within one
//! table. `PartialEq` takes the pointer fast path and falls back to the
//! structural comparison, which also covers nodes from different tables
//! (e.g. deserialized ones).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Term kind tag
///
/// The declaration order is the comparison order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Literal value (may carry a datatype or language meta node)
    Literal,
    /// Absolute IRI
    Uri,
    /// Prefixed name, not yet expanded
    Curie,
    /// Blank node label
    Blank,
    /// Query variable
    Variable,
}

impl NodeKind {
    /// All kinds, in comparison order
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Literal,
            NodeKind::Uri,
            NodeKind::Curie,
            NodeKind::Blank,
            NodeKind::Variable,
        ]
    }

    /// Stable wire code for serde
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`NodeKind::code`]
    pub fn from_code(code: u8) -> Option<NodeKind> {
        match code {
            0 => Some(NodeKind::Literal),
            1 => Some(NodeKind::Uri),
            2 => Some(NodeKind::Curie),
            3 => Some(NodeKind::Blank),
            4 => Some(NodeKind::Variable),
            _ => None,
        }
    }

    /// Short name of this kind
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Literal => "literal",
            NodeKind::Uri => "uri",
            NodeKind::Curie => "curie",
            NodeKind::Blank => "blank",
            NodeKind::Variable => "variable",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Literal meta node: datatype IRI or language tag, never both
///
/// The mutual exclusion is carried by the type itself. The language tag
/// is stored as an interned literal node holding the tag text.
#[derive(Clone, Debug)]
pub enum LiteralMeta {
    /// Datatype IRI node
    Datatype(Node),
    /// Language tag node
    Language(Node),
}

impl LiteralMeta {
    /// The attached meta node, whichever variant
    pub fn node(&self) -> &Node {
        match self {
            LiteralMeta::Datatype(n) | LiteralMeta::Language(n) => n,
        }
    }

    /// Discriminant rank used by ordering and hashing
    pub(crate) fn rank(&self) -> u8 {
        match self {
            LiteralMeta::Datatype(_) => 0,
            LiteralMeta::Language(_) => 1,
        }
    }
}

impl PartialEq for LiteralMeta {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank() && self.node() == other.node()
    }
}

impl Eq for LiteralMeta {}

impl PartialOrd for LiteralMeta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LiteralMeta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.node().cmp(other.node()))
    }
}

/// Shared node payload
///
/// Owned by the table's pool and by every outstanding [`Node`] handle.
#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) text: Box<str>,
    pub(crate) meta: Option<LiteralMeta>,
}

impl PartialEq for NodeData {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text && self.meta == other.meta
    }
}

impl Eq for NodeData {}

impl Hash for NodeData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_node_content(
            self.kind,
            &self.text,
            self.meta.as_ref().map(|m| (m.rank(), m.node())),
            state,
        );
    }
}

/// Hash a node's content from its parts.
///
/// This is the single definition backing both the pool key hash and the
/// [`NodeSpec`](crate::table::NodeSpec) pre-allocation hash; the two must
/// agree bit-for-bit so a lookup can be resolved before any allocation.
pub(crate) fn hash_node_content<H: Hasher>(
    kind: NodeKind,
    text: &str,
    meta: Option<(u8, &Node)>,
    state: &mut H,
) {
    state.write_u8(kind.code());
    text.hash(state);
    match meta {
        None => state.write_u8(0),
        Some((rank, node)) => {
            state.write_u8(1 + rank);
            node.hash(state);
        }
    }
}

/// Interned term handle
///
/// Cheap to clone; see the module docs for identity semantics.
#[derive(Clone, Debug)]
pub struct Node(pub(crate) Arc<NodeData>);

impl Node {
    /// Term kind
    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    /// Term text (lexical form for literals, IRI string for URIs, label
    /// for blank nodes and variables)
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Literal meta, if any
    pub fn meta(&self) -> Option<&LiteralMeta> {
        self.0.meta.as_ref()
    }

    /// Datatype node of a typed literal
    pub fn datatype(&self) -> Option<&Node> {
        match self.0.meta.as_ref() {
            Some(LiteralMeta::Datatype(n)) => Some(n),
            _ => None,
        }
    }

    /// Language tag node of a tagged literal
    pub fn language(&self) -> Option<&Node> {
        match self.0.meta.as_ref() {
            Some(LiteralMeta::Language(n)) => Some(n),
            _ => None,
        }
    }

    /// True for literal nodes
    pub fn is_literal(&self) -> bool {
        self.0.kind == NodeKind::Literal
    }

    /// True for IRI nodes
    pub fn is_uri(&self) -> bool {
        self.0.kind == NodeKind::Uri
    }

    /// True for blank nodes
    pub fn is_blank(&self) -> bool {
        self.0.kind == NodeKind::Blank
    }

    /// True for variable nodes
    pub fn is_variable(&self) -> bool {
        self.0.kind == NodeKind::Variable
    }

    /// Pointer identity: true iff both handles share one payload
    pub fn same(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Build a detached node outside any table.
    ///
    /// Used by deserialization; detached nodes compare structurally.
    pub(crate) fn detached(kind: NodeKind, text: &str, meta: Option<LiteralMeta>) -> Node {
        Node(Arc::new(NodeData {
            kind,
            text: Box::from(text),
            meta,
        }))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .kind
            .cmp(&other.0.kind)
            .then_with(|| self.0.text.cmp(&other.0.text))
            .then_with(|| cmp_meta(self.0.meta.as_ref(), other.0.meta.as_ref()))
    }
}

fn cmp_meta(a: Option<&LiteralMeta>, b: Option<&LiteralMeta>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(m1), Some(m2)) => m1.cmp(m2),
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind {
            NodeKind::Uri => write!(f, "<{}>", self.text()),
            NodeKind::Curie => write!(f, "{}", self.text()),
            NodeKind::Blank => write!(f, "_:{}", self.text()),
            NodeKind::Variable => write!(f, "?{}", self.text()),
            NodeKind::Literal => match self.0.meta.as_ref() {
                None => write!(f, "\"{}\"", self.text()),
                Some(LiteralMeta::Language(tag)) => {
                    write!(f, "\"{}\"@{}", self.text(), tag.text())
                }
                Some(LiteralMeta::Datatype(dt)) => {
                    write!(f, "\"{}\"^^<{}>", self.text(), dt.text())
                }
            },
        }
    }
}

// === Serde: compact [code, text, meta] tuple ===
//
// Deserialized nodes are detached (not interned anywhere); structural
// equality still holds against table-owned nodes of the same content.

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.kind().code())?;
        tuple.serialize_element(self.text())?;
        let meta = self
            .meta()
            .map(|m| (m.rank(), m.node().clone()));
        tuple.serialize_element(&meta)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (code, text, meta): (u8, String, Option<(u8, Node)>) =
            Deserialize::deserialize(deserializer)?;
        let kind = NodeKind::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("invalid node kind code: {}", code)))?;
        let meta = match meta {
            None => None,
            Some((0, n)) => Some(LiteralMeta::Datatype(n)),
            Some((1, n)) => Some(LiteralMeta::Language(n)),
            Some((rank, _)) => {
                return Err(D::Error::custom(format!("invalid meta rank: {}", rank)))
            }
        };
        Ok(Node::detached(kind, &text, meta))
    }
}
