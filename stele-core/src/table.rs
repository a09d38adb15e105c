//! Node table - reference-counted interning pool
//!
//! The table maps node content to a single canonical [`Node`] instance,
//! so identity (`Node::same`) implies value equality for every handle it
//! hands out.
//!
//! ## Hash-before-allocate
//!
//! Lookups hash a [`NodeSpec`] (borrowed construction parameters) with
//! the pool's own hasher and resolve against stored nodes through the
//! raw-entry API, so a hit allocates nothing. The spec hash and the
//! stored-node hash are both computed by `hash_node_content` and
//! therefore agree bit-for-bit; `tests::test_spec_hash_matches_node_hash`
//! checks the contract over randomized content.
//!
//! ## Reference counts
//!
//! `intern` creates with count 1 or increments; `release` decrements and
//! removes the pool entry at zero. The payload itself is freed when the
//! last outstanding handle drops, so a stale handle can never dangle.

use crate::node::{hash_node_content, LiteralMeta, Node, NodeData, NodeKind};
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;

/// Borrowed literal meta for a [`NodeSpec`]
#[derive(Clone, Copy, Debug)]
pub enum MetaSpec<'a> {
    /// Datatype IRI node (must already be interned)
    Datatype(&'a Node),
    /// Language tag node (must already be interned)
    Language(&'a Node),
}

impl<'a> MetaSpec<'a> {
    fn rank(self) -> u8 {
        match self {
            MetaSpec::Datatype(_) => 0,
            MetaSpec::Language(_) => 1,
        }
    }

    fn node(self) -> &'a Node {
        match self {
            MetaSpec::Datatype(n) | MetaSpec::Language(n) => n,
        }
    }

    fn to_owned_meta(self) -> LiteralMeta {
        match self {
            MetaSpec::Datatype(n) => LiteralMeta::Datatype(n.clone()),
            MetaSpec::Language(n) => LiteralMeta::Language(n.clone()),
        }
    }
}

/// Construction parameters for a node, borrowed from the caller
///
/// A spec hashes and compares exactly like the node it would produce,
/// which lets the table answer lookups without materializing anything.
#[derive(Clone, Copy, Debug)]
pub struct NodeSpec<'a> {
    /// Term kind
    pub kind: NodeKind,
    /// Term text
    pub text: &'a str,
    /// Literal meta, if any
    pub meta: Option<MetaSpec<'a>>,
}

impl<'a> NodeSpec<'a> {
    /// Spec for an IRI node
    pub fn uri(text: &'a str) -> Self {
        NodeSpec {
            kind: NodeKind::Uri,
            text,
            meta: None,
        }
    }

    /// Spec for a prefixed-name node
    pub fn curie(text: &'a str) -> Self {
        NodeSpec {
            kind: NodeKind::Curie,
            text,
            meta: None,
        }
    }

    /// Spec for a plain literal
    pub fn literal(text: &'a str) -> Self {
        NodeSpec {
            kind: NodeKind::Literal,
            text,
            meta: None,
        }
    }

    /// Spec for a typed literal
    pub fn typed_literal(text: &'a str, datatype: &'a Node) -> Self {
        NodeSpec {
            kind: NodeKind::Literal,
            text,
            meta: Some(MetaSpec::Datatype(datatype)),
        }
    }

    /// Spec for a language-tagged literal
    pub fn tagged_literal(text: &'a str, language: &'a Node) -> Self {
        NodeSpec {
            kind: NodeKind::Literal,
            text,
            meta: Some(MetaSpec::Language(language)),
        }
    }

    /// Spec for a blank node
    pub fn blank(text: &'a str) -> Self {
        NodeSpec {
            kind: NodeKind::Blank,
            text,
            meta: None,
        }
    }

    /// Spec for a variable node
    pub fn variable(text: &'a str) -> Self {
        NodeSpec {
            kind: NodeKind::Variable,
            text,
            meta: None,
        }
    }

    /// Spec view of an existing node (for re-interning)
    pub fn of(node: &'a Node) -> Self {
        NodeSpec {
            kind: node.kind(),
            text: node.text(),
            meta: node.meta().map(|m| match m {
                LiteralMeta::Datatype(n) => MetaSpec::Datatype(n),
                LiteralMeta::Language(n) => MetaSpec::Language(n),
            }),
        }
    }

    /// Content comparison against a stored payload
    fn matches(&self, data: &NodeData) -> bool {
        if self.kind != data.kind || *self.text != *data.text {
            return false;
        }
        match (self.meta, data.meta.as_ref()) {
            (None, None) => true,
            (Some(spec), Some(meta)) => spec.rank() == meta.rank() && spec.node() == meta.node(),
            _ => false,
        }
    }

    /// Hash this spec's content; equal to the materialized node's hash
    fn hash_into<H: Hasher>(&self, state: &mut H) {
        hash_node_content(
            self.kind,
            self.text,
            self.meta.map(|m| (m.rank(), m.node())),
            state,
        );
    }
}

/// Interning pool keyed by node content, valued by reference count
#[derive(Debug, Default)]
pub struct NodeTable {
    pool: RwLock<HashMap<Arc<NodeData>, usize>>,
}

impl NodeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        NodeTable {
            pool: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Compute the spec hash using the pool's hasher
    fn hash_spec(pool: &HashMap<Arc<NodeData>, usize>, spec: &NodeSpec) -> u64 {
        let mut hasher = pool.hasher().build_hasher();
        spec.hash_into(&mut hasher);
        hasher.finish()
    }

    /// Add one reference for a node within an already-locked pool,
    /// absorbing the payload if the content is not pooled yet.
    fn bump_locked(pool: &mut HashMap<Arc<NodeData>, usize>, node: &Node) {
        let spec = NodeSpec::of(node);
        let hash = Self::hash_spec(pool, &spec);
        match pool.raw_entry_mut().from_hash(hash, |k| spec.matches(k)) {
            hashbrown::hash_map::RawEntryMut::Occupied(mut e) => {
                *e.get_mut() += 1;
            }
            hashbrown::hash_map::RawEntryMut::Vacant(e) => {
                e.insert_hashed_nocheck(hash, node.0.clone(), 1);
            }
        }
    }

    /// Drop one reference within an already-locked pool; removal at zero
    /// cascades to the node's meta reference.
    fn release_locked(pool: &mut HashMap<Arc<NodeData>, usize>, node: &Node) {
        let spec = NodeSpec::of(node);
        let hash = Self::hash_spec(pool, &spec);
        if let hashbrown::hash_map::RawEntryMut::Occupied(mut e) =
            pool.raw_entry_mut().from_hash(hash, |k| spec.matches(k))
        {
            if *e.get() > 1 {
                *e.get_mut() -= 1;
            } else {
                let (removed, _) = e.remove_entry();
                if let Some(meta) = &removed.meta {
                    Self::release_locked(pool, meta.node());
                }
            }
        }
    }

    /// Intern a node, creating it on first occurrence.
    ///
    /// A hit increments the reference count and returns the canonical
    /// handle without allocating; a miss materializes the node with
    /// count 1. A new literal takes one owned reference to its meta
    /// node, released again when the literal leaves the pool.
    pub fn intern(&self, spec: NodeSpec) -> Node {
        let mut pool = self.pool.write();
        let hash = Self::hash_spec(&pool, &spec);

        let (node, created) = match pool
            .raw_entry_mut()
            .from_hash(hash, |k| spec.matches(k))
        {
            hashbrown::hash_map::RawEntryMut::Occupied(mut e) => {
                *e.get_mut() += 1;
                (Node(e.key().clone()), false)
            }
            hashbrown::hash_map::RawEntryMut::Vacant(e) => {
                let data = Arc::new(NodeData {
                    kind: spec.kind,
                    text: Box::from(spec.text),
                    meta: spec.meta.map(MetaSpec::to_owned_meta),
                });
                e.insert_hashed_nocheck(hash, data.clone(), 1);
                (Node(data), true)
            }
        };

        if created {
            if let Some(meta) = spec.meta {
                Self::bump_locked(&mut pool, meta.node());
            }
        }
        node
    }

    /// Look up the canonical node for a spec without creating it or
    /// touching its reference count.
    pub fn existing(&self, spec: NodeSpec) -> Option<Node> {
        let pool = self.pool.read();
        let hash = Self::hash_spec(&pool, &spec);
        pool.raw_entry()
            .from_hash(hash, |k| spec.matches(k))
            .map(|(k, _)| Node(k.clone()))
    }

    /// Re-intern an existing handle, possibly from another table.
    ///
    /// Returns this table's canonical instance for the node's content
    /// and increments its count; a foreign handle is absorbed as-is on
    /// a miss (no copy of the payload).
    pub fn intern_node(&self, node: &Node) -> Node {
        let mut pool = self.pool.write();
        let spec = NodeSpec::of(node);
        let hash = Self::hash_spec(&pool, &spec);

        let (canonical, created) = match pool
            .raw_entry_mut()
            .from_hash(hash, |k| spec.matches(k))
        {
            hashbrown::hash_map::RawEntryMut::Occupied(mut e) => {
                *e.get_mut() += 1;
                (Node(e.key().clone()), false)
            }
            hashbrown::hash_map::RawEntryMut::Vacant(e) => {
                e.insert_hashed_nocheck(hash, node.0.clone(), 1);
                (node.clone(), true)
            }
        };

        if created {
            if let Some(meta) = canonical.meta() {
                let meta = meta.node().clone();
                Self::bump_locked(&mut pool, &meta);
            }
        }
        canonical
    }

    /// Release one reference; the pool entry is removed at zero, which
    /// in turn releases a literal's reference to its meta node.
    ///
    /// Releasing content this table does not hold is a no-op.
    pub fn release(&self, node: &Node) {
        let mut pool = self.pool.write();
        Self::release_locked(&mut pool, node);
    }

    /// Current reference count for a node's content (0 if absent)
    pub fn refs(&self, node: &Node) -> usize {
        let pool = self.pool.read();
        let spec = NodeSpec::of(node);
        let hash = Self::hash_spec(&pool, &spec);
        pool.raw_entry()
            .from_hash(hash, |k| spec.matches(k))
            .map_or(0, |(_, count)| *count)
    }

    /// Number of distinct nodes in the pool
    pub fn size(&self) -> usize {
        self.pool.read().len()
    }

    /// True if the pool holds no nodes
    pub fn is_empty(&self) -> bool {
        self.pool.read().is_empty()
    }

    /// Drop every pooled node regardless of count
    pub fn clear(&self) {
        self.pool.write().clear();
    }
}
