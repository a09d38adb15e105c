//! Store - arena ownership, index management, and the query surface
//!
//! # Design
//!
//! - **Arena storage**: statements live once in a slotted arena,
//!   referenced by `StatementId` across every index
//! - **Per-order sorted vectors**: each built index is a vector of ids
//!   ordered by that index's comparator; binary search positions both
//!   inserts and range scans
//! - **Version counter**: bumped once per successful insert/erase/clear;
//!   outstanding cursors compare their captured version against it
//!   instead of attempting fine-grained position validation
//!
//! The default index always exists and is the authority for duplicate
//! detection; every other index holds the identical id set in a
//! different order.

use crate::cursor::Cursor;
use crate::error::{Result, StoreError};
use crate::strategy::{select_for, Pattern};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use stele_core::{Caret, IndexOrder, Node, NodeTable, Statement, ORDER_COUNT};

/// Index into the statement arena - u32 limits to ~4B statements
pub type StatementId = u32;

/// Maximum StatementId before overflow
pub const MAX_STATEMENT_ID: u32 = u32::MAX - 1;

/// Source of process-unique store tags for the cursor-mismatch assertion
static NEXT_STORE_TAG: AtomicU64 = AtomicU64::new(1);

/// Behavior flags fixed at store construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreFlags {
    /// Store and index the graph field; when unset the graph is dropped
    /// on insert and identical (s, p, o) across graphs collapse
    pub index_graphs: bool,
    /// Retain caret provenance on stored statements
    pub keep_carets: bool,
}

impl StoreFlags {
    /// Default flags: no graphs, no carets
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable graph storage and indexing
    pub fn with_graphs(mut self) -> Self {
        self.index_graphs = true;
        self
    }

    /// Enable caret retention
    pub fn with_carets(mut self) -> Self {
        self.keep_carets = true;
        self
    }
}

/// Slotted arena owning every stored statement
#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Option<Statement>>,
    free: Vec<StatementId>,
    live: usize,
}

impl Arena {
    fn is_full(&self) -> bool {
        self.free.is_empty() && self.slots.len() > MAX_STATEMENT_ID as usize
    }

    fn alloc(&mut self, st: Statement) -> StatementId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(st);
                id
            }
            None => {
                self.slots.push(Some(st));
                (self.slots.len() - 1) as StatementId
            }
        }
    }

    fn get(&self, id: StatementId) -> Option<&Statement> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Fetch a statement an index vector points at.
    fn get_live(&self, id: StatementId) -> &Statement {
        self.slots[id as usize]
            .as_ref()
            .expect("index vectors only hold live ids")
    }

    fn remove(&mut self, id: StatementId) -> Option<Statement> {
        let st = self.slots.get_mut(id as usize).and_then(Option::take);
        if st.is_some() {
            self.free.push(id);
            self.live -= 1;
        }
        st
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    fn len(&self) -> usize {
        self.live
    }
}

/// Release one table reference for every node a statement holds.
fn release_statement_nodes(nodes: &NodeTable, st: &Statement) {
    nodes.release(st.subject());
    nodes.release(st.predicate());
    nodes.release(st.object());
    if let Some(g) = st.graph() {
        nodes.release(g);
    }
    if let Some(caret) = st.caret() {
        nodes.release(caret.document());
    }
}

/// Lower bound of `st` in a sorted id vector under `order`.
fn lower_bound(
    vec: &[StatementId],
    arena: &Arena,
    order: IndexOrder,
    st: &Statement,
) -> usize {
    vec.partition_point(|&id| order.compare(arena.get_live(id), st) == Ordering::Less)
}

/// In-memory multi-index statement store
///
/// Single-writer: mutation (`insert`/`erase`/`add_index`/`drop_index`/
/// `clear`) needs `&mut self`; queries and cursor traversal need `&self`.
/// Mutating while cursors are outstanding is allowed and invalidates
/// every cursor except the one performing an erase.
pub struct Store {
    nodes: NodeTable,
    arena: Arena,
    indices: [Option<Vec<StatementId>>; ORDER_COUNT],
    default_order: IndexOrder,
    flags: StoreFlags,
    version: u64,
    tag: u64,
}

impl Store {
    /// Create a store with exactly the default index built.
    ///
    /// A graph-qualified default order without `index_graphs` normalizes
    /// to its triple counterpart; the graph slot is dropped on insert in
    /// that configuration, so the two comparators coincide.
    pub fn new(default_order: IndexOrder, flags: StoreFlags) -> Self {
        let default_order = if flags.index_graphs {
            default_order
        } else {
            default_order.without_graph()
        };

        let mut indices: [Option<Vec<StatementId>>; ORDER_COUNT] = Default::default();
        indices[default_order.index()] = Some(Vec::new());

        Store {
            nodes: NodeTable::new(),
            arena: Arena::default(),
            indices,
            default_order,
            flags,
            version: 0,
            tag: NEXT_STORE_TAG.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// The node interning table
    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    /// The order of the default (owning) index
    pub fn default_order(&self) -> IndexOrder {
        self.default_order
    }

    /// Behavior flags fixed at construction
    pub fn flags(&self) -> StoreFlags {
        self.flags
    }

    /// Number of stored statements
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    /// True if no statements are stored
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Current version stamp; bumped on every successful mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True if an index of this order is currently built
    pub fn has_index(&self, order: IndexOrder) -> bool {
        self.indices[order.index()].is_some()
    }

    pub(crate) fn tag(&self) -> u64 {
        self.tag
    }

    pub(crate) fn index_slice(&self, order: IndexOrder) -> &[StatementId] {
        match &self.indices[order.index()] {
            Some(vec) => vec,
            None => &[],
        }
    }

    pub(crate) fn statement_at(&self, order: IndexOrder, pos: usize) -> Option<&Statement> {
        self.index_slice(order)
            .get(pos)
            .and_then(|&id| self.arena.get(id))
    }

    pub(crate) fn statement_by_id(&self, id: StatementId) -> Option<&Statement> {
        self.arena.get(id)
    }

    // === Index management ===

    /// Build an additional index of the given order.
    ///
    /// The new index is populated from the default index; `size()` is
    /// unaffected and outstanding cursors stay valid.
    pub fn add_index(&mut self, order: IndexOrder) -> Result<()> {
        if order.is_graph_order() && !self.flags.index_graphs {
            return Err(StoreError::GraphsNotIndexed(order));
        }
        if self.has_index(order) {
            return Err(StoreError::IndexExists(order));
        }

        let span = tracing::debug_span!(
            "add_index",
            order = %order,
            statements = self.arena.len()
        );
        let _guard = span.enter();

        let mut vec = self.index_slice(self.default_order).to_vec();
        let arena = &self.arena;
        vec.sort_unstable_by(|&a, &b| order.compare(arena.get_live(a), arena.get_live(b)));
        self.indices[order.index()] = Some(vec);
        Ok(())
    }

    /// Drop a non-default index.
    ///
    /// Statement memory is untouched; only the order's id vector is
    /// freed. Cursors bound to the dropped order must be drained first
    /// (contract violation otherwise).
    pub fn drop_index(&mut self, order: IndexOrder) -> Result<()> {
        if order == self.default_order {
            return Err(StoreError::DefaultIndex(order));
        }
        if !self.has_index(order) {
            return Err(StoreError::NoSuchIndex(order));
        }
        self.indices[order.index()] = None;
        Ok(())
    }

    // === Mutation ===

    /// Insert a statement, placing it into every built index.
    ///
    /// All four nodes are re-interned into this store's table. A
    /// duplicate in the default index fails the whole operation and
    /// rolls the reference counts back; the version is bumped exactly
    /// once on success.
    pub fn insert(
        &mut self,
        s: Node,
        p: Node,
        o: Node,
        g: Option<Node>,
        caret: Option<Caret>,
    ) -> Result<()> {
        let g = if self.flags.index_graphs { g } else { None };
        let caret = if self.flags.keep_carets { caret } else { None };
        Statement::check(&s, &p, &o, g.as_ref())?;
        if self.arena.is_full() {
            return Err(StoreError::CapacityExceeded("statement id space exhausted"));
        }

        let s = self.nodes.intern_node(&s);
        let p = self.nodes.intern_node(&p);
        let o = self.nodes.intern_node(&o);
        let g = g.map(|n| self.nodes.intern_node(&n));
        let caret = caret.map(|c| {
            Caret::new(self.nodes.intern_node(c.document()), c.line(), c.column())
        });

        let mut st = Statement::new(s, p, o, g)?;
        if let Some(c) = caret {
            st = st.with_caret(c);
        }

        {
            let arena = &self.arena;
            let default_vec = self.indices[self.default_order.index()]
                .as_ref()
                .expect("default index always built");
            let pos = lower_bound(default_vec, arena, self.default_order, &st);
            let duplicate = default_vec
                .get(pos)
                .map_or(false, |&id| {
                    self.default_order.compare(arena.get_live(id), &st) == Ordering::Equal
                });
            if duplicate {
                release_statement_nodes(&self.nodes, &st);
                return Err(StoreError::Duplicate);
            }
        }

        let id = self.arena.alloc(st);
        let arena = &self.arena;
        let new = arena.get_live(id);
        for slot in 0..ORDER_COUNT {
            let order = match IndexOrder::from_index(slot) {
                Some(order) => order,
                None => continue,
            };
            if let Some(vec) = self.indices[slot].as_mut() {
                let pos = lower_bound(vec, arena, order, new);
                vec.insert(pos, id);
            }
        }

        self.version += 1;
        Ok(())
    }

    /// Erase the statement a cursor points at.
    ///
    /// The statement leaves every index, its node references are
    /// released, and the version bumps, invalidating every cursor
    /// except `cursor`, which is re-synchronized and repositioned at its
    /// logical successor.
    pub fn erase(&mut self, cursor: &mut Cursor) -> Result<()> {
        debug_assert_eq!(cursor.store_tag(), self.tag, "cursor used against a different store");
        if cursor.version() != self.version {
            return Err(StoreError::StaleCursor {
                cursor: cursor.version(),
                store: self.version,
            });
        }
        let id = match cursor.current_id(self) {
            Some(id) => id,
            None => return Err(StoreError::CursorAtEnd),
        };

        {
            let arena = &self.arena;
            let st = arena.get_live(id);
            for slot in 0..ORDER_COUNT {
                let order = match IndexOrder::from_index(slot) {
                    Some(order) => order,
                    None => continue,
                };
                if let Some(vec) = self.indices[slot].as_mut() {
                    let pos = lower_bound(vec, arena, order, st);
                    debug_assert_eq!(vec.get(pos), Some(&id), "indexes out of sync");
                    vec.remove(pos);
                }
            }
        }

        if let Some(st) = self.arena.remove(id) {
            release_statement_nodes(&self.nodes, &st);
        }
        self.version += 1;
        cursor.resync(self);
        Ok(())
    }

    /// Remove every statement, releasing each node reference exactly
    /// once per statement. Built indices stay built (empty).
    pub fn clear(&mut self) {
        for slot in &self.arena.slots {
            if let Some(st) = slot {
                release_statement_nodes(&self.nodes, st);
            }
        }
        self.arena.reset();
        for vec in self.indices.iter_mut().flatten() {
            vec.clear();
        }
        self.version += 1;
    }

    // === Query surface ===

    /// Find statements matching a pattern; `None` fields are wildcards.
    ///
    /// Returns a cursor positioned at the first match, or the end cursor
    /// when nothing matches. When the store does not index graphs, a
    /// bound graph is ignored (the stored graph slot was dropped on
    /// insert).
    pub fn find(
        &self,
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> Cursor {
        let g = if self.flags.index_graphs { g } else { None };
        let pattern = Pattern::new(s, p, o, g);
        let strategy = select_for(&pattern, self);
        Cursor::first_match(self, pattern, strategy)
    }

    /// True if at least one statement matches the pattern
    pub fn ask(
        &self,
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> bool {
        !self.find(s, p, o, g).is_end()
    }

    /// Number of statements matching the pattern
    pub fn count(
        &self,
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> usize {
        let mut cursor = self.find(s, p, o, g);
        let mut n = 0;
        while !cursor.is_end() {
            n += 1;
            if cursor.advance(self).is_err() {
                break;
            }
        }
        n
    }

    /// Fetch the single unbound field of the first match.
    ///
    /// Exactly one of `s`/`p`/`o` must be a wildcard; the matching
    /// statement's node in that slot is returned.
    pub fn get_node(
        &self,
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> Option<Node> {
        let wildcards =
            s.is_none() as usize + p.is_none() as usize + o.is_none() as usize;
        debug_assert_eq!(wildcards, 1, "get_node needs exactly one s/p/o wildcard");
        if wildcards != 1 {
            return None;
        }

        let cursor = self.find(s, p, o, g);
        let st = cursor.get(self)?;
        if s.is_none() {
            Some(st.subject().clone())
        } else if p.is_none() {
            Some(st.predicate().clone())
        } else {
            Some(st.object().clone())
        }
    }

    /// Cursor over every statement in default order
    pub fn begin(&self) -> Cursor {
        self.find(None, None, None, None)
    }

    /// Cursor over every statement in an explicitly chosen order.
    ///
    /// Unlike `find`, which degrades to whatever is built, enumeration
    /// through a named order requires that order's index to exist.
    pub fn begin_ordered(&self, order: IndexOrder) -> Result<Cursor> {
        if !self.has_index(order) {
            return Err(StoreError::NoSuchIndex(order));
        }
        let pattern = Pattern::default();
        let strategy = crate::strategy::Strategy {
            mode: crate::strategy::ScanMode::Full,
            order,
            prefix_len: 0,
        };
        Ok(Cursor::first_match(self, pattern, strategy))
    }

    /// The shared terminal cursor; stable across calls
    pub fn end(&self) -> Cursor {
        Cursor::end_of(self)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("statements", &self.arena.len())
            .field("nodes", &self.nodes.size())
            .field(
                "indices",
                &IndexOrder::all()
                    .iter()
                    .filter(|o| self.has_index(**o))
                    .map(|o| o.name())
                    .collect::<Vec<_>>(),
            )
            .field("default_order", &self.default_order)
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_core::NodeSpec;

    fn uri(store: &Store, text: &str) -> Node {
        store.nodes().intern(NodeSpec::uri(text))
    }

    fn insert_spo(store: &mut Store, s: u32, p: u32, o: u32) {
        let s = uri(store, &format!("http://example.org/s{}", s));
        let p = uri(store, &format!("http://example.org/p{}", p));
        let o = uri(store, &format!("http://example.org/o{}", o));
        store.insert(s, p, o, None, None).unwrap();
    }

    #[test]
    fn test_new_store() {
        let store = Store::new(IndexOrder::Spo, StoreFlags::new());

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.version(), 0);
        assert_eq!(store.default_order(), IndexOrder::Spo);
        assert!(store.has_index(IndexOrder::Spo));
        assert!(!store.has_index(IndexOrder::Pso));
    }

    #[test]
    fn test_graph_default_normalizes_without_flag() {
        let store = Store::new(IndexOrder::Gspo, StoreFlags::new());
        assert_eq!(store.default_order(), IndexOrder::Spo);

        let graphed = Store::new(IndexOrder::Gspo, StoreFlags::new().with_graphs());
        assert_eq!(graphed.default_order(), IndexOrder::Gspo);
    }

    #[test]
    fn test_insert_bumps_version_once() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

        insert_spo(&mut store, 1, 1, 1);
        assert_eq!(store.version(), 1);
        assert_eq!(store.size(), 1);

        insert_spo(&mut store, 1, 1, 2);
        assert_eq!(store.version(), 2);
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_duplicate_rejected_and_counts_rolled_back(){
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

        let s = uri(&store, "http://example.org/s");
        let p = uri(&store, "http://example.org/p");
        let o = uri(&store, "http://example.org/o");

        store
            .insert(s.clone(), p.clone(), o.clone(), None, None)
            .unwrap();
        let refs_after_insert = store.nodes().refs(&s);
        let version = store.version();

        let err = store
            .insert(s.clone(), p.clone(), o.clone(), None, None)
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate);
        assert_eq!(store.size(), 1);
        assert_eq!(store.version(), version);
        assert_eq!(store.nodes().refs(&s), refs_after_insert);
    }

    #[test]
    fn test_graph_dropped_when_not_indexed() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());

        let s = uri(&store, "http://example.org/s");
        let p = uri(&store, "http://example.org/p");
        let o = uri(&store, "http://example.org/o");
        let g1 = uri(&store, "http://example.org/g1");
        let g2 = uri(&store, "http://example.org/g2");

        store
            .insert(s.clone(), p.clone(), o.clone(), Some(g1.clone()), None)
            .unwrap();

        // Same triple under a different graph collapses into the stored
        // record: reported as a duplicate, size unchanged.
        let err = store
            .insert(s.clone(), p.clone(), o.clone(), Some(g2.clone()), None)
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate);
        assert_eq!(store.size(), 1);

        // The stored statement has no graph slot at all
        let cursor = store.begin();
        assert!(cursor.get(&store).unwrap().graph().is_none());

        // Round-trip still holds with the graph bound
        assert!(store.ask(Some(&s), Some(&p), Some(&o), Some(&g2)));
    }

    #[test]
    fn test_graphs_coexist_when_indexed() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new().with_graphs());

        let s = uri(&store, "http://example.org/s");
        let p = uri(&store, "http://example.org/p");
        let o = uri(&store, "http://example.org/o");
        let g1 = uri(&store, "http://example.org/g1");
        let g2 = uri(&store, "http://example.org/g2");

        store
            .insert(s.clone(), p.clone(), o.clone(), Some(g1.clone()), None)
            .unwrap();
        store
            .insert(s.clone(), p.clone(), o.clone(), Some(g2.clone()), None)
            .unwrap();

        assert_eq!(store.size(), 2);
        assert_eq!(store.count(Some(&s), None, None, None), 2);
        assert_eq!(store.count(None, None, None, Some(&g1)), 1);
    }

    #[test]
    fn test_add_drop_index() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        insert_spo(&mut store, 3, 1, 1);
        insert_spo(&mut store, 1, 2, 2);
        insert_spo(&mut store, 2, 3, 3);

        let size = store.size();
        store.add_index(IndexOrder::Pso).unwrap();
        assert_eq!(store.size(), size);
        assert!(store.has_index(IndexOrder::Pso));

        // Populated in PSO order
        let mut cursor = store.begin_ordered(IndexOrder::Pso).unwrap();
        let mut predicates = Vec::new();
        while let Some(st) = cursor.get(&store) {
            predicates.push(st.predicate().text().to_string());
            if cursor.advance(&store).is_err() {
                break;
            }
        }
        assert_eq!(
            predicates,
            vec![
                "http://example.org/p1",
                "http://example.org/p2",
                "http://example.org/p3"
            ]
        );

        assert_eq!(
            store.add_index(IndexOrder::Pso).unwrap_err(),
            StoreError::IndexExists(IndexOrder::Pso)
        );

        store.drop_index(IndexOrder::Pso).unwrap();
        assert_eq!(store.size(), size);
        assert_eq!(
            store.drop_index(IndexOrder::Pso).unwrap_err(),
            StoreError::NoSuchIndex(IndexOrder::Pso)
        );
        assert_eq!(
            store.drop_index(IndexOrder::Spo).unwrap_err(),
            StoreError::DefaultIndex(IndexOrder::Spo)
        );
    }

    #[test]
    fn test_graph_index_requires_flag() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        assert_eq!(
            store.add_index(IndexOrder::Gspo).unwrap_err(),
            StoreError::GraphsNotIndexed(IndexOrder::Gspo)
        );
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        store.add_index(IndexOrder::Pos).unwrap();

        let s = uri(&store, "http://example.org/s");
        let p = uri(&store, "http://example.org/p");
        let o = uri(&store, "http://example.org/o");
        store
            .insert(s.clone(), p.clone(), o.clone(), None, None)
            .unwrap();

        // One external handle + one statement reference each
        assert_eq!(store.nodes().refs(&s), 2);

        let version = store.version();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.version(), version + 1);
        assert_eq!(store.nodes().refs(&s), 1);
        assert!(store.has_index(IndexOrder::Pos));
        assert!(!store.ask(Some(&s), None, None, None));
    }

    #[test]
    fn test_caret_flag() {
        let mut kept = Store::new(IndexOrder::Spo, StoreFlags::new().with_carets());
        let s = uri(&kept, "http://example.org/s");
        let p = uri(&kept, "http://example.org/p");
        let o = uri(&kept, "http://example.org/o");
        let doc = uri(&kept, "file:///data.ttl");

        kept.insert(
            s.clone(),
            p.clone(),
            o.clone(),
            None,
            Some(Caret::new(doc.clone(), 4, 7)),
        )
        .unwrap();
        let cursor = kept.begin();
        let caret = cursor.get(&kept).unwrap().caret().unwrap().clone();
        assert_eq!(caret.line(), 4);

        let mut dropped = Store::new(IndexOrder::Spo, StoreFlags::new());
        let s = uri(&dropped, "http://example.org/s");
        let p = uri(&dropped, "http://example.org/p");
        let o = uri(&dropped, "http://example.org/o");
        let doc = uri(&dropped, "file:///data.ttl");
        dropped
            .insert(s, p, o, None, Some(Caret::new(doc.clone(), 4, 7)))
            .unwrap();
        let cursor = dropped.begin();
        assert!(cursor.get(&dropped).unwrap().caret().is_none());
        // The caret document was never retained
        assert_eq!(dropped.nodes().refs(&doc), 1);
    }

    #[test]
    fn test_get_node() {
        let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
        let s = uri(&store, "http://example.org/s");
        let p = uri(&store, "http://example.org/p");
        let o = uri(&store, "http://example.org/o");
        store
            .insert(s.clone(), p.clone(), o.clone(), None, None)
            .unwrap();

        let got = store.get_node(Some(&s), Some(&p), None, None).unwrap();
        assert!(got.same(&o));

        let got = store.get_node(None, Some(&p), Some(&o), None).unwrap();
        assert!(got.same(&s));

        let missing = uri(&store, "http://example.org/missing");
        assert!(store.get_node(Some(&missing), Some(&p), None, None).is_none());
    }

    #[test]
    fn test_begin_ordered_requires_index() {
        let store = Store::new(IndexOrder::Spo, StoreFlags::new());
        assert_eq!(
            store.begin_ordered(IndexOrder::Ops).unwrap_err(),
            StoreError::NoSuchIndex(IndexOrder::Ops)
        );
    }
}
