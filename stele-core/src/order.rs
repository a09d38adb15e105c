//! Index orders and their comparators
//!
//! An index order is one of twelve field permutations over a statement:
//!
//! | Orders | Leading field | Use case |
//! |--------|---------------|----------|
//! | SPO, SOP | subject | subject lookups |
//! | PSO, POS | predicate | predicate joins, value lookups |
//! | OPS, OSP | object | reverse traversal |
//! | GSPO .. GPOS | graph | the same six, scoped to a graph |
//!
//! Triple orders still compare the graph slot as a final tie-break (an
//! absent graph sorts first), so statements that differ only by graph
//! coexist in every index when the store keeps graphs at all.
//!
//! Graph-qualified orders sit at a fixed offset of six above their triple
//! counterparts; `with_graph`/`without_graph` convert between the halves.

use crate::node::Node;
use crate::statement::Statement;
use std::cmp::Ordering;
use std::fmt;

/// Statement field, in pattern position order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Subject slot
    Subject,
    /// Predicate slot
    Predicate,
    /// Object slot
    Object,
    /// Graph slot
    Graph,
}

/// Offset between a triple order and its graph-qualified counterpart
pub const GRAPH_ORDER_OFFSET: usize = 6;

/// Number of index orders
pub const ORDER_COUNT: usize = 12;

/// Index order enumeration
///
/// Closed set of twelve; the strategy selector's tier tables depend on
/// the discriminants being contiguous with the graph half at +6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexOrder {
    /// Subject, predicate, object
    Spo,
    /// Subject, object, predicate
    Sop,
    /// Object, predicate, subject
    Ops,
    /// Object, subject, predicate
    Osp,
    /// Predicate, subject, object
    Pso,
    /// Predicate, object, subject
    Pos,
    /// Graph, subject, predicate, object
    Gspo,
    /// Graph, subject, object, predicate
    Gsop,
    /// Graph, object, predicate, subject
    Gops,
    /// Graph, object, subject, predicate
    Gosp,
    /// Graph, predicate, subject, object
    Gpso,
    /// Graph, predicate, object, subject
    Gpos,
}

/// Field permutation per order; triple orders keep the graph last.
const ORDER_FIELDS: [[Field; 4]; ORDER_COUNT] = {
    use Field::{Graph as G, Object as O, Predicate as P, Subject as S};
    [
        [S, P, O, G],
        [S, O, P, G],
        [O, P, S, G],
        [O, S, P, G],
        [P, S, O, G],
        [P, O, S, G],
        [G, S, P, O],
        [G, S, O, P],
        [G, O, P, S],
        [G, O, S, P],
        [G, P, S, O],
        [G, P, O, S],
    ]
};

const ORDER_NAMES: [&str; ORDER_COUNT] = [
    "spo", "sop", "ops", "osp", "pso", "pos", "gspo", "gsop", "gops", "gosp", "gpso", "gpos",
];

const ALL_ORDERS: [IndexOrder; ORDER_COUNT] = [
    IndexOrder::Spo,
    IndexOrder::Sop,
    IndexOrder::Ops,
    IndexOrder::Osp,
    IndexOrder::Pso,
    IndexOrder::Pos,
    IndexOrder::Gspo,
    IndexOrder::Gsop,
    IndexOrder::Gops,
    IndexOrder::Gosp,
    IndexOrder::Gpso,
    IndexOrder::Gpos,
];

impl IndexOrder {
    /// All twelve orders
    pub fn all() -> &'static [IndexOrder; ORDER_COUNT] {
        &ALL_ORDERS
    }

    /// Slot of this order in per-store index arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`IndexOrder::index`]
    pub fn from_index(index: usize) -> Option<IndexOrder> {
        ALL_ORDERS.get(index).copied()
    }

    /// The field permutation this order compares by
    pub fn fields(self) -> &'static [Field; 4] {
        &ORDER_FIELDS[self as usize]
    }

    /// True for the graph-leading half
    pub fn is_graph_order(self) -> bool {
        (self as usize) >= GRAPH_ORDER_OFFSET
    }

    /// Graph-qualified counterpart of this order
    pub fn with_graph(self) -> IndexOrder {
        ALL_ORDERS[self as usize % GRAPH_ORDER_OFFSET + GRAPH_ORDER_OFFSET]
    }

    /// Triple-only counterpart of this order
    pub fn without_graph(self) -> IndexOrder {
        ALL_ORDERS[self as usize % GRAPH_ORDER_OFFSET]
    }

    /// Short name of this order
    pub fn name(self) -> &'static str {
        ORDER_NAMES[self as usize]
    }

    /// Compare two statements under this order's permutation.
    ///
    /// Every field participates, so `Equal` implies the two statements
    /// have identical (s, p, o, g) content.
    pub fn compare(self, a: &Statement, b: &Statement) -> Ordering {
        let fields = self.fields();
        cmp_field(a, b, fields[0])
            .then_with(|| cmp_field(a, b, fields[1]))
            .then_with(|| cmp_field(a, b, fields[2]))
            .then_with(|| cmp_field(a, b, fields[3]))
    }
}

/// Compare one field slot of two statements; absent graphs sort first.
fn cmp_field(a: &Statement, b: &Statement, field: Field) -> Ordering {
    cmp_optional(a.field(field), b.field(field))
}

/// Compare optional nodes with `None` ordered before any node.
pub fn cmp_optional(a: Option<&Node>, b: Option<&Node>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(n1), Some(n2)) => n1.cmp(n2),
    }
}

impl fmt::Display for IndexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for IndexOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ORDER_NAMES
            .iter()
            .position(|name| *name == lower)
            .and_then(IndexOrder::from_index)
            .ok_or_else(|| format!("Unknown index order: {}", s))
    }
}
