//! Query strategy selection
//!
//! Given a pattern (each field bound or wildcard) and the set of indices
//! currently built, pick the least-cost scan:
//!
//! 1. A perfect-prefix range scan on a preferred order ({SPO, SOP, OPS,
//!    PSO}), then on an alternate order ({OSP, POS}).
//! 2. A partial-prefix range scan with residual filtering, preferred
//!    orders before alternates.
//! 3. If the graph is bound and the graph-qualified version of a chosen
//!    order is built, it is preferred and extends the prefix by one.
//! 4. A graph-only range scan within any built graph-leading index.
//! 5. A full linear scan of the default index with filtering. This is
//!    O(n) and emits a `tracing::warn!` diagnostic when the pattern is
//!    non-empty.
//!
//! The tiers are table lookups keyed by the 3-bit bound-field signature;
//! ties favor indices that already exist over hypothetically better ones.

use crate::store::Store;
use std::cmp::Ordering;
use std::fmt;
use stele_core::{cmp_optional, Field, IndexOrder, Node, Statement};

/// A query pattern: bound nodes and wildcards over the four fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    s: Option<Node>,
    p: Option<Node>,
    o: Option<Node>,
    g: Option<Node>,
}

impl Pattern {
    /// Build a pattern from optional bound nodes
    pub fn new(
        s: Option<&Node>,
        p: Option<&Node>,
        o: Option<&Node>,
        g: Option<&Node>,
    ) -> Pattern {
        Pattern {
            s: s.cloned(),
            p: p.cloned(),
            o: o.cloned(),
            g: g.cloned(),
        }
    }

    /// Bound subject
    pub fn subject(&self) -> Option<&Node> {
        self.s.as_ref()
    }

    /// Bound predicate
    pub fn predicate(&self) -> Option<&Node> {
        self.p.as_ref()
    }

    /// Bound object
    pub fn object(&self) -> Option<&Node> {
        self.o.as_ref()
    }

    /// Bound graph
    pub fn graph(&self) -> Option<&Node> {
        self.g.as_ref()
    }

    /// Bound node for a field slot
    pub fn field(&self, field: Field) -> Option<&Node> {
        match field {
            Field::Subject => self.s.as_ref(),
            Field::Predicate => self.p.as_ref(),
            Field::Object => self.o.as_ref(),
            Field::Graph => self.g.as_ref(),
        }
    }

    /// 3-bit signature over bound s/p/o (s = 4, p = 2, o = 1)
    pub fn signature(&self) -> usize {
        (self.s.is_some() as usize) << 2
            | (self.p.is_some() as usize) << 1
            | (self.o.is_some() as usize)
    }

    /// True when every field is a wildcard
    pub fn is_unconstrained(&self) -> bool {
        self.signature() == 0 && self.g.is_none()
    }

    /// Full pattern match against a statement
    pub fn matches(&self, st: &Statement) -> bool {
        st.matches(
            self.s.as_ref(),
            self.p.as_ref(),
            self.o.as_ref(),
            self.g.as_ref(),
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot(f: &mut fmt::Formatter<'_>, n: Option<&Node>) -> fmt::Result {
            match n {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "?"),
            }
        }
        write!(f, "(")?;
        slot(f, self.s.as_ref())?;
        write!(f, " ")?;
        slot(f, self.p.as_ref())?;
        write!(f, " ")?;
        slot(f, self.o.as_ref())?;
        write!(f, " ")?;
        slot(f, self.g.as_ref())?;
        write!(f, ")")
    }
}

/// How a cursor walks its index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    /// Visit every record; the pattern is unconstrained
    Full,
    /// Bounded range; the prefix covers every bound field
    Range,
    /// Bounded range plus residual filtering of the remaining bound fields
    RangeFiltered,
    /// Visit every record, filtering against the whole pattern
    FullFiltered,
}

impl ScanMode {
    /// True for the two range-bounded modes
    pub fn is_range(self) -> bool {
        matches!(self, ScanMode::Range | ScanMode::RangeFiltered)
    }
}

/// The resolved plan for one query: scan mode, index order, prefix length
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    /// Scan mode
    pub mode: ScanMode,
    /// Index the cursor is bound to
    pub order: IndexOrder,
    /// How many leading ordering fields are exactly bound
    pub prefix_len: usize,
}

/// One strategy candidate: an order and the prefix it can serve
struct Candidate {
    order: IndexOrder,
    prefix: usize,
}

const fn cand(order: IndexOrder, prefix: usize) -> Candidate {
    Candidate { order, prefix }
}

/// Candidate orders per bound-field signature, best first.
///
/// Perfect-prefix candidates precede partial-prefix ones; within a tier,
/// preferred orders ({SPO, SOP, OPS, PSO}) precede alternates
/// ({OSP, POS}).
static CANDIDATES: [&[Candidate]; 8] = [
    // ---
    &[],
    // o
    &[cand(IndexOrder::Ops, 1), cand(IndexOrder::Osp, 1)],
    // p
    &[cand(IndexOrder::Pso, 1), cand(IndexOrder::Pos, 1)],
    // p, o
    &[
        cand(IndexOrder::Ops, 2),
        cand(IndexOrder::Pos, 2),
        cand(IndexOrder::Pso, 1),
        cand(IndexOrder::Osp, 1),
    ],
    // s
    &[cand(IndexOrder::Spo, 1), cand(IndexOrder::Sop, 1)],
    // s, o
    &[
        cand(IndexOrder::Sop, 2),
        cand(IndexOrder::Osp, 2),
        cand(IndexOrder::Spo, 1),
        cand(IndexOrder::Ops, 1),
    ],
    // s, p
    &[
        cand(IndexOrder::Spo, 2),
        cand(IndexOrder::Pso, 2),
        cand(IndexOrder::Sop, 1),
        cand(IndexOrder::Pos, 1),
    ],
    // s, p, o
    &[
        cand(IndexOrder::Spo, 3),
        cand(IndexOrder::Sop, 3),
        cand(IndexOrder::Ops, 3),
        cand(IndexOrder::Pso, 3),
        cand(IndexOrder::Osp, 3),
        cand(IndexOrder::Pos, 3),
    ],
];

/// Select the least-cost strategy for a pattern.
///
/// `is_built` reports which orders currently have an index.
pub(crate) fn select<F>(
    pattern: &Pattern,
    is_built: F,
    default_order: IndexOrder,
    graphs_indexed: bool,
) -> Strategy
where
    F: Fn(IndexOrder) -> bool,
{
    let sig = pattern.signature();
    let bound = sig.count_ones() as usize;
    let g_bound = pattern.graph().is_some();

    for candidate in CANDIDATES[sig] {
        if g_bound && graphs_indexed {
            let order = candidate.order.with_graph();
            if is_built(order) {
                let mode = if bound > candidate.prefix {
                    ScanMode::RangeFiltered
                } else {
                    ScanMode::Range
                };
                return Strategy {
                    mode,
                    order,
                    prefix_len: candidate.prefix + 1,
                };
            }
        }
        if is_built(candidate.order) {
            let mode = if bound > candidate.prefix || g_bound {
                ScanMode::RangeFiltered
            } else {
                ScanMode::Range
            };
            return Strategy {
                mode,
                order: candidate.order,
                prefix_len: candidate.prefix,
            };
        }
    }

    // No triple-field index helps; a graph-leading index can still bound
    // the scan to one graph.
    if g_bound && graphs_indexed {
        let graph_order = IndexOrder::all()
            .iter()
            .copied()
            .filter(|o| o.is_graph_order())
            .find(|o| is_built(*o));
        if let Some(order) = graph_order {
            let mode = if bound > 0 {
                ScanMode::RangeFiltered
            } else {
                ScanMode::Range
            };
            return Strategy {
                mode,
                order,
                prefix_len: 1,
            };
        }
    }

    if bound == 0 && !g_bound {
        Strategy {
            mode: ScanMode::Full,
            order: default_order,
            prefix_len: 0,
        }
    } else {
        tracing::warn!(
            pattern = %pattern,
            order = %default_order,
            "no usable index for pattern, falling back to linear scan"
        );
        Strategy {
            mode: ScanMode::FullFiltered,
            order: default_order,
            prefix_len: 0,
        }
    }
}

/// Resolve a strategy against a live store.
pub(crate) fn select_for(pattern: &Pattern, store: &Store) -> Strategy {
    select(
        pattern,
        |order| store.has_index(order),
        store.default_order(),
        store.flags().index_graphs,
    )
}

/// Compare a statement's leading ordering fields against the pattern
/// prefix. `Equal` means the statement lies inside the bounded range.
pub(crate) fn prefix_cmp(
    st: &Statement,
    pattern: &Pattern,
    order: IndexOrder,
    prefix_len: usize,
) -> Ordering {
    for field in &order.fields()[..prefix_len] {
        let bound = match pattern.field(*field) {
            Some(n) => n,
            None => continue,
        };
        let ord = cmp_optional(st.field(*field), Some(bound));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
