//! # Stele Store
//!
//! In-memory multi-index statement store.
//!
//! This crate provides:
//! - [`Store`]: arena-owned statements under up to twelve simultaneous
//!   sort orders, with insert/erase/clear and index management
//! - [`Strategy`] selection: the tiered, table-driven choice of the
//!   cheapest scan for an arbitrary pattern
//! - [`Cursor`]: version-stamped iteration that rejects use after any
//!   invalidating mutation
//! - [`StatementSink`]: the push boundary consumed from streaming
//!   producers
//!
//! ## Design Principles
//!
//! 1. **Single writer**: mutation takes `&mut Store`; queries and
//!    cursors take `&Store`. No locking, no async.
//! 2. **One owner**: the arena owns statement memory; every index holds
//!    ids, and the default index is the authority for duplicates.
//! 3. **Cheap invalidation**: one version counter on the store, one
//!    captured stamp per cursor, compared on every operation.
//!
//! ## Example
//!
//! ```
//! use stele_core::{IndexOrder, NodeSpec};
//! use stele_store::{Store, StoreFlags};
//!
//! let mut store = Store::new(IndexOrder::Spo, StoreFlags::new());
//! let s = store.nodes().intern(NodeSpec::uri("http://example.org/a"));
//! let p = store.nodes().intern(NodeSpec::uri("http://example.org/b"));
//! let o = store.nodes().intern(NodeSpec::literal("c"));
//! store.insert(s.clone(), p, o, None, None)?;
//!
//! let mut cursor = store.find(Some(&s), None, None, None);
//! assert!(cursor.get(&store).is_some());
//! cursor.advance(&store)?;
//! assert!(cursor.is_end());
//! # Ok::<(), stele_store::StoreError>(())
//! ```

pub mod cursor;
pub mod error;
pub mod ingest;
pub mod store;
pub mod strategy;

pub use cursor::Cursor;
pub use error::{Result, StoreError};
pub use ingest::{Origin, SinkOutcome, StatementEvent, StatementSink, TermSpec};
pub use store::{StatementId, Store, StoreFlags, MAX_STATEMENT_ID};
pub use strategy::{Pattern, ScanMode, Strategy};

// Re-export the data model for downstream convenience
pub use stele_core::{
    Caret, Field, IndexOrder, LiteralMeta, Node, NodeKind, NodeSpec, NodeTable, Statement,
    StatementError,
};
