//! # Stele Core
//!
//! Data model for the stele in-memory statement store.
//!
//! This crate provides:
//! - Interned term values: [`Node`], [`NodeKind`], [`LiteralMeta`]
//! - The reference-counted interning pool: [`NodeTable`] and [`NodeSpec`]
//! - The stored unit of data: [`Statement`] with optional [`Caret`] provenance
//! - The twelve index orders and their comparators: [`IndexOrder`]
//!
//! ## Design Principles
//!
//! 1. **Identity implies equality**: nodes from one table compare by
//!    pointer; structural comparison is the cross-table fallback.
//! 2. **Hash before allocate**: pool lookups hash the construction
//!    parameters and only materialize a node on a miss.
//! 3. **Strict total ordering**: comparators never treat anything as a
//!    wildcard; pattern logic lives in the store crate.

pub mod error;
pub mod node;
pub mod order;
pub mod statement;
pub mod table;

pub use error::{Result, StatementError};
pub use node::{LiteralMeta, Node, NodeKind};
pub use order::{cmp_optional, Field, IndexOrder, GRAPH_ORDER_OFFSET, ORDER_COUNT};
pub use statement::{Caret, Statement};
pub use table::{MetaSpec, NodeSpec, NodeTable};
