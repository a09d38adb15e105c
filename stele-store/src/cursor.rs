//! Cursor - versioned, strategy-aware iteration over one index
//!
//! A cursor is a plain value: the pattern it matches, the strategy it
//! was resolved to, the store version it captured at creation, and a
//! position inside one index. It borrows nothing; traversal takes the
//! store by shared reference, so a cursor can never dangle; at worst it
//! is stale.
//!
//! ## Invalidation
//!
//! Any mutation bumps the store version, and every cursor carrying an
//! older stamp fails its next operation with `StaleCursor` instead of
//! attempting to validate its position. The single exception is the
//! cursor actively used for an erase, which the erase re-synchronizes.

use crate::error::{Result, StoreError};
use crate::store::{StatementId, Store};
use crate::strategy::{prefix_cmp, Pattern, ScanMode, Strategy};
use std::cmp::Ordering;
use stele_core::Statement;

/// Iterator over one index, restricted to a pattern
#[derive(Clone, Debug)]
pub struct Cursor {
    tag: u64,
    version: u64,
    strategy: Strategy,
    pattern: Pattern,
    pos: usize,
    at_end: bool,
}

impl Cursor {
    /// Position a cursor at the first match under a resolved strategy.
    pub(crate) fn first_match(store: &Store, pattern: Pattern, strategy: Strategy) -> Cursor {
        let pos = if strategy.mode.is_range() {
            let slice = store.index_slice(strategy.order);
            slice.partition_point(|&id| {
                store
                    .statement_by_id(id)
                    .map_or(false, |st| {
                        prefix_cmp(st, &pattern, strategy.order, strategy.prefix_len)
                            == Ordering::Less
                    })
            })
        } else {
            0
        };

        let mut cursor = Cursor {
            tag: store.tag(),
            version: store.version(),
            strategy,
            pattern,
            pos,
            at_end: false,
        };
        cursor.settle(store);
        cursor
    }

    /// The shared terminal cursor for a store.
    pub(crate) fn end_of(store: &Store) -> Cursor {
        Cursor {
            tag: store.tag(),
            version: store.version(),
            strategy: Strategy {
                mode: ScanMode::Full,
                order: store.default_order(),
                prefix_len: 0,
            },
            pattern: Pattern::default(),
            pos: 0,
            at_end: true,
        }
    }

    /// The strategy this cursor was resolved to
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The pattern this cursor matches
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// True once the scan is exhausted
    pub fn is_end(&self) -> bool {
        self.at_end
    }

    /// The version stamp captured at creation (or at the last resync)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn store_tag(&self) -> u64 {
        self.tag
    }

    /// Arena id of the current statement.
    pub(crate) fn current_id(&self, store: &Store) -> Option<StatementId> {
        if self.at_end {
            return None;
        }
        store.index_slice(self.strategy.order).get(self.pos).copied()
    }

    /// The statement the cursor points at, or `None` when end/stale.
    pub fn get<'s>(&self, store: &'s Store) -> Option<&'s Statement> {
        debug_assert_eq!(self.tag, store.tag(), "cursor used against a different store");
        if self.at_end || self.version != store.version() {
            return None;
        }
        store.statement_at(self.strategy.order, self.pos)
    }

    /// Step to the next match.
    ///
    /// Returns `Ok(true)` while positioned, `Ok(false)` on reaching the
    /// end, `StaleCursor` if the store mutated since this cursor's
    /// stamp, and `CursorAtEnd` when called on an already-terminal
    /// cursor.
    pub fn advance(&mut self, store: &Store) -> Result<bool> {
        debug_assert_eq!(self.tag, store.tag(), "cursor used against a different store");
        if self.version != store.version() {
            return Err(StoreError::StaleCursor {
                cursor: self.version,
                store: store.version(),
            });
        }
        if self.at_end {
            return Err(StoreError::CursorAtEnd);
        }
        self.pos += 1;
        self.settle(store);
        Ok(!self.at_end)
    }

    /// Re-stamp and re-position after an erase performed through this
    /// cursor. Removal shifted the successor into the current slot, so
    /// settling starts here without stepping.
    pub(crate) fn resync(&mut self, store: &Store) {
        self.version = store.version();
        self.settle(store);
    }

    /// Scan forward from the current position to the first record the
    /// strategy accepts, or transition to the end.
    fn settle(&mut self, store: &Store) {
        let slice = store.index_slice(self.strategy.order);
        while self.pos < slice.len() {
            let st = match store.statement_at(self.strategy.order, self.pos) {
                Some(st) => st,
                None => break,
            };
            match self.strategy.mode {
                ScanMode::Full => return,
                ScanMode::Range => {
                    if self.in_range(st) {
                        return;
                    }
                    break;
                }
                ScanMode::RangeFiltered => {
                    if !self.in_range(st) {
                        break;
                    }
                    if self.pattern.matches(st) {
                        return;
                    }
                    self.pos += 1;
                }
                ScanMode::FullFiltered => {
                    if self.pattern.matches(st) {
                        return;
                    }
                    self.pos += 1;
                }
            }
        }
        self.at_end = true;
    }

    fn in_range(&self, st: &Statement) -> bool {
        prefix_cmp(st, &self.pattern, self.strategy.order, self.strategy.prefix_len)
            == Ordering::Equal
    }
}

/// Two cursors are equal when both are terminal on the same store, or
/// when they sit at the same index position via the same strategy and
/// pattern. Coincidentally visiting one record through different indices
/// is not equality; the trajectories differ.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        if self.tag != other.tag {
            return false;
        }
        if self.at_end || other.at_end {
            return self.at_end && other.at_end;
        }
        self.pos == other.pos && self.strategy == other.strategy && self.pattern == other.pattern
    }
}

impl Eq for Cursor {}
