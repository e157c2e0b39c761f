//! Self-supplied column maps.
//!
//! A type that implements [`ColumnMapper`] hands the decoder a [`ColumnMap`]
//! of already-bound slots on every call. Nothing about the type is resolved
//! or cached; the map is consumed by the call that requested it.
//!
//! ```ignore
//! struct Pair {
//!     left: i64,
//!     right: String,
//! }
//!
//! impl ColumnMapper for Pair {
//!     fn column_map(&mut self) -> ColumnMap<'_> {
//!         ColumnMap::new()
//!             .bind("l", &mut self.left)
//!             .bind("r", &mut self.right)
//!     }
//! }
//! ```

use std::fmt;

use hashbrown::HashMap;

use crate::resolver::ColumnMatch;
use crate::types::Slot;

/// Override for field resolution: the value maps columns to its own slots.
pub trait ColumnMapper: 'static {
    fn column_map(&mut self) -> ColumnMap<'_>;
}

/// Column name to writable slot, bound to one instance for one decode call.
///
/// Binding a column name that is already bound keeps the first binding.
#[derive(Default)]
pub struct ColumnMap<'a> {
    entries: Vec<(String, Option<&'a mut dyn Slot>)>,
    index: HashMap<String, usize>,
}

impl<'a> ColumnMap<'a> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn bind<S: Slot>(mut self, column: impl Into<String>, slot: &'a mut S) -> Self {
        self.insert(column, slot);
        self
    }

    /// Binds `column` unless it is already bound. Returns whether the slot was kept.
    pub fn insert(&mut self, column: impl Into<String>, slot: &'a mut dyn Slot) -> bool {
        let column = column.into();
        if self.index.contains_key(&column) {
            return false;
        }
        self.index.insert(column.clone(), self.entries.len());
        self.entries.push((column, Some(slot)));
        true
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the slot bound to `column`. A second take of the same column
    /// returns `None`.
    pub fn take(&mut self, column: &str) -> Option<&'a mut dyn Slot> {
        let &position = self.index.get(column)?;
        self.entries[position].1.take()
    }

    /// Re-keys the map under `matching`, keeping the first binding of each
    /// folded name.
    pub(crate) fn folded(self, matching: ColumnMatch) -> Self {
        if matching == ColumnMatch::Exact {
            return self;
        }
        let mut folded = ColumnMap::new();
        for (column, slot) in self.entries {
            let Some(slot) = slot else { continue };
            folded.insert(matching.key(&column).into_owned(), slot);
        }
        folded
    }
}

impl fmt::Debug for ColumnMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(column, _)| column))
            .finish()
    }
}
