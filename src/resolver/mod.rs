//! # Field Resolution
//!
//! `FieldResolver` turns a record type's static field table into a
//! column-name lookup (`FieldIndex`) and caches it per type for the lifetime
//! of the resolver.
//!
//! ## Naming Precedence
//!
//! For every externally writable field, in declaration order:
//!
//! 1. A non-empty `as "column"` annotation claims that column. It replaces a
//!    field that only reached the name through its declared name, but never a
//!    field that claimed it through an earlier annotation.
//! 2. Otherwise the declared field name claims the column, unless anything
//!    (annotation or earlier default) already holds it.
//!
//! ```text
//! pub a: i64 as "x",   ──► "x" -> a     (annotation)
//! pub x: i64,          ──► skipped      ("x" already annotated)
//! pub y: i64,          ──► "y" -> y     (default name)
//! pub b: i64 as "y",   ──► "y" -> b     (annotation outranks default)
//! hidden: i64,         ──► never mapped (not writable from outside)
//! ```
//!
//! ## Caching
//!
//! The cache is keyed by `TypeId`, holds at most one index per type and is
//! never invalidated: a record's field table is static. There is no internal
//! locking; a resolver shared between threads must be serialized by the
//! caller, together with the cursor it serves.

mod field_index;

pub use field_index::{ColumnMatch, FieldIndex};

use std::any::{type_name, TypeId};

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::decoder::TypeError;
use crate::record::{Layout, Record};

/// Per-type cache of column-to-field resolutions.
#[derive(Debug, Default)]
pub struct FieldResolver {
    matching: ColumnMatch,
    cache: HashMap<TypeId, FieldIndex>,
    computed: usize,
}

impl FieldResolver {
    pub fn new() -> Self {
        Self::with_matching(crate::config::DEFAULT_COLUMN_MATCH)
    }

    pub fn with_matching(matching: ColumnMatch) -> Self {
        Self {
            matching,
            cache: HashMap::new(),
            computed: 0,
        }
    }

    pub fn matching(&self) -> ColumnMatch {
        self.matching
    }

    /// Switches the matching policy. Cached indexes were built under the old
    /// policy, so they are dropped when the policy changes.
    pub fn set_matching(&mut self, matching: ColumnMatch) {
        if self.matching != matching {
            self.matching = matching;
            self.cache.clear();
        }
    }

    /// Returns the column lookup for `T`, computing it on first use.
    pub fn resolve<T: Record>(&mut self) -> Result<&FieldIndex, TypeError> {
        let type_id = TypeId::of::<T>();
        if self.cache.contains_key(&type_id) {
            trace!(record = type_name::<T>(), "column mapping cache hit");
            return Ok(&self.cache[&type_id]);
        }

        let fields = match T::layout() {
            Layout::Struct(fields) => fields,
            Layout::Mapped => return Err(TypeError::self_mapped::<T>()),
            Layout::Opaque => return Err(TypeError::not_a_record::<T>()),
        };

        let index = FieldIndex::build(type_name::<T>(), fields, self.matching);
        debug!(
            record = index.type_name(),
            fields = fields.len(),
            mapped = index.len(),
            "resolved column mapping"
        );
        self.computed += 1;
        let index = self.cache.entry(type_id).or_insert(index);
        Ok(&*index)
    }

    pub fn contains<T: Record>(&self) -> bool {
        self.cache.contains_key(&TypeId::of::<T>())
    }

    /// Number of record types with a cached index.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of indexes computed so far. Cache hits do not count.
    pub fn computed(&self) -> usize {
        self.computed
    }
}
