//! # rowdecode Configuration Constants
//!
//! Inline capacities for the per-row scratch lists and the default column
//! matching policy.
//!
//! ## Inline Capacities
//!
//! ```text
//! INLINE_COLUMNS (16)
//!       │
//!       └─> Destination list built for every decoded row. One entry per
//!           cursor column. Result sets wider than this spill to the heap.
//!
//! INLINE_FIELDS (16)
//!       │
//!       └─> Slot list produced by `Record::slots`. One entry per declared
//!           field. Records wider than this spill to the heap.
//! ```
//!
//! Neither value affects behavior, only whether a decode call allocates.

use crate::resolver::ColumnMatch;

/// Number of destinations kept inline before the per-row list allocates.
pub const INLINE_COLUMNS: usize = 16;

/// Number of field slots kept inline before `Record::slots` allocates.
pub const INLINE_FIELDS: usize = 16;

/// Column matching used when a decoder is built without an explicit policy.
pub const DEFAULT_COLUMN_MATCH: ColumnMatch = ColumnMatch::Exact;
