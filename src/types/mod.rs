//! # Value and Destination Types
//!
//! ## Module Structure
//!
//! - `owned_value`: `OwnedValue`, one column value of the current row
//! - `slot`: `Slot` (typed writable location) and `Destination` (slot or discard)
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `OwnedValue` | Column value handed out by a cursor |
//! | `Slot` | Scan primitive: converts a value into a typed location |
//! | `Destination` | One positional scan target, slot or discard sink |

mod owned_value;
mod slot;

pub use owned_value::OwnedValue;
pub use slot::{Destination, Slot};
