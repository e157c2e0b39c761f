//! Row materialization: one destination per cursor column.
//!
//! ```text
//! columns:  ["id",   "extra",   "amount"]
//!              │        │           │
//!              ▼        ▼           ▼
//! dest:     [Slot(id), Discard, Slot(amount)]
//! ```
//!
//! Destinations come from the target's own column map when it is self-mapped,
//! otherwise from the cached `FieldIndex` applied to the target's slots.
//! Columns with no destination, and repeats of a column that already took its
//! slot, are routed to `Destination::Discard` so the positional scan still
//! lines up.

use smallvec::SmallVec;
use tracing::trace;

use super::TypeError;
use crate::config::{INLINE_COLUMNS, INLINE_FIELDS};
use crate::record::{ColumnMap, Layout, Record, Slots};
use crate::resolver::{ColumnMatch, FieldIndex, FieldResolver};
use crate::types::{Destination, Slot};

pub(crate) type Destinations<'a> = SmallVec<[Destination<'a>; INLINE_COLUMNS]>;

/// Rejects targets that can never receive a row. Runs before the cursor is
/// touched, so a failed call consumes nothing.
pub(crate) fn check_target<T: Record>(target: &mut T) -> Result<(), TypeError> {
    match T::layout() {
        Layout::Opaque => Err(TypeError::not_a_record::<T>()),
        Layout::Mapped if target.mapped_columns().is_none() => {
            Err(TypeError::missing_column_map::<T>())
        }
        Layout::Mapped | Layout::Struct(_) => Ok(()),
    }
}

pub(crate) fn build_destinations<'t, T: Record>(
    columns: &[String],
    target: &'t mut T,
    resolver: &mut FieldResolver,
) -> Result<Destinations<'t>, TypeError> {
    let dest = match T::layout() {
        Layout::Opaque => return Err(TypeError::not_a_record::<T>()),
        Layout::Mapped => {
            let matching = resolver.matching();
            let map = target
                .mapped_columns()
                .ok_or_else(TypeError::missing_column_map::<T>)?;
            from_column_map(columns, map.folded(matching), matching)
        }
        Layout::Struct(_) => {
            let index = resolver.resolve::<T>()?;
            from_field_index(columns, index, target.slots())
        }
    };

    trace!(
        record = std::any::type_name::<T>(),
        columns = columns.len(),
        discarded = dest.iter().filter(|d| d.is_discard()).count(),
        "built scan destinations"
    );
    Ok(dest)
}

fn from_field_index<'t>(
    columns: &[String],
    index: &FieldIndex,
    slots: Slots<'t>,
) -> Destinations<'t> {
    let mut slots: SmallVec<[Option<&'t mut dyn Slot>; INLINE_FIELDS]> =
        slots.into_iter().map(Some).collect();

    let mut dest = Destinations::with_capacity(columns.len());
    for column in columns {
        let slot = index
            .get(column)
            .and_then(|position| slots.get_mut(position))
            .and_then(Option::take);
        dest.push(slot.map_or(Destination::Discard, Destination::Slot));
    }
    dest
}

fn from_column_map<'t>(
    columns: &[String],
    mut map: ColumnMap<'t>,
    matching: ColumnMatch,
) -> Destinations<'t> {
    columns
        .iter()
        .map(|column| {
            map.take(&matching.key(column))
                .map_or(Destination::Discard, Destination::Slot)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::TypeErrorKind;
    use crate::record::ColumnMapper;
    use crate::types::OwnedValue;

    crate::record! {
        #[derive(Debug, Default)]
        pub struct Pair {
            pub id: i64,
            pub amount: f64,
        }
    }

    #[derive(Default)]
    struct Manual {
        left: i64,
    }

    impl ColumnMapper for Manual {
        fn column_map(&mut self) -> ColumnMap<'_> {
            ColumnMap::new().bind("L", &mut self.left)
        }
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_destination_per_column_in_order() {
        let mut resolver = FieldResolver::new();
        let mut pair = Pair::default();
        let columns = cols(&["amount", "extra", "id"]);

        let mut dest = build_destinations(&columns, &mut pair, &mut resolver).unwrap();
        assert_eq!(dest.len(), 3);
        assert!(dest[1].is_discard());
        dest[0].assign(&OwnedValue::Float(2.5)).unwrap();
        dest[2].assign(&OwnedValue::Int(7)).unwrap();
        drop(dest);

        assert_eq!(pair.id, 7);
        assert_eq!(pair.amount, 2.5);
    }

    #[test]
    fn test_repeated_column_discards_after_first() {
        let mut resolver = FieldResolver::new();
        let mut pair = Pair::default();
        let columns = cols(&["id", "id"]);

        let dest = build_destinations(&columns, &mut pair, &mut resolver).unwrap();
        assert!(!dest[0].is_discard());
        assert!(dest[1].is_discard());
    }

    #[test]
    fn test_self_mapped_bypasses_resolver() {
        let mut resolver = FieldResolver::new();
        let mut manual = Manual::default();
        let columns = cols(&["L", "R"]);

        let mut dest = build_destinations(&columns, &mut manual, &mut resolver).unwrap();
        assert!(dest[1].is_discard());
        dest[0].assign(&OwnedValue::Int(3)).unwrap();
        drop(dest);

        assert_eq!(manual.left, 3);
        assert!(resolver.is_empty());
        assert_eq!(resolver.computed(), 0);
    }

    #[test]
    fn test_self_mapped_respects_case_folding() {
        let mut resolver = FieldResolver::with_matching(ColumnMatch::IgnoreAsciiCase);
        let mut manual = Manual::default();
        let columns = cols(&["l"]);

        let dest = build_destinations(&columns, &mut manual, &mut resolver).unwrap();
        assert!(!dest[0].is_discard());
    }

    #[test]
    fn test_opaque_target_is_rejected() {
        let mut resolver = FieldResolver::new();
        let mut scalar = 0i64;
        let err = build_destinations(&cols(&["id"]), &mut scalar, &mut resolver).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::NotARecord);
    }
}
