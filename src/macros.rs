//! # Record Declaration Macro
//!
//! `record!` declares a struct and implements [`Record`](crate::record::Record)
//! for it, producing the static field descriptor table and the slot accessor.
//!
//! ## Annotations
//!
//! A field may carry an explicit column name after its type:
//!
//! ```ignore
//! rowdecode::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Tagged {
//!         pub natural: i64 as "id",
//!         pub amount: f64,
//!         pub truth: bool as "is_truth",
//!         cached: Option<String>,
//!     }
//! }
//! ```
//!
//! - `as "name"` overrides the column name; `as ""` is the same as no annotation
//! - fields without a visibility (`cached` above) are never matched to columns
//! - every field type must implement [`Slot`](crate::types::Slot)

/// Declares a struct that can be decoded from rows.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(as $column:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::record::Record for $name {
            fn layout() -> $crate::record::Layout {
                const FIELDS: &[$crate::record::Field] = &[
                    $(
                        $crate::record::Field {
                            name: ::core::stringify!($field),
                            column: $crate::__record_column!($($column)?),
                            exported: !::core::stringify!($field_vis).is_empty(),
                        },
                    )*
                ];
                $crate::record::Layout::Struct(FIELDS)
            }

            #[allow(unused_mut)]
            fn slots(&mut self) -> $crate::record::Slots<'_> {
                let Self { $($field),* } = self;
                let mut slots = $crate::record::Slots::new();
                $(
                    slots.push($field as &mut dyn $crate::types::Slot);
                )*
                slots
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_column {
    () => {
        ::core::option::Option::None
    };
    ($column:literal) => {
        ::core::option::Option::Some($column)
    };
}
