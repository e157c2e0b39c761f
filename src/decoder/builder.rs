//! # Decoder Builder
//!
//! `DecoderBuilder` configures a decoding session before it starts.
//!
//! ## Configuration Options
//!
//! | Option       | Default            | Description                                 |
//! |--------------|--------------------|---------------------------------------------|
//! | cursor       | none (pre-exhausted) | Row source for the session                |
//! | column_match | `Exact`            | How column names are compared               |
//! | resolver     | fresh              | Pre-warmed cache carried from an earlier session |
//!
//! ## Usage
//!
//! ```ignore
//! let decoder = Decoder::builder()
//!     .cursor(rows)
//!     .column_match(ColumnMatch::IgnoreAsciiCase)
//!     .resolver(previous.into_resolver())
//!     .build();
//! ```
//!
//! When both a resolver and a matching policy are given and they disagree,
//! the policy wins and the resolver's cache is dropped.

use super::Decoder;
use crate::resolver::{ColumnMatch, FieldResolver};

pub struct DecoderBuilder<C> {
    cursor: Option<C>,
    column_match: Option<ColumnMatch>,
    resolver: Option<FieldResolver>,
}

impl<C> Default for DecoderBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DecoderBuilder<C> {
    pub fn new() -> Self {
        Self {
            cursor: None,
            column_match: None,
            resolver: None,
        }
    }

    pub fn cursor(mut self, cursor: C) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn column_match(mut self, column_match: ColumnMatch) -> Self {
        self.column_match = Some(column_match);
        self
    }

    /// Reuses an existing resolver and everything it has cached.
    pub fn resolver(mut self, resolver: FieldResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Decoder<C> {
        let mut resolver = self.resolver.unwrap_or_default();
        if let Some(column_match) = self.column_match {
            resolver.set_matching(column_match);
        }
        Decoder::with_parts(self.cursor, resolver)
    }
}
