//! # rowdecode Configuration Module
//!
//! This module centralizes the configuration constants for rowdecode. Runtime
//! knobs (column matching, resolver reuse) live on `DecoderBuilder`; the values
//! here are the compile-time defaults those knobs fall back to.
//!
//! ## Module Organization
//!
//! - [`constants`]: Inline capacities and default matching policy

pub mod constants;
pub use constants::*;
