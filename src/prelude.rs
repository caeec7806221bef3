//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! quickpat types and traits with a single `use quickpat::prelude::*;` statement.

pub use crate::highlight::{highlight, indices_to_ranges, wrap_matches, wrap_matches_with};
pub use crate::options::{DEFAULT_RULES, parse_rules};
pub use crate::*;
pub use std::sync::Arc;
