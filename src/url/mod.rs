//! URL handling: canonicalization and target/seed pattern matching.
//!
//! This module implements the normalizer and pattern matcher described as
//! Component C1: the canonical form produced here is the unique admission
//! key for the frontier store (`crate::storage`).

mod domain;
mod matcher;
mod normalize;

pub use domain::extract_domain;
pub use matcher::{is_seed, is_target};
pub use normalize::normalize_url;
