#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared utilities for dexir.
//!
//! - [`Colors`]: ANSI palette used by the IR dump and the CLI
//! - [`Interner`]: insertion-ordered key → handle deduplication
//! - [`utils`]: descriptor and access-flag pretty printers

mod colors;
mod interner;
pub mod utils;

#[cfg(test)]
mod colors_tests;
#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use interner::Interner;
