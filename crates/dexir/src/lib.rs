//! dexir: a DEX container parsed into a cross-referenced IR graph.
//!
//! # Example
//!
//! ```no_run
//! use dexir::{BuildOptions, build};
//!
//! let bytes = std::fs::read("classes.dex").unwrap();
//! let header = build(&bytes, &BuildOptions::default()).unwrap();
//! let c = header.collections();
//! for (_, class) in c.class_defs().iter() {
//!     println!("{}", c.descriptor(class.class_type));
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod ir;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use builder::{BuildOptions, build};
pub use dexir_format::format::{DexError, ErrorKind, Result};
pub use ir::{Collections, Header, Node, dump};
