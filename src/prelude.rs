//! Prelude module for the my_family crate.
//!
//! Re-exports the derive_more macros used across the crate.

pub use derive_more::Display;
