//! Grid module.
//!
//! The unbounded cell grid: coordinate mapping, the procedural token
//! generator, the sparse overlay of player changes, and the field that
//! composes them.

pub mod grid;
pub mod generator;
pub mod overlay;
pub mod field;

pub use grid::*;
pub use generator::*;
pub use overlay::*;
pub use field::*;
