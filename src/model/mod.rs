//! Resolved report model.
//!
//! The parser converts a gtest XML report into these structures. Attribute
//! defaults are resolved into the values here; the source XML is never
//! modified. Renderers consume these structures.

mod report;
mod testcase;

pub use report::*;
pub use testcase::*;
