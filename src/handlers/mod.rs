//! HTTP handlers for the classroom resource.

pub mod classroom;
pub use classroom::*;
