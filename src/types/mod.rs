//! Core types for Lectern.

pub mod artifact;
pub mod generation;
pub mod source;
pub mod usage;

pub use artifact::*;
pub use generation::*;
pub use source::*;
pub use usage::*;
