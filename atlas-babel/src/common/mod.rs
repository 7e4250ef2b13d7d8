//! Format-agnostic helpers shared by the format engines.

pub mod inlines;
pub mod text;
