//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the IR and the supported text representations.

pub mod adf;
pub mod markdown;
pub mod wiki;

pub use adf::AdfFormat;
pub use markdown::MarkdownFormat;
pub use wiki::WikiFormat;
