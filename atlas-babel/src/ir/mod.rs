//! Intermediate Representation (IR) shared by all formats.
//!
//! Every format parses into [`nodes::Document`] and encodes from it, which is
//! what lets any source format be paired with any target format.

pub mod nodes;
