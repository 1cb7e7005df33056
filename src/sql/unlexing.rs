//! Unlexing
//!
//! Rebuilds SQL text from a token stream. The inverse of tokenizing, with two fidelity
//! levels:
//!
//!     preserving   comments removed, all other source text copied verbatim; each group of
//!                  comments collapses to at most one space or newline
//!     canonical    comments dropped, whitespace discarded, tokens re-joined by adjacency
//!                  rules so the output lexes back to the same tokens
//!
//! Both work on any [`TokenSeq`](crate::sql::pipeline::TokenSeq), so hint stripping can
//! run in front of either one.

pub mod canonical;
pub mod preserving;

pub use canonical::{unlex, Separator, Spacing};
pub use preserving::strip_comments;
