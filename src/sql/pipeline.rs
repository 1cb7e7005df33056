//! Token stream pipeline
//!
//! Token processing is a chain of lazy stream stages, each pulling one item at a time from
//! the stage before it:
//!
//!     TokenSource --> TokenStream --> [StripHints] --> segmenter / unlexer
//!
//! - [`TokenStream`] adapts a [`TokenSource`](crate::sql::lexing::TokenSource) into an
//!   iterator that ends cleanly after end-of-input and ends after the first error
//! - [`StripHints`] removes `@{ ... }` hint blocks, reattaching their comments
//!
//! Every stage implements [`TokenSeq`], so consumers can be written once against any
//! composition. Nothing is buffered beyond a single token, and dropping a stage drops the
//! analyzer it owns.
//!
//! On top of the stages sit named processing configurations ([`config`]) and the
//! [`PipelineExecutor`] that runs them.

pub mod config;
pub mod executor;
pub mod hints;
pub mod stream;

pub use config::{ConfigError, ConfigRegistry, FilterSpec, ProcessingConfig, TargetSpec};
pub use executor::{ExecutionOutput, PipelineExecutor, ProcessError};
pub use hints::StripHints;
pub use stream::{TokenSeq, TokenStream};
