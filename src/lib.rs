//! # sql-unlex
//!
//! Lexical post-processing for GoogleSQL-style query text.
//!
//! The crate sits downstream of a tokenizer and works purely on token streams: it never
//! parses. It answers three needs:
//!
//!     - split a multi-statement buffer into statements with exact byte offsets, keeping
//!       whatever was scanned before a lexing failure
//!     - rebuild "clean" SQL text with comments (and optionally hints) removed, either
//!       preserving the original whitespace or in a canonical single-space form
//!     - find the first token of a statement that is not part of a leading `@{...}` hint
//!
//! File Layout
//!
//!     src/sql
//!       ├── token        Token, Comment, TokenKind, Symbol
//!       ├── source       filename + buffer, offsets to line/column
//!       ├── error        analyzer failures and the crate error taxonomy
//!       ├── lexing       the TokenSource capability and the logos-based reference lexer
//!       ├── pipeline     token stream adapter, hint filter, processing configs
//!       ├── statements   statement segmentation
//!       ├── unlexing     comment-preserving and canonical reconstruction
//!       └── processor    the public operations
//!
//! Any tokenizer can drive the core by implementing [`sql::lexing::TokenSource`].

pub mod sql;

pub use sql::error::{Error, LexerError, LexerErrorCode};
pub use sql::processor::{
    first_non_hint_token, separate_statements, simple_skip_hints, simple_strip_comments,
    strip_comments,
};
pub use sql::statements::{RawStatement, SegmentationError};
pub use sql::token::{Comment, Symbol, Token, TokenKind};
