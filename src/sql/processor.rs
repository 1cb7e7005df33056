//! Public operations
//!
//! Each operation builds a fresh pipeline over the input, drives it to completion (or to the
//! first token, for the locator) and drops it. Nothing is shared between calls.
//!
//!     strip_comments          TokenStream -> preserving unlexer
//!     simple_strip_comments   TokenStream -> canonical unlexer
//!     simple_skip_hints       TokenStream -> StripHints -> canonical unlexer
//!     separate_statements     TokenStream -> segmenter
//!     first_non_hint_token    TokenStream -> StripHints, one pull
//!
//! The plain functions use the reference [`Lexer`]; the `_with` variants accept any
//! [`TokenSource`]. The filename only appears in diagnostics.

use crate::sql::error::Error;
use crate::sql::lexing::{Lexer, TokenSource};
use crate::sql::pipeline::{StripHints, TokenSeq, TokenStream};
use crate::sql::statements::{self, RawStatement, SegmentationError};
use crate::sql::token::Token;
use crate::sql::unlexing;
use log::debug;

/// Remove comments, keeping all other source text as written.
pub fn strip_comments(filename: &str, source: &str) -> Result<String, Error> {
    strip_comments_with(Lexer::new(filename, source))
}

pub fn strip_comments_with<'src, S: TokenSource<'src>>(source: S) -> Result<String, Error> {
    unlexing::strip_comments(TokenStream::new(source))
}

/// Canonical form with comments dropped; hints are kept.
pub fn simple_strip_comments(filename: &str, source: &str) -> Result<String, Error> {
    simple_strip_comments_with(Lexer::new(filename, source))
}

pub fn simple_strip_comments_with<'src, S: TokenSource<'src>>(source: S) -> Result<String, Error> {
    unlexing::unlex(TokenStream::new(source))
        .map_err(|err| Error::operation("simple_strip_comments", err))
}

/// Canonical form with comments and `@{...}` hints dropped.
pub fn simple_skip_hints(filename: &str, source: &str) -> Result<String, Error> {
    simple_skip_hints_with(Lexer::new(filename, source))
}

pub fn simple_skip_hints_with<'src, S: TokenSource<'src>>(source: S) -> Result<String, Error> {
    unlexing::unlex(StripHints::new(TokenStream::new(source)))
        .map_err(|err| Error::operation("simple_skip_hints", err))
}

/// Split into statements. On failure the statements cut so far, plus the partial one,
/// travel with the error.
pub fn separate_statements(
    filename: &str,
    source: &str,
) -> Result<Vec<RawStatement>, SegmentationError> {
    separate_statements_with(Lexer::new(filename, source))
}

pub fn separate_statements_with<'src, S: TokenSource<'src>>(
    source: S,
) -> Result<Vec<RawStatement>, SegmentationError> {
    statements::segment(TokenStream::new(source))
}

/// The first token that is not part of a leading hint.
///
/// Comments from the skipped hint are attached to the returned token. For empty input this
/// is the end-of-input token.
pub fn first_non_hint_token<'src>(filename: &str, source: &'src str) -> Result<Token<'src>, Error> {
    first_non_hint_token_with(Lexer::new(filename, source))
}

pub fn first_non_hint_token_with<'src, S: TokenSource<'src>>(
    source: S,
) -> Result<Token<'src>, Error> {
    first_token(StripHints::new(TokenStream::new(source)))
}

/// Pull one token, wrapping a failure with the position it happened at.
pub(crate) fn first_token<'src, S: TokenSeq<'src>>(mut tokens: S) -> Result<Token<'src>, Error> {
    match tokens.next() {
        Some(Ok(tok)) => Ok(tok),
        Some(Err(err)) => {
            let offset = err.span().map_or(0, |span| span.start);
            let position = tokens.file().position(offset);
            debug!("no first token: {}", err);
            Err(Error::FirstToken {
                position,
                source: Box::new(err),
            })
        }
        None => Ok(Token::eof(tokens.file().buffer().len())),
    }
}
