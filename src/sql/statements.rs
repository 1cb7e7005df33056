//! Statement segmentation
//!
//! Cuts a token stream into per-statement source spans at each `;`. The cut is purely
//! lexical: no grammar is involved, so `;` inside a string or comment never splits.
//!
//! Span rules
//!
//!     A statement starts at its first leading comment, or at its first token when it has
//!     none. Whitespace between a terminator and the next statement belongs to neither.
//!     For a terminated statement the text runs up to (not including) the `;` and `end` is
//!     just past the `;`. A final unterminated statement runs up to end-of-input and is only
//!     emitted if it is non-empty, which includes a trailing comment on its own.
//!
//! Error recovery
//!
//!     When the analyzer fails, the statements cut so far are kept and a final partial
//!     statement is added, spanning from the pending start to where the analyzer gave up.
//!     The failure is then classified: an unclosed block comment or triple-quoted string
//!     becomes [`Error::Waiting`] naming the missing delimiter; anything else is passed
//!     through unchanged.

use crate::sql::error::{Error, LexerError, LexerErrorCode};
use crate::sql::pipeline::TokenSeq;
use crate::sql::processor;
use log::debug;
use serde::Serialize;

/// One statement's source text and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawStatement {
    pub pos: usize,
    pub end: usize,
    pub statement: String,
    /// The terminator's raw text, or empty when the statement ended at end-of-input.
    pub terminator: String,
}

impl RawStatement {
    /// A copy of this statement with comments removed, whitespace otherwise preserved.
    ///
    /// `pos` and `end` still describe the original statement in its source buffer.
    pub fn strip_comments(&self) -> Result<RawStatement, Error> {
        let statement = processor::strip_comments("", &self.statement)?;
        Ok(RawStatement {
            pos: self.pos,
            end: self.end,
            statement,
            terminator: self.terminator.clone(),
        })
    }
}

/// Segmentation stopped by an error; carries the statements recovered before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct SegmentationError {
    pub statements: Vec<RawStatement>,
    #[source]
    pub error: Error,
}

/// Split a token stream into statements.
pub fn segment<'src, S: TokenSeq<'src>>(
    mut tokens: S,
) -> Result<Vec<RawStatement>, SegmentationError> {
    let buffer = tokens.file().buffer();
    let mut statements = Vec::new();
    let mut start: Option<usize> = None;

    for item in tokens.by_ref() {
        let tok = match item {
            Ok(tok) => tok,
            Err(Error::Lexer(err)) => {
                let pos = start.unwrap_or_else(|| err.leading_pos());
                let end = err.span.end.max(pos);
                statements.push(RawStatement {
                    pos,
                    end,
                    statement: buffer.get(pos..end).unwrap_or_default().to_string(),
                    terminator: String::new(),
                });
                let error = classify(err, buffer);
                debug!("segmentation stopped after {} statement(s): {}", statements.len(), error);
                return Err(SegmentationError { statements, error });
            }
            Err(error) => return Err(SegmentationError { statements, error }),
        };

        let pos = *start.get_or_insert_with(|| tok.leading_pos());

        if tok.is_terminator() {
            debug!("statement [{}, {})", pos, tok.end);
            statements.push(RawStatement {
                pos,
                end: tok.end,
                statement: buffer[pos..tok.pos].to_string(),
                terminator: tok.raw.to_string(),
            });
            start = None;
        } else if tok.is_eof() {
            if pos != tok.pos {
                debug!("final statement [{}, {})", pos, tok.pos);
                statements.push(RawStatement {
                    pos,
                    end: tok.pos,
                    statement: buffer[pos..tok.pos].to_string(),
                    terminator: String::new(),
                });
            }
            break;
        }
    }

    Ok(statements)
}

/// Classify an analyzer failure by the delimiter it was waiting for.
///
/// Uses the typed code when the analyzer supplied one and the message text otherwise. A
/// triple-quoted failure is told apart by the quote characters at the failing offset.
pub fn classify(err: LexerError, buffer: &str) -> Error {
    let waiting = match err.classify_code() {
        Some(LexerErrorCode::UnclosedTripleQuotedString) => {
            let head = buffer
                .get(err.span.start..)
                .unwrap_or_default()
                .trim_start_matches(['r', 'R', 'b', 'B']);
            if head.starts_with("\"\"\"") {
                "\"\"\""
            } else {
                "'''"
            }
        }
        Some(LexerErrorCode::UnclosedComment) => "*/",
        _ => return Error::Lexer(err),
    };
    debug!("lexer failure classified as waiting for {}", waiting);
    Error::Waiting {
        waiting,
        source: err,
    }
}
