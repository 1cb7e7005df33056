//! Error types
//!
//! Two kinds of failure exist in this crate:
//!
//!     Lexical failure: the analyzer could not continue (unterminated string, comment or
//!     triple-quoted literal). Segmentation classifies these, where it can, into a
//!     "waiting for delimiter" shape so an interactive caller can ask for more input.
//!     Anything it cannot classify is passed through as the raw [`LexerError`].
//!
//!     Structural failure: a hint `@{` reached end-of-input without its closing `}`.
//!
//! Everything is reported as a value; nothing here is retried.

use crate::sql::source::Position;
use serde::Serialize;
use std::ops::Range;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Typed reason for an analyzer failure.
///
/// Analyzers that cannot supply one leave [`LexerError::code`] empty and classification
/// falls back to the message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexerErrorCode {
    UnclosedComment,
    UnclosedTripleQuotedString,
    UnclosedString,
    UnclosedStringNewline,
    UnclosedIdentifier,
    #[default]
    InvalidCharacter,
}

impl LexerErrorCode {
    pub fn message(self) -> &'static str {
        match self {
            LexerErrorCode::UnclosedComment => "unclosed comment",
            LexerErrorCode::UnclosedTripleQuotedString => "unclosed triple-quoted string literal",
            LexerErrorCode::UnclosedString => "unclosed string literal",
            LexerErrorCode::UnclosedStringNewline => {
                "unclosed string literal: newline appears in non triple-quoted"
            }
            LexerErrorCode::UnclosedIdentifier => "unclosed identifier literal",
            LexerErrorCode::InvalidCharacter => "invalid character",
        }
    }

    /// Recover a code from an analyzer message. Only exact messages match.
    pub fn from_message(message: &str) -> Option<Self> {
        [
            LexerErrorCode::UnclosedComment,
            LexerErrorCode::UnclosedTripleQuotedString,
            LexerErrorCode::UnclosedString,
            LexerErrorCode::UnclosedStringNewline,
            LexerErrorCode::UnclosedIdentifier,
            LexerErrorCode::InvalidCharacter,
        ]
        .into_iter()
        .find(|code| code.message() == message)
    }
}

/// Failure reported by a token source.
///
/// `span.start` is where the token being scanned began; `span.end` is the offset at which
/// the analyzer gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error: {position}: {message}")]
pub struct LexerError {
    pub message: String,
    pub code: Option<LexerErrorCode>,
    pub span: Range<usize>,
    pub position: Position,
    /// Offset of the first comment already collected for the failing token, if any.
    pub comments_start: Option<usize>,
}

impl LexerError {
    /// The typed code, or the code recovered from the message text.
    pub fn classify_code(&self) -> Option<LexerErrorCode> {
        self.code.or_else(|| LexerErrorCode::from_message(&self.message))
    }

    /// Where the unfinished token begins, including the comments that lead into it.
    pub fn leading_pos(&self) -> usize {
        self.comments_start.unwrap_or(self.span.start)
    }
}

/// Errors surfaced by the public operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexical failure classified by the delimiter the analyzer was waiting for.
    #[error("lexer error with waiting: {waiting}")]
    Waiting {
        waiting: &'static str,
        source: LexerError,
    },

    /// An analyzer failure that could not (or need not) be classified.
    #[error(transparent)]
    Lexer(#[from] LexerError),

    /// A `@{` hint without its closing `}`.
    #[error("unclosed hint at {position}{}", cause_suffix(.cause))]
    UnclosedHint {
        position: Position,
        cause: Option<LexerError>,
    },

    #[error("can't get first token at {position}: {source}")]
    FirstToken {
        position: Position,
        source: Box<Error>,
    },

    #[error("error on {operation}: {source}")]
    Operation {
        operation: &'static str,
        source: Box<Error>,
    },
}

fn cause_suffix(cause: &Option<LexerError>) -> String {
    cause
        .as_ref()
        .map(|cause| format!(": {}", cause))
        .unwrap_or_default()
}

impl Error {
    pub(crate) fn operation(operation: &'static str, source: Error) -> Self {
        Error::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// The delimiter the analyzer was waiting for, if this error was classified.
    pub fn waiting(&self) -> Option<&'static str> {
        match self {
            Error::Waiting { waiting, .. } => Some(waiting),
            Error::FirstToken { source, .. } | Error::Operation { source, .. } => source.waiting(),
            _ => None,
        }
    }

    /// Byte range of the failure in the source, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Error::Waiting { source, .. } | Error::Lexer(source) => Some(source.span.clone()),
            Error::UnclosedHint { position, cause } => Some(
                cause
                    .as_ref()
                    .map_or(position.offset..position.offset, |cause| cause.span.clone()),
            ),
            Error::FirstToken { source, .. } | Error::Operation { source, .. } => source.span(),
        }
    }
}
