//! Lexing
//!
//! The core of this crate never talks to a tokenizer library directly. It depends on the
//! [`TokenSource`] capability: something that, given a buffer, hands out one token at a time
//! with its raw text, byte range and leading comments, or fails with a [`LexerError`].
//!
//! The [`Lexer`] in this module is the reference implementation, built on logos
//! (see [`base_tokenization`]). It turns the flat logos lexeme stream into tokens:
//!
//!     1. whitespace is skipped by logos itself
//!     2. comments are collected and attached to the next real token, including end-of-input,
//!        together with the whitespace that preceded each comment
//!     3. words are split into reserved keywords and identifiers
//!     4. callback failures become a [`LexerError`] spanning from the start of the unfinished
//!        token to the point where scanning gave up; comments already collected for that
//!        token are remembered in [`LexerError::comments_start`]

pub mod base_tokenization;

use crate::sql::error::{LexerError, LexerErrorCode};
use crate::sql::source::SourceFile;
use crate::sql::token::{Comment, Token};
use base_tokenization::{Lexeme, RawToken};
use log::trace;
use logos::Logos;
use std::ops::Range;

/// A pull-based producer of tokens over an in-memory buffer.
pub trait TokenSource<'src> {
    /// The buffer being tokenized and its diagnostic name.
    fn source(&self) -> &SourceFile<'src>;

    /// Advance by exactly one token.
    ///
    /// Once the end-of-input token has been returned, further calls keep returning it.
    /// After an error the source is in an unspecified state and should not be pulled again.
    fn next_token(&mut self) -> Result<Token<'src>, LexerError>;
}

impl<'src, T: TokenSource<'src> + ?Sized> TokenSource<'src> for Box<T> {
    fn source(&self) -> &SourceFile<'src> {
        (**self).source()
    }

    fn next_token(&mut self) -> Result<Token<'src>, LexerError> {
        (**self).next_token()
    }
}

/// Reference GoogleSQL-style lexer.
pub struct Lexer<'src> {
    file: SourceFile<'src>,
    inner: logos::Lexer<'src, RawToken>,
    /// End of the last token or comment handed out or attached.
    last_end: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(filename: impl Into<String>, buffer: &'src str) -> Self {
        Lexer {
            file: SourceFile::new(filename, buffer),
            inner: RawToken::lexer(buffer),
            last_end: 0,
        }
    }

    fn error(&self, code: LexerErrorCode, span: Range<usize>, comments: &[Comment]) -> LexerError {
        LexerError {
            message: code.message().to_string(),
            code: Some(code),
            position: self.file.position(span.start),
            span,
            comments_start: comments.first().map(|comment| comment.pos),
        }
    }
}

impl<'src> TokenSource<'src> for Lexer<'src> {
    fn source(&self) -> &SourceFile<'src> {
        &self.file
    }

    fn next_token(&mut self) -> Result<Token<'src>, LexerError> {
        let buffer = self.file.buffer();
        let mut comments = Vec::new();

        loop {
            let Some(result) = self.inner.next() else {
                let mut eof = Token::eof(buffer.len());
                eof.comments = comments;
                return Ok(eof);
            };
            let span = self.inner.span();
            let slice = self.inner.slice();

            let raw = match result {
                Ok(raw) => raw,
                Err(code) => return Err(self.error(code, span, &comments)),
            };

            match raw.classify(slice) {
                Lexeme::Comment => {
                    comments.push(Comment {
                        raw: slice,
                        pos: span.start,
                        space: &buffer[self.last_end..span.start],
                    });
                    self.last_end = span.end;
                }
                Lexeme::Token(kind) => {
                    trace!("lexed {} {:?} at {:?}", kind, slice, span);
                    self.last_end = span.end;
                    return Ok(Token {
                        kind,
                        raw: slice,
                        pos: span.start,
                        end: span.end,
                        comments,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::token::{Symbol, TokenKind};

    fn lex(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new("", source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let eof = tok.is_eof();
            tokens.push(tok);
            if eof {
                return tokens;
            }
        }
    }

    #[test]
    fn test_tokens_and_offsets() {
        let tokens = lex("SELECT @p, x");
        let summary: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.raw, t.pos, t.end))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Keyword, "SELECT", 0, 6),
                (TokenKind::Param, "@p", 7, 9),
                (TokenKind::Symbol(Symbol::Comma), ",", 9, 10),
                (TokenKind::Ident, "x", 11, 12),
                (TokenKind::Eof, "", 12, 12),
            ]
        );
    }

    #[test]
    fn test_comments_attach_to_next_token() {
        let tokens = lex("SELECT /* a */ -- b\n  1");
        assert!(tokens[0].comments.is_empty());
        assert_eq!(
            tokens[1].comments,
            vec![
                Comment {
                    raw: "/* a */",
                    pos: 7,
                    space: " ",
                },
                Comment {
                    raw: "-- b\n",
                    pos: 15,
                    space: " ",
                },
            ]
        );
        assert_eq!(tokens[1].raw, "1");
    }

    #[test]
    fn test_trailing_comment_attaches_to_eof() {
        let tokens = lex("SELECT 1 // comment");
        let eof = tokens.last().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.pos, 19);
        assert_eq!(eof.comments.len(), 1);
        assert_eq!(eof.comments[0].raw, "// comment");
        assert_eq!(eof.comments[0].space, " ");
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("", "1");
        assert_eq!(lexer.next_token().unwrap().raw, "1");
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_error_span_and_position() {
        let mut lexer = Lexer::new("q.sql", "SELECT\n  \"123");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.code, Some(LexerErrorCode::UnclosedString));
        assert_eq!(err.span, 9..13);
        assert_eq!(err.to_string(), "syntax error: q.sql:2:3: unclosed string literal");
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("", "SELECT $");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.code, Some(LexerErrorCode::InvalidCharacter));
        assert_eq!(err.span, 7..8);
        assert_eq!(err.comments_start, None);
    }

    #[test]
    fn test_error_remembers_leading_comments() {
        let mut lexer = Lexer::new("", "SELECT 1;\n-- note\n/* more */ 'abc");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.span, 29..33);
        assert_eq!(err.comments_start, Some(10));
        assert_eq!(err.leading_pos(), 10);
    }
}
