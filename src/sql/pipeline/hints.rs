//! Hint stripping
//!
//! Removes `@{ ... }` hint blocks from a token stream. The filter is a three-state
//! automaton:
//!
//!     Normal     --@-->  PendingAt   (the `@` is held back, not yet yielded)
//!     PendingAt  --{-->  InHint      (`@` and `{` are dropped, their comments kept)
//!     PendingAt  --x-->  Normal      (bare `@`: yield it, then reprocess x)
//!     InHint     --}-->  Normal      (`}` dropped)
//!     InHint     --eof-> unclosed hint error
//!     InHint     --x-->  InHint      (x dropped, its comments kept)
//!
//! Comments of every dropped token are collected and prepended to the comments of the next
//! surviving token, so the output is a subsequence of the input with nothing reordered and
//! no comment lost.
//!
//! Nested braces are not tracked: the first `}` inside a hint closes it.

use crate::sql::error::Error;
use crate::sql::pipeline::stream::TokenSeq;
use crate::sql::source::SourceFile;
use crate::sql::token::{Comment, Symbol, Token};
use log::{debug, trace};
use std::iter::FusedIterator;
use std::mem;

enum HintState<'src> {
    Normal,
    PendingAt(Token<'src>),
    /// Inside a hint opened by an `@` at this offset.
    InHint(usize),
}

/// Stream stage that elides hint tokens.
pub struct StripHints<'src, S> {
    inner: S,
    state: HintState<'src>,
    pending_comments: Vec<Comment<'src>>,
    /// An item pulled while resolving a bare `@`, to be processed on the next call.
    stashed: Option<Result<Token<'src>, Error>>,
    done: bool,
}

impl<'src, S: TokenSeq<'src>> StripHints<'src, S> {
    pub fn new(inner: S) -> Self {
        StripHints {
            inner,
            state: HintState::Normal,
            pending_comments: Vec::new(),
            stashed: None,
            done: false,
        }
    }

    fn finish(&mut self, item: Result<Token<'src>, Error>) -> Option<Result<Token<'src>, Error>> {
        self.done = true;
        Some(item)
    }

    fn unclosed_hint(
        &mut self,
        start: usize,
        cause: Option<Error>,
    ) -> Option<Result<Token<'src>, Error>> {
        let position = self.inner.file().position(start);
        debug!("unclosed hint opened at {}", position);
        let error = match cause {
            None => Error::UnclosedHint {
                position,
                cause: None,
            },
            Some(Error::Lexer(err)) => Error::UnclosedHint {
                position,
                cause: Some(err),
            },
            Some(other) => other,
        };
        self.finish(Err(error))
    }
}

impl<'src, S: TokenSeq<'src>> Iterator for StripHints<'src, S> {
    type Item = Result<Token<'src>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let item = match self.stashed.take() {
                Some(item) => item,
                None => match self.inner.next() {
                    Some(item) => item,
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };

            match mem::replace(&mut self.state, HintState::Normal) {
                HintState::InHint(start) => match item {
                    Err(err) => return self.unclosed_hint(start, Some(err)),
                    Ok(tok) if tok.is_eof() => {
                        self.pending_comments.extend(tok.comments);
                        return self.unclosed_hint(start, None);
                    }
                    Ok(mut tok) => {
                        self.pending_comments.extend(mem::take(&mut tok.comments));
                        if tok.is_symbol(Symbol::RBrace) {
                            trace!("hint closed at {}", tok.pos);
                        } else {
                            self.state = HintState::InHint(start);
                        }
                    }
                },
                HintState::PendingAt(at) => match item {
                    Ok(tok) if tok.is_symbol(Symbol::LBrace) => {
                        trace!("hint opened at {}", at.pos);
                        self.pending_comments.extend(at.comments);
                        self.pending_comments.extend(tok.comments);
                        self.state = HintState::InHint(at.pos);
                    }
                    other => {
                        self.stashed = Some(other);
                        return Some(Ok(at));
                    }
                },
                HintState::Normal => match item {
                    Err(Error::Lexer(mut err)) => {
                        if let Some(first) = self.pending_comments.first() {
                            err.comments_start = Some(first.pos);
                        }
                        return self.finish(Err(Error::Lexer(err)));
                    }
                    Err(err) => return self.finish(Err(err)),
                    Ok(mut tok) => {
                        if !self.pending_comments.is_empty() {
                            let mut comments = mem::take(&mut self.pending_comments);
                            comments.append(&mut tok.comments);
                            tok.comments = comments;
                        }

                        if tok.is_symbol(Symbol::At) {
                            self.state = HintState::PendingAt(tok);
                            continue;
                        }
                        if tok.is_eof() {
                            return self.finish(Ok(tok));
                        }
                        return Some(Ok(tok));
                    }
                },
            }
        }
    }
}

impl<'src, S: TokenSeq<'src>> FusedIterator for StripHints<'src, S> {}

impl<'src, S: TokenSeq<'src>> TokenSeq<'src> for StripHints<'src, S> {
    fn file(&self) -> &SourceFile<'src> {
        self.inner.file()
    }
}
