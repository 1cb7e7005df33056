//! Token source adapter
//!
//! Turns the pull-one-token interface of a [`TokenSource`] into a fused iterator of
//! `Result<Token, Error>`:
//!
//! - the end-of-input token is yielded once, then the stream ends
//! - an analyzer failure is yielded once as `Err`, then the stream ends
//!
//! Each `next()` pulls exactly one token, so a consumer that stops early never makes the
//! analyzer scan past what it asked for.

use crate::sql::error::Error;
use crate::sql::lexing::TokenSource;
use crate::sql::source::SourceFile;
use crate::sql::token::Token;
use log::debug;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A composable token stream stage.
pub trait TokenSeq<'src>: Iterator<Item = Result<Token<'src>, Error>> {
    /// The buffer the tokens point into.
    fn file(&self) -> &SourceFile<'src>;
}

/// Adapter from a [`TokenSource`] to a [`TokenSeq`].
pub struct TokenStream<'src, S> {
    source: S,
    done: bool,
    _src: PhantomData<&'src str>,
}

impl<'src, S: TokenSource<'src>> TokenStream<'src, S> {
    pub fn new(source: S) -> Self {
        TokenStream {
            source,
            done: false,
            _src: PhantomData,
        }
    }
}

impl<'src, S: TokenSource<'src>> Iterator for TokenStream<'src, S> {
    type Item = Result<Token<'src>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.source.next_token() {
            Ok(tok) => {
                self.done = tok.is_eof();
                Some(Ok(tok))
            }
            Err(err) => {
                debug!("token stream stopped: {}", err);
                self.done = true;
                Some(Err(Error::Lexer(err)))
            }
        }
    }
}

impl<'src, S: TokenSource<'src>> FusedIterator for TokenStream<'src, S> {}

impl<'src, S: TokenSource<'src>> TokenSeq<'src> for TokenStream<'src, S> {
    fn file(&self) -> &SourceFile<'src> {
        self.source.source()
    }
}
