//! Token types shared by the lexer, the stream filters and the reconstruction engine.
//!
//!     A token is a borrowed view into the source buffer: its raw text is a slice of the
//!     buffer and `[pos, end)` is the byte range of that slice. Whitespace is never a token.
//!     Comments are not tokens either; they ride on the token that follows them.
//!
//! Comments
//!
//!     Every comment scanned before a token is attached to it, in source order, together with
//!     the whitespace that preceded the comment. Comments before end-of-input are attached to
//!     the end-of-input token, so nothing the lexer skipped is lost.
//!
//! Kinds
//!
//!     The kind is deliberately coarse (identifier, reserved keyword, parameter, literal,
//!     symbol, end-of-input). The reconstruction rules only ever need to know which symbol a
//!     token is or which keyword it spells; they never need a grammar.

pub mod keywords;
pub mod symbol;

pub use symbol::Symbol;

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// End of input. `pos == end == buffer.len()`.
    Eof,
    /// Plain or back-quoted identifier, including non-reserved words like `STORING`.
    Ident,
    /// Reserved keyword, compared case-insensitively through its raw text.
    Keyword,
    /// Named query parameter, `@name`.
    Param,
    Int,
    Float,
    String,
    Bytes,
    Symbol(Symbol),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::Ident => write!(f, "<ident>"),
            TokenKind::Keyword => write!(f, "<keyword>"),
            TokenKind::Param => write!(f, "<param>"),
            TokenKind::Int => write!(f, "<int>"),
            TokenKind::Float => write!(f, "<float>"),
            TokenKind::String => write!(f, "<string>"),
            TokenKind::Bytes => write!(f, "<bytes>"),
            TokenKind::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// A comment attached to the token that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment<'src> {
    /// Comment text including its delimiters (and the trailing newline of a line comment).
    pub raw: &'src str,
    /// Byte offset of the first character of `raw`.
    pub pos: usize,
    /// Whitespace between the previous token or comment and this comment.
    pub space: &'src str,
}

impl<'src> Comment<'src> {
    pub fn contains_newline(&self) -> bool {
        self.raw.contains('\n')
    }
}

/// A single token with its source location and leading comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub raw: &'src str,
    pub pos: usize,
    pub end: usize,
    pub comments: Vec<Comment<'src>>,
}

impl<'src> Token<'src> {
    /// The end-of-input token for a buffer of `len` bytes.
    pub fn eof(len: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            raw: "",
            pos: len,
            end: len,
            comments: Vec::new(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.pos..self.end
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True for the statement terminator `;`.
    pub fn is_terminator(&self) -> bool {
        self.is_symbol(Symbol::Semicolon)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    /// True if this is the reserved keyword `word` (case-insensitive).
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.raw.eq_ignore_ascii_case(word)
    }

    /// Offset where this token's text begins, counting its leading comments.
    pub fn leading_pos(&self) -> usize {
        self.comments.first().map_or(self.pos, |comment| comment.pos)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} [{}, {})", self.kind, self.raw, self.pos, self.end)
    }
}
