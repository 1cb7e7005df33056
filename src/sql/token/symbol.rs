//! Punctuation and operator symbols

use serde::{Serialize, Serializer};
use std::fmt;

/// Every punctuation/operator token the lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Dot,
    Comma,
    Semicolon,
    Colon,
    At,
    Question,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Tilde,
    Amp,
    Pipe,
    Caret,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    /// `<>`
    LtGt,
    /// `!=`
    NotEq,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `||`
    Concat,
    /// `=>`
    Arrow,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Dot => ".",
            Symbol::Comma => ",",
            Symbol::Semicolon => ";",
            Symbol::Colon => ":",
            Symbol::At => "@",
            Symbol::Question => "?",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Percent => "%",
            Symbol::Tilde => "~",
            Symbol::Amp => "&",
            Symbol::Pipe => "|",
            Symbol::Caret => "^",
            Symbol::Eq => "=",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Le => "<=",
            Symbol::Ge => ">=",
            Symbol::LtGt => "<>",
            Symbol::NotEq => "!=",
            Symbol::Shl => "<<",
            Symbol::Shr => ">>",
            Symbol::Concat => "||",
            Symbol::Arrow => "=>",
        }
    }

    /// `(`, `[` and `{`
    pub fn is_open(self) -> bool {
        matches!(self, Symbol::LParen | Symbol::LBracket | Symbol::LBrace)
    }

    /// `)`, `]` and `}`
    pub fn is_close(self) -> bool {
        matches!(self, Symbol::RParen | Symbol::RBracket | Symbol::RBrace)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
