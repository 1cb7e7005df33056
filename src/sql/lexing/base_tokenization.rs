//! Base tokenization for the reference lexer
//!
//! This module defines the raw lexemes recognized by logos. Whitespace is skipped here;
//! comments are lexemes of their own so the [`Lexer`](super::Lexer) can attach them to the
//! token that follows. Literals whose end cannot be expressed as a regular expression
//! (strings, quoted identifiers, block comments) are finished by callbacks, which report
//! where they gave up through [`LexerErrorCode`].

use crate::sql::error::LexerErrorCode;
use crate::sql::token::{keywords, Symbol, TokenKind};
use logos::{Lexer, Logos};

/// Raw lexemes produced by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexerErrorCode)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    // Comments. Line comments keep their terminating newline.
    #[regex(r"--[^\n]*\n?")]
    #[regex(r"#[^\n]*\n?")]
    #[regex(r"//[^\n]*\n?")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // Words and parameters
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    #[token("`", quoted_identifier)]
    QuotedIdent,
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Param,

    // Numbers
    #[regex(r"[0-9]+")]
    #[regex(r"0[xX][0-9A-Fa-f]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    // Strings and bytes, with optional raw/bytes prefixes
    #[token("'", quoted_literal)]
    #[token("\"", quoted_literal)]
    #[regex(r#"[rR]['"]"#, quoted_literal)]
    String,
    #[regex(r#"([bB]|[rR][bB]|[bB][rR])['"]"#, quoted_literal)]
    Bytes,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    #[token("?")]
    Question,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<>")]
    LtGt,
    #[token("!=")]
    NotEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("||")]
    Concat,
    #[token("=>")]
    Arrow,
}

/// What a raw lexeme becomes once the lexer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    Comment,
    Token(TokenKind),
}

impl RawToken {
    pub fn classify(self, slice: &str) -> Lexeme {
        let kind = match self {
            RawToken::LineComment | RawToken::BlockComment => return Lexeme::Comment,
            RawToken::Word if keywords::is_reserved(slice) => TokenKind::Keyword,
            RawToken::Word | RawToken::QuotedIdent => TokenKind::Ident,
            RawToken::Param => TokenKind::Param,
            RawToken::Int => TokenKind::Int,
            RawToken::Float => TokenKind::Float,
            RawToken::String => TokenKind::String,
            RawToken::Bytes => TokenKind::Bytes,
            RawToken::LParen => TokenKind::Symbol(Symbol::LParen),
            RawToken::RParen => TokenKind::Symbol(Symbol::RParen),
            RawToken::LBracket => TokenKind::Symbol(Symbol::LBracket),
            RawToken::RBracket => TokenKind::Symbol(Symbol::RBracket),
            RawToken::LBrace => TokenKind::Symbol(Symbol::LBrace),
            RawToken::RBrace => TokenKind::Symbol(Symbol::RBrace),
            RawToken::Dot => TokenKind::Symbol(Symbol::Dot),
            RawToken::Comma => TokenKind::Symbol(Symbol::Comma),
            RawToken::Semicolon => TokenKind::Symbol(Symbol::Semicolon),
            RawToken::Colon => TokenKind::Symbol(Symbol::Colon),
            RawToken::At => TokenKind::Symbol(Symbol::At),
            RawToken::Question => TokenKind::Symbol(Symbol::Question),
            RawToken::Plus => TokenKind::Symbol(Symbol::Plus),
            RawToken::Minus => TokenKind::Symbol(Symbol::Minus),
            RawToken::Star => TokenKind::Symbol(Symbol::Star),
            RawToken::Slash => TokenKind::Symbol(Symbol::Slash),
            RawToken::Percent => TokenKind::Symbol(Symbol::Percent),
            RawToken::Tilde => TokenKind::Symbol(Symbol::Tilde),
            RawToken::Amp => TokenKind::Symbol(Symbol::Amp),
            RawToken::Pipe => TokenKind::Symbol(Symbol::Pipe),
            RawToken::Caret => TokenKind::Symbol(Symbol::Caret),
            RawToken::Eq => TokenKind::Symbol(Symbol::Eq),
            RawToken::Lt => TokenKind::Symbol(Symbol::Lt),
            RawToken::Gt => TokenKind::Symbol(Symbol::Gt),
            RawToken::Le => TokenKind::Symbol(Symbol::Le),
            RawToken::Ge => TokenKind::Symbol(Symbol::Ge),
            RawToken::LtGt => TokenKind::Symbol(Symbol::LtGt),
            RawToken::NotEq => TokenKind::Symbol(Symbol::NotEq),
            RawToken::Shl => TokenKind::Symbol(Symbol::Shl),
            RawToken::Shr => TokenKind::Symbol(Symbol::Shr),
            RawToken::Concat => TokenKind::Symbol(Symbol::Concat),
            RawToken::Arrow => TokenKind::Symbol(Symbol::Arrow),
        };
        Lexeme::Token(kind)
    }
}

fn block_comment(lex: &mut Lexer<RawToken>) -> Result<(), LexerErrorCode> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(idx) => {
            lex.bump(idx + 2);
            Ok(())
        }
        None => {
            lex.bump(rest.len());
            Err(LexerErrorCode::UnclosedComment)
        }
    }
}

fn quoted_identifier(lex: &mut Lexer<RawToken>) -> Result<(), LexerErrorCode> {
    match scan_single_line(lex.remainder(), '`') {
        Ok(len) => {
            lex.bump(len);
            Ok(())
        }
        Err(len) => {
            lex.bump(len);
            Err(LexerErrorCode::UnclosedIdentifier)
        }
    }
}

/// Finish a string or bytes literal whose opening quote (and prefix) was just matched.
fn quoted_literal(lex: &mut Lexer<RawToken>) -> Result<(), LexerErrorCode> {
    let quote = match lex.slice().chars().last() {
        Some(quote @ ('\'' | '"')) => quote,
        _ => return Err(LexerErrorCode::InvalidCharacter),
    };
    let rest = lex.remainder();

    let opener: String = [quote, quote].iter().collect();
    if let Some(body) = rest.strip_prefix(opener.as_str()) {
        lex.bump(opener.len());
        return match scan_triple(body, quote) {
            Ok(len) => {
                lex.bump(len);
                Ok(())
            }
            Err(len) => {
                lex.bump(len);
                Err(LexerErrorCode::UnclosedTripleQuotedString)
            }
        };
    }

    match scan_single_line(rest, quote) {
        Ok(len) => {
            lex.bump(len);
            Ok(())
        }
        Err(len) if rest[len..].starts_with('\n') => {
            lex.bump(len);
            Err(LexerErrorCode::UnclosedStringNewline)
        }
        Err(len) => {
            lex.bump(len);
            Err(LexerErrorCode::UnclosedString)
        }
    }
}

/// Scan a body closed by `quote` on the same line.
///
/// Returns the length including the closing quote, or, on failure, the length up to the
/// newline or end of input where scanning stopped. A backslash always escapes the next
/// character, raw literals included.
fn scan_single_line(body: &str, quote: char) -> Result<usize, usize> {
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                if let Some((_, '\n')) = chars.next() {
                    return Err(idx + 1);
                }
            }
            '\n' => return Err(idx),
            ch if ch == quote => return Ok(idx + ch.len_utf8()),
            _ => {}
        }
    }
    Err(body.len())
}

/// Scan a triple-quoted body. Newlines are allowed.
fn scan_triple(body: &str, quote: char) -> Result<usize, usize> {
    let closer: String = [quote, quote, quote].iter().collect();
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if body[idx..].starts_with(closer.as_str()) {
            return Ok(idx + closer.len());
        }
    }
    Err(body.len())
}
