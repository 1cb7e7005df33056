//! Canonical reconstruction
//!
//! Comments and original whitespace are dropped and tokens are re-joined with one space,
//! unless an adjacency rule says otherwise. The rules are evaluated for each consecutive
//! pair (previous, current) by [`Spacing`]:
//!
//!     keep a space      where joining would change the lexing: `--`, `/*`, `//`, two
//!                       operator characters that form a longer operator, a number
//!                       touching a dot
//!     no space after    `(` `{` `[` `.`
//!     no space before   `)` `}` `]` `.` `,` `:` `;` `[`
//!     no space          `x@` and `)@` (table hints), `@{`, `=` inside a hint,
//!                       `<` `<>` `>` `>>` of a compound type (`ARRAY<STRUCT<x INT64>>`),
//!                       `UNNEST(` `WITH(` `STRUCT(` `ARRAY(` `CAST(`,
//!                       after a unary `-`,
//!                       `name(` when the source had no gap (except `STORING (`)
//!     newline           between a `;` and the next statement
//!
//! State is tracked per statement and reset at each `;`.

use crate::sql::error::Error;
use crate::sql::pipeline::TokenSeq;
use crate::sql::token::{Symbol, Token, TokenKind};

/// What goes between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    None,
    Space,
    Newline,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Space => " ",
            Separator::Newline => "\n",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Seen<'src> {
    kind: TokenKind,
    raw: &'src str,
    end: usize,
}

impl Seen<'_> {
    fn is(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    fn is_keyword(&self, words: &[&str]) -> bool {
        self.kind == TokenKind::Keyword && words.iter().any(|w| self.raw.eq_ignore_ascii_case(w))
    }
}

const TYPE_CONSTRUCTORS: &[&str] = &["ARRAY", "STRUCT"];
const CALL_LIKE_KEYWORDS: &[&str] = &["UNNEST", "WITH", "STRUCT", "ARRAY", "CAST"];

/// Spacing state for one statement.
#[derive(Debug, Clone, Default)]
pub struct Spacing<'src> {
    /// Open `<` of compound types.
    type_depth: usize,
    /// Open `{` of hints.
    hint_depth: usize,
    prev: Option<Seen<'src>>,
    before_prev: Option<TokenKind>,
    after_terminator: bool,
}

impl<'src> Spacing<'src> {
    pub fn new() -> Self {
        Spacing::default()
    }

    /// The separator to emit before `cur`.
    pub fn separator(&self, cur: &Token<'src>) -> Separator {
        let Some(prev) = self.prev else {
            return if self.after_terminator {
                Separator::Newline
            } else {
                Separator::None
            };
        };

        if would_merge(&prev, cur) {
            return Separator::Space;
        }
        if self.joins(&prev, cur) {
            Separator::None
        } else {
            Separator::Space
        }
    }

    fn joins(&self, prev: &Seen<'src>, cur: &Token<'src>) -> bool {
        use Symbol::*;

        let cur_symbol = match cur.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        };
        let prev_symbol = match prev.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        };

        if prev_symbol.map_or(false, Symbol::is_open) || prev.is(Dot) {
            return true;
        }
        if cur_symbol.map_or(false, Symbol::is_close)
            || matches!(cur_symbol, Some(Dot | Comma | Colon | Semicolon | LBracket))
        {
            return true;
        }

        match cur_symbol {
            Some(At) if prev.kind == TokenKind::Ident || prev.is(RParen) => return true,
            Some(LBrace) if prev.is(At) => return true,
            _ => {}
        }

        if self.hint_depth > 0 && (prev.is(Eq) || cur_symbol == Some(Eq)) {
            return true;
        }

        match cur_symbol {
            Some(Lt) if self.opens_type() => return true,
            Some(LtGt) if prev.is_keyword(TYPE_CONSTRUCTORS) => return true,
            Some(Gt | Shr) if self.type_depth > 0 => return true,
            _ => {}
        }
        if prev.is(Lt) && self.type_depth > 0 {
            return true;
        }

        if cur_symbol == Some(LParen) {
            if prev.is_keyword(CALL_LIKE_KEYWORDS) {
                return true;
            }
            if prev.kind == TokenKind::Ident
                && cur.pos == prev.end
                && !prev.raw.eq_ignore_ascii_case("STORING")
            {
                return true;
            }
        }

        prev.is(Minus) && self.is_unary_position()
    }

    /// True if the previous token, a `-`, starts an operand rather than joining two.
    fn is_unary_position(&self) -> bool {
        match self.before_prev {
            None => true,
            Some(TokenKind::Symbol(symbol)) => {
                matches!(symbol, Symbol::LParen | Symbol::LBracket | Symbol::Comma)
            }
            Some(_) => false,
        }
    }

    fn opens_type(&self) -> bool {
        self.type_depth > 0 || self.prev.map_or(false, |p| p.is_keyword(TYPE_CONSTRUCTORS))
    }

    /// Record `cur` as emitted.
    pub fn observe(&mut self, cur: &Token<'src>) {
        if cur.is_terminator() {
            *self = Spacing {
                after_terminator: true,
                ..Spacing::default()
            };
            return;
        }

        match cur.kind {
            TokenKind::Symbol(Symbol::Lt) if self.opens_type() => self.type_depth += 1,
            TokenKind::Symbol(Symbol::Gt) => self.type_depth = self.type_depth.saturating_sub(1),
            TokenKind::Symbol(Symbol::Shr) => self.type_depth = self.type_depth.saturating_sub(2),
            TokenKind::Symbol(Symbol::LBrace)
                if self.hint_depth > 0 || self.prev.map_or(false, |p| p.is(Symbol::At)) =>
            {
                self.hint_depth += 1
            }
            TokenKind::Symbol(Symbol::RBrace) => {
                self.hint_depth = self.hint_depth.saturating_sub(1)
            }
            _ => {}
        }

        self.before_prev = self.prev.map(|p| p.kind);
        self.prev = Some(Seen {
            kind: cur.kind,
            raw: cur.raw,
            end: cur.end,
        });
    }
}

/// Joining `prev` and `cur` without a space would lex differently.
fn would_merge(prev: &Seen<'_>, cur: &Token<'_>) -> bool {
    let (Some(last), Some(first)) = (prev.raw.chars().last(), cur.raw.chars().next()) else {
        return false;
    };

    let numeric = matches!(prev.kind, TokenKind::Int | TokenKind::Float);
    matches!(
        (last, first),
        ('-', '-')
            | ('/', '*')
            | ('/', '/')
            | ('<', '=')
            | ('<', '>')
            | ('<', '<')
            | ('>', '=')
            | ('>', '>')
            | ('=', '>')
            | ('|', '|')
    ) || (prev.is(Symbol::Dot) && first.is_ascii_digit())
        || (numeric && first == '.')
}

/// Render a token stream in canonical form.
pub fn unlex<'src, S: TokenSeq<'src>>(tokens: S) -> Result<String, Error> {
    let mut out = String::new();
    let mut spacing = Spacing::new();

    for item in tokens {
        let tok = item?;
        if tok.is_eof() {
            break;
        }
        out.push_str(spacing.separator(&tok).as_str());
        out.push_str(tok.raw);
        spacing.observe(&tok);
    }

    Ok(out)
}
