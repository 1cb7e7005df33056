//! Comment-preserving reconstruction
//!
//! Source text between comments is copied verbatim, so whitespace, literals and line
//! structure survive untouched. The comments attached to a token are treated as one
//! group and replaced by a single separator:
//!
//!     - `\n` when a comment in the group, or the space between two of its comments,
//!       contains a newline; otherwise a space
//!     - nothing when the copied text already ends with that whitespace
//!     - at the head of a statement only the newline is kept, and only when something
//!       was written before it
//!
//! Whitespace between the group and its token is dropped. Comments before end-of-input
//! are dropped without a separator.

use crate::sql::error::Error;
use crate::sql::pipeline::TokenSeq;
use crate::sql::token::Comment;
use log::trace;

/// Remove comments from a token stream's source text.
pub fn strip_comments<'src, S: TokenSeq<'src>>(tokens: S) -> Result<String, Error> {
    let buffer = tokens.file().buffer();
    let mut out = String::with_capacity(buffer.len());
    let mut flushed = 0;
    let mut at_head = true;

    for item in tokens {
        let tok = item?;

        if let Some(first) = tok.comments.first() {
            out.push_str(buffer.get(flushed..first.pos).unwrap_or_default());
            flushed = tok.pos;

            if !tok.is_eof() {
                if let Some(separator) = group_separator(&tok.comments, at_head, &out) {
                    trace!(
                        "{} comment(s) before offset {} collapsed to {:?}",
                        tok.comments.len(),
                        tok.pos,
                        separator
                    );
                    out.push(separator);
                }
            }
        }

        if tok.is_eof() {
            out.push_str(buffer.get(flushed..tok.pos).unwrap_or_default());
            break;
        }
        at_head = tok.is_terminator();
    }

    Ok(out)
}

fn group_separator(comments: &[Comment<'_>], at_head: bool, out: &str) -> Option<char> {
    let newline = comments.iter().enumerate().any(|(idx, comment)| {
        comment.contains_newline() || (idx > 0 && comment.space.contains('\n'))
    });

    let separator = match (at_head, newline) {
        (true, false) => return None,
        (true, true) if out.is_empty() => return None,
        (_, true) => '\n',
        (false, false) => ' ',
    };

    match out.chars().last() {
        Some('\n') => None,
        Some(last) if separator == ' ' && last.is_whitespace() => None,
        _ => Some(separator),
    }
}
