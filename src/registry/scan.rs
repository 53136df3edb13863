//! Tokenizer and bracket matcher for registry documents.
//!
//! This is not a TypeScript lexer. It only knows enough to find token
//! boundaries reliably: comments, string and template literals are skipped
//! as opaque units so that brackets inside them never count towards
//! nesting depth.

use std::ops::Range;

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier or keyword (`[A-Za-z_$][A-Za-z0-9_$]*`).
    Ident,
    /// Single- or double-quoted string literal, quotes included.
    Str,
    /// Backtick template literal, backticks included.
    Template,
    /// Numeric literal.
    Number,
    /// The `=>` arrow.
    Arrow,
    /// Any other single character.
    Punct(char),
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self, src: &str, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(src) == name
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Splits `src` into tokens, skipping whitespace and comments.
///
/// Never fails: unterminated comments and literals simply run to the end of
/// their line (strings) or of the text (block comments, templates).
pub(crate) fn tokenize(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < src.len() {
        let c = match src[pos..].chars().next() {
            Some(c) => c,
            None => break,
        };

        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        let start = pos;
        let next = bytes.get(pos + 1).copied();

        let kind = match c {
            '/' if next == Some(b'/') => {
                pos = src[pos..].find('\n').map_or(src.len(), |i| pos + i);
                continue;
            }
            '/' if next == Some(b'*') => {
                pos = src[pos + 2..].find("*/").map_or(src.len(), |i| pos + 2 + i + 2);
                continue;
            }
            '"' | '\'' => {
                pos = skip_string(src, pos, c);
                TokenKind::Str
            }
            '`' => {
                pos = skip_template(src, pos);
                TokenKind::Template
            }
            '=' if next == Some(b'>') => {
                pos += 2;
                TokenKind::Arrow
            }
            c if is_ident_start(c) => {
                pos += src[pos..]
                    .find(|ch: char| !is_ident_continue(ch))
                    .unwrap_or(src.len() - pos);
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                pos += src[pos..]
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'))
                    .unwrap_or(src.len() - pos);
                TokenKind::Number
            }
            c => {
                pos += c.len_utf8();
                TokenKind::Punct(c)
            }
        };

        tokens.push(Token {
            kind,
            start,
            end: pos,
        });
    }

    tokens
}

/// Returns the offset just past a quoted string starting at `start`.
fn skip_string(src: &str, start: usize, quote: char) -> usize {
    let mut chars = src[start + 1..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => return start + 1 + i,
            c if c == quote => return start + 1 + i + 1,
            _ => {}
        }
    }
    src.len()
}

/// Returns the offset just past a template literal starting at `start`.
///
/// `${ ... }` substitutions are followed by brace counting only; nested
/// templates inside substitutions are not supported.
fn skip_template(src: &str, start: usize) -> usize {
    let mut chars = src[start + 1..].char_indices().peekable();
    let mut depth = 0usize;
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' if depth == 0 && chars.peek().map(|&(_, n)| n) == Some('{') => {
                chars.next();
                depth = 1;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '`' if depth == 0 => return start + 1 + i + 1,
            _ => {}
        }
    }
    src.len()
}

fn closer_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Finds the token index of the delimiter closing `tokens[open]`.
///
/// Tracks `()`, `[]` and `{}` on an explicit stack. Returns the byte offset
/// at which matching failed when a closer does not match the innermost open
/// delimiter, or when the tokens run out first.
pub(crate) fn match_delimiter(tokens: &[Token], open: usize, src_len: usize) -> Result<usize, usize> {
    let mut stack: Vec<char> = Vec::new();

    for (idx, token) in tokens.iter().enumerate().skip(open) {
        let TokenKind::Punct(c) = token.kind else {
            continue;
        };
        if let Some(closer) = closer_for(c) {
            stack.push(closer);
        } else if matches!(c, ')' | ']' | '}') {
            if stack.pop() != Some(c) {
                return Err(token.start);
            }
            if stack.is_empty() {
                return Ok(idx);
            }
        }
    }

    Err(src_len)
}

/// Splits the tokens strictly between `open` and `close` into depth-0
/// comma-separated runs.
///
/// Each run is returned as a token index range together with the index of
/// its terminating comma, if any. Empty runs (such as a dangling comma) are
/// returned as empty ranges so callers can detect them.
pub(crate) fn split_items(tokens: &[Token], open: usize, close: usize) -> Vec<(Range<usize>, Option<usize>)> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut item_start = open + 1;

    for idx in open + 1..close {
        match tokens[idx].kind {
            TokenKind::Punct('(' | '[' | '{') => depth += 1,
            TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            TokenKind::Punct(',') if depth == 0 => {
                items.push((item_start..idx, Some(idx)));
                item_start = idx + 1;
            }
            _ => {}
        }
    }

    if item_start < close {
        items.push((item_start..close, None));
    }

    items
}
