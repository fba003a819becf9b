//! Cursor over template text.
//! All matchers are anchored at the cursor and only report match length,
//! the parser decides whether to consume via [`Scanner::move_by`].
//! No matcher backtracks or looks further than its own construct.

use super::{Name, Position, SourceLocation};

pub struct Scanner<'a> {
    source: &'a str,
    position: Position,
}

// NB: When storing self.source to a name, prefer using a ref.
// `let src = &self.source` forbids any src usage after a mut call,
// while a copied `&'a str` would silently go stale after `move_by`.
impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: Default::default(),
        }
    }

    /// the remaining, unconsumed text
    pub fn source(&self) -> &'a str {
        self.source
    }
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
    pub fn starts_with(&self, pat: &str) -> bool {
        self.source.starts_with(pat)
    }
    pub fn current_position(&self) -> Position {
        self.position.clone()
    }
    pub fn get_location_from(&self, start: Position) -> SourceLocation {
        SourceLocation {
            start,
            end: self.current_position(),
        }
    }

    /// location of the next `size` bytes without consuming them
    pub fn peek_location(&self, size: usize) -> SourceLocation {
        let start = self.current_position();
        let mut end = start.clone();
        advance_position(&mut end, &self.source[..size]);
        SourceLocation { start, end }
    }

    /// consume `size` bytes and return the consumed text
    pub fn move_by(&mut self, size: usize) -> &'a str {
        let (consumed, rest) = self.source.split_at(size);
        advance_position(&mut self.position, consumed);
        self.source = rest;
        consumed
    }

    pub fn skip_whitespace(&mut self) -> usize {
        let n = leading_whitespace(self.source);
        if n > 0 {
            self.move_by(n);
        }
        n
    }

    /// length of the tag identifier right after `<`
    pub fn match_tag_name(&self) -> Option<usize> {
        let src = self.source.strip_prefix('<')?;
        match tag_name_length(src) {
            0 => None,
            l => Some(l + 1),
        }
    }

    /// `/>` or `>`, returns match length. 2 means self closing.
    pub fn match_start_tag_close(&self) -> Option<usize> {
        let source = &self.source;
        if source.starts_with("/>") {
            Some(2)
        } else if source.starts_with('>') {
            Some(1)
        } else {
            None
        }
    }

    /// `name ( ws* = ws* ( "v" | 'v' | bare ) )?`
    pub fn match_attribute(&self) -> Option<usize> {
        let src = &self.source;
        let name_len = src
            .find(|c: char| !is_attr_name_char(c))
            .unwrap_or(src.len());
        if name_len == 0 {
            return None;
        }
        let value_len = match_attr_value(&src[name_len..]).unwrap_or(0);
        Some(name_len + value_len)
    }

    /// `</name ws* >`, returns the tag name and the match length
    pub fn match_end_tag(&self) -> Option<(Name<'a>, usize)> {
        let src = self.source.strip_prefix("</")?;
        let l = tag_name_length(src);
        if l == 0 {
            return None;
        }
        let name = &src[..l];
        let rest = &src[l..];
        let ws = leading_whitespace(rest);
        if !rest[ws..].starts_with('>') {
            return None;
        }
        Some((name, 2 + l + ws + 1))
    }

    /// Returns the trimmed inner expression and the match length.
    /// The cursor must be at the open delimiter.
    pub fn match_interpolation(&self, delimiters: &(String, String)) -> Option<(&'a str, usize)> {
        let (open, close) = delimiters;
        debug_assert!(self.source.starts_with(open.as_str()));
        let body = &self.source[open.len()..];
        let i = body.find(close.as_str())?;
        Some((body[..i].trim(), open.len() + i + close.len()))
    }

    /// Length of the plain text run at the cursor. Searching starts one char
    /// past the cursor so a text run is never empty.
    pub fn find_text_end(&self, open_delimiter: &str) -> usize {
        let source = &self.source;
        let first = match source.chars().next() {
            Some(c) => c.len_utf8(),
            None => return 0,
        };
        let rest = &source[first..];
        // the delimiter is only searched up to the next tag
        let tag = rest.find('<').unwrap_or(rest.len());
        let end = if open_delimiter.is_empty() {
            tag
        } else {
            rest[..tag].find(open_delimiter).unwrap_or(tag)
        };
        end + first
    }
}

fn advance_position(pos: &mut Position, consumed: &str) {
    pos.offset += consumed.len();
    for c in consumed.chars() {
        if c == '\n' {
            pos.line += 1;
            pos.column = 1;
        } else {
            pos.column += 1;
        }
    }
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start_matches(|c: char| c.is_ascii_whitespace()).len()
}

fn tag_name_length(s: &str) -> usize {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return 0;
    }
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

fn is_attr_name_char(c: char) -> bool {
    !(c.is_ascii_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '='))
}

fn is_unquoted_value_char(c: char) -> bool {
    !(c.is_ascii_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '`'))
}

// the optional `ws* = ws* value` tail of an attribute
fn match_attr_value(s: &str) -> Option<usize> {
    let before_eq = leading_whitespace(s);
    let rest = s[before_eq..].strip_prefix('=')?;
    let after_eq = leading_whitespace(rest);
    let v = &rest[after_eq..];
    let value_len = match v.chars().next() {
        Some(q @ '"') | Some(q @ '\'') => v[1..].find(q)? + 2,
        _ => match v.find(|c: char| !is_unquoted_value_char(c)).unwrap_or(v.len()) {
            0 => return None,
            n => n,
        },
    };
    Some(before_eq + 1 + after_eq + value_len)
}
