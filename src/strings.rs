//! String-level preprocessing and shared text helpers.
//!
//! The preprocessing passes run over the whole document before any block
//! structure is recognized, in this order: [`resolve_escapes`],
//! [`strip_strong_comments`], [`strip_html_comments`].

/// Marks the character that follows it as escaped.  Inserted by
/// [`resolve_escapes`] in place of a backslash; stripped whenever text
/// reaches an output sink.
pub const ESCAPE_MARK: u8 = 0x02;

/// Rewrites backslash escapes into [`ESCAPE_MARK`]-prefixed characters so
/// later passes can treat a marked character as inert without re-checking
/// for backslashes.
///
/// Any `ESCAPE_MARK` byte already present in the input is scrubbed, so a
/// mark in the output always means "the author escaped this".  NUL is
/// replaced with U+FFFD.  A backslash at end of input is literal, and a
/// backslash before a line ending disappears while the line ending stays.
pub fn resolve_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\0' => out.push('\u{fffd}'),
            '\u{2}' => (),
            '\\' => match chars.next() {
                None => out.push('\\'),
                Some(c2 @ ('\r' | '\n')) => out.push(c2),
                Some('\u{2}') => (),
                Some('\0') => {
                    out.push(ESCAPE_MARK as char);
                    out.push('\u{fffd}');
                }
                Some(c2) => {
                    out.push(ESCAPE_MARK as char);
                    out.push(c2);
                }
            },
            _ => out.push(c),
        }
    }

    out
}

/// Removes `|=` … `=|` comment spans, delimiters included.  The span may
/// cross line endings, and an unterminated opener removes everything
/// through end of input.  Escaped delimiter characters neither open nor
/// close a span.
pub fn strip_strong_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if bytes[i] == ESCAPE_MARK {
            let n = char_len_at(input, i + 1);
            out.push_str(&input[i..i + 1 + n]);
            i += 1 + n;
        } else if bytes[i] == b'|' && bytes.get(i + 1) == Some(&b'=') {
            i = match scan_past_closer(input, i + 2, b'=', b'|') {
                Some(end) => end,
                None => input.len(),
            };
        } else {
            let n = char_len_at(input, i);
            out.push_str(&input[i..i + n]);
            i += n;
        }
    }

    out
}

/// Removes `<!--` … `-->` comment spans, delimiters included.  The span may
/// cross line endings.  Unlike strong comments, an opener with no closer is
/// left in the text as-is.
pub fn strip_html_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if bytes[i] == ESCAPE_MARK {
            let n = char_len_at(input, i + 1);
            out.push_str(&input[i..i + 1 + n]);
            i += 1 + n;
        } else if bytes[i..].starts_with(b"<!--") {
            match scan_past_html_closer(input, i + 4) {
                Some(end) => i = end,
                None => {
                    out.push_str(&input[i..]);
                    break;
                }
            }
        } else {
            let n = char_len_at(input, i);
            out.push_str(&input[i..i + n]);
            i += n;
        }
    }

    out
}

// Finds the two-byte closer starting at `from`, skipping escaped characters,
// and returns the index just past it.
fn scan_past_closer(s: &str, from: usize, c0: u8, c1: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut j = from;

    while j < s.len() {
        if bytes[j] == ESCAPE_MARK {
            j += 1 + char_len_at(s, j + 1);
        } else if bytes[j] == c0 && bytes.get(j + 1) == Some(&c1) {
            return Some(j + 2);
        } else {
            j += char_len_at(s, j);
        }
    }

    None
}

fn scan_past_html_closer(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut j = from;

    while j < s.len() {
        if bytes[j] == ESCAPE_MARK {
            j += 1 + char_len_at(s, j + 1);
        } else if bytes[j..].starts_with(b"-->") {
            return Some(j + 3);
        } else {
            j += char_len_at(s, j);
        }
    }

    None
}

// `i` must lie on a char boundary; returns 0 at end of input.
fn char_len_at(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return 0;
    }
    match s[i..].chars().next() {
        Some(c) => c.len_utf8(),
        None => 0,
    }
}

/// Drops every [`ESCAPE_MARK`], leaving the characters they protected as
/// plain text.  The final step for any text bound for an output sink.
pub fn unescape(s: &str) -> String {
    if !s.as_bytes().contains(&ESCAPE_MARK) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c != ESCAPE_MARK as char {
            out.push(c);
        }
    }
    out
}

pub fn trim_start_match<'s>(s: &'s str, pat: &str) -> &'s str {
    s.strip_prefix(pat).unwrap_or(s)
}

pub fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, 9 | 32)
}

pub fn is_blank(s: &str) -> bool {
    s.bytes().all(is_space_or_tab)
}

pub fn rtrim(line: &mut String) {
    let trimmed = line.trim_end_matches([' ', '\t']).len();
    line.truncate(trimmed);
}

/// Removes an optional closing run of `#`s from ATX heading content.  The
/// run only counts when separated from the content by whitespace; a heading
/// consisting solely of `#`s keeps them.
pub fn chop_trailing_hashtags(line: &mut String) {
    rtrim(line);

    if line.is_empty() {
        return;
    }

    let bytes = line.as_bytes();
    let orig_n = line.len() - 1;
    let mut n = orig_n;

    while bytes[n] == b'#' {
        if n == 0 {
            return;
        }
        n -= 1;
    }

    if n != orig_n && is_space_or_tab(bytes[n]) {
        line.truncate(n);
        rtrim(line);
    }
}
