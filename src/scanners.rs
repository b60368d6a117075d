//! Line-shape scanners for the block tokenizer and the autolink rule.
//!
//! Every scanner takes one terminator-free line.  Lines have already been
//! through escape resolution, so an escaped character is preceded by
//! [`ESCAPE_MARK`] and never satisfies a structural probe.

use crate::parser::admonition::BoxKind;
use crate::strings::{is_space_or_tab, ESCAPE_MARK};

/// The exact line that marks where the footnote section goes.
pub const FOOTNOTE_SLOT_LINE: &str = "///Footnotes Go Here///";

/// A run of three or more backticks opening a fenced code block.  Returns
/// the fence length; the rest of the line is the info string.
pub fn open_code_fence(line: &str) -> Option<usize> {
    let n = leading_run(line, b'`');
    if n >= 3 {
        Some(n)
    } else {
        None
    }
}

/// A run of three or more backticks with nothing but whitespace after it.
/// Returns the run length; the caller compares it against the opening
/// fence's.
pub fn close_code_fence(line: &str) -> Option<usize> {
    let n = leading_run(line, b'`');
    if n >= 3 && line.as_bytes()[n..].iter().all(|&b| is_space_or_tab(b)) {
        Some(n)
    } else {
        None
    }
}

/// Three or more of the same character among `-`, `_`, `*`, alone on the
/// line apart from whitespace.
pub fn thematic_break(line: &str) -> bool {
    let bytes = line.as_bytes();
    let c = match bytes.first() {
        Some(&c @ (b'-' | b'_' | b'*')) => c,
        _ => return false,
    };

    let mut count = 0;
    for &b in bytes {
        if b == c {
            count += 1;
        } else if !is_space_or_tab(b) {
            return false;
        }
    }
    count >= 3
}

/// A run of 1 to 6 `>` markers.  Returns the quote level and the content
/// offset; a seventh and later marker stays in the content.  One space
/// after the counted markers is consumed.
pub fn blockquote_start(line: &str) -> Option<(u8, usize)> {
    let n = leading_run(line, b'>');
    if n == 0 {
        return None;
    }

    let level = n.min(6);
    let mut offset = level;
    if n == level && line.as_bytes().get(offset) == Some(&b' ') {
        offset += 1;
    }
    Some((level as u8, offset))
}

/// `- ` starting a bullet list item.  Returns the content offset.
pub fn bullet_item(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.first() == Some(&b'-') && bytes.get(1).map_or(false, |&b| is_space_or_tab(b)) {
        Some(2)
    } else {
        None
    }
}

/// `N. ` starting an ordered list item.  Returns the ordinal and the
/// content offset.  Ordinals longer than nine digits are not list items.
pub fn ordered_item(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    if bytes.get(digits) != Some(&b'.') {
        return None;
    }
    if !bytes.get(digits + 1).map_or(false, |&b| is_space_or_tab(b)) {
        return None;
    }

    let ordinal = line[..digits].parse().ok()?;
    Some((ordinal, digits + 2))
}

/// A `#`-marked heading opener.  Returns the level and the offset of the
/// title text.  Seven or more `#`s, or a missing space, is not a heading.
pub fn atx_heading_start(line: &str) -> Option<(u8, usize)> {
    let bytes = line.as_bytes();
    let n = leading_run(line, b'#');
    if n == 0 || n > 6 {
        return None;
    }

    let mut offset = n;
    if offset == line.len() {
        return Some((n as u8, offset));
    }
    if !is_space_or_tab(bytes[offset]) {
        return None;
    }
    while offset < line.len() && is_space_or_tab(bytes[offset]) {
        offset += 1;
    }
    Some((n as u8, offset))
}

/// A line whose first token is digits-and-dots followed by whitespace: a
/// candidate outline heading.  Returns the token's end offset.  Whether the
/// token is a *valid* outline prefix is decided by [`outline_level`].
pub fn outline_candidate(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if !bytes.first().map_or(false, |b| b.is_ascii_digit()) {
        return None;
    }

    let end = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_digit() || b == b'.')
        .count();
    if bytes.get(end).map_or(false, |&b| is_space_or_tab(b)) {
        Some(end)
    } else {
        None
    }
}

/// Validates an outline numbering prefix: digit groups separated by single
/// dots, no leading or trailing dot, at most six groups.  Returns the
/// heading level (the group count).
pub fn outline_level(prefix: &str) -> Option<u8> {
    let bytes = prefix.as_bytes();
    if bytes.is_empty() || bytes[0] == b'.' || bytes[bytes.len() - 1] == b'.' {
        return None;
    }

    let mut groups: u8 = 1;
    let mut prev_dot = false;
    for &b in bytes {
        match b {
            b'.' => {
                if prev_dot {
                    return None;
                }
                prev_dot = true;
                groups += 1;
            }
            b if b.is_ascii_digit() => prev_dot = false,
            _ => return None,
        }
        if groups > 6 {
            return None;
        }
    }
    Some(groups)
}

/// `!!! kind "title"`.  Returns the kind and the optional title;
/// `Some("")` is an explicit empty title.  A bare `!!!` is not an
/// admonition (it is a box delimiter), and a malformed title makes the
/// whole line ordinary text.
pub fn admonition_start(line: &str) -> Option<(&str, Option<&str>)> {
    let rest = line.strip_prefix("!!!")?;
    let rest = rest.strip_prefix([' ', '\t'])?;
    let rest = rest.trim_start_matches([' ', '\t']);

    let kind_len = rest
        .bytes()
        .take_while(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        .count();
    if kind_len == 0 {
        return None;
    }
    let (kind, mut after) = rest.split_at(kind_len);

    after = after.trim_end_matches([' ', '\t']);
    if after.is_empty() {
        return Some((kind, None));
    }

    let after = after.strip_prefix([' ', '\t'])?;
    let after = after.trim_start_matches([' ', '\t']);
    if after.len() >= 2 && after.starts_with('"') && after.ends_with('"') {
        Some((kind, Some(&after[1..after.len() - 1])))
    } else {
        None
    }
}

/// A bordered-box delimiter: exactly `!!!` (alert) or `!!` (notice), with
/// only trailing whitespace allowed.
pub fn box_delimiter(line: &str) -> Option<BoxKind> {
    match line.trim_end_matches([' ', '\t']) {
        "!!!" => Some(BoxKind::Alert),
        "!!" => Some(BoxKind::Notice),
        _ => None,
    }
}

/// `[^name]: body` — a footnote definition.  Returns the name and the
/// body text (which may be empty).
pub fn footnote_definition(line: &str) -> Option<(&str, &str)> {
    let inner_start = line.strip_prefix("[^").map(|_| 2)?;
    let close = find_unescaped(line, inner_start, b']')?;
    if close == inner_start {
        return None;
    }
    if line.as_bytes().get(close + 1) != Some(&b':') {
        return None;
    }

    let name = &line[inner_start..close];
    let body = line[close + 2..].trim_start_matches([' ', '\t']);
    Some((name, body))
}

/// `[key]: target` — a link definition.  Returns the key and the target.
/// A key starting with `^` is a footnote definition instead, and an empty
/// target makes the line ordinary text.
pub fn link_definition(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'[') || bytes.get(1) == Some(&b'^') {
        return None;
    }
    let close = find_unescaped(line, 1, b']')?;
    if close == 1 {
        return None;
    }
    if bytes.get(close + 1) != Some(&b':') {
        return None;
    }

    let key = &line[1..close];
    let target = line[close + 2..].trim_matches([' ', '\t']);
    if target.is_empty() {
        return None;
    }
    Some((key, target))
}

/// `*[key]: expansion` — an abbreviation definition.  Returns the key and
/// the expansion (which may be empty).
pub fn abbreviation_definition(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with("*[") {
        return None;
    }
    let close = find_unescaped(line, 2, b']')?;
    if close == 2 {
        return None;
    }
    if line.as_bytes().get(close + 1) != Some(&b':') {
        return None;
    }

    let key = &line[2..close];
    let expansion = line[close + 2..].trim_matches([' ', '\t']);
    Some((key, expansion))
}

/// The footnote placement marker line.
pub fn footnote_slot(line: &str) -> bool {
    line.trim_end_matches([' ', '\t']) == FOOTNOTE_SLOT_LINE
}

/// A URI scheme at the start of `s`: an ASCII letter, 1 to 31 further
/// scheme characters, then `:`.  Returns the offset just past the colon.
pub fn scheme(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.first().map_or(false, |b| b.is_ascii_alphabetic()) {
        return None;
    }

    let len = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'+' || b == b'.' || b == b'-')
        .count();
    if !(2..=32).contains(&len) {
        return None;
    }
    if bytes.get(len) == Some(&b':') {
        Some(len + 1)
    } else {
        None
    }
}

/// Finds `target` at or after `from`, skipping characters guarded by
/// [`ESCAPE_MARK`].
pub fn find_unescaped(s: &str, from: usize, target: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == ESCAPE_MARK {
            i += 1 + s[i + 1..].chars().next().map_or(0, char::len_utf8);
        } else if bytes[i] == target {
            return Some(i);
        } else {
            i += s[i..].chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

fn leading_run(line: &str, c: u8) -> usize {
    line.as_bytes().iter().take_while(|&&b| b == c).count()
}
