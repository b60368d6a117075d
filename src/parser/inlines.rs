use std::cell::RefCell;

use rustc_hash::FxHashSet;

use crate::arena_tree::Node;
use crate::character_set::character_set;
use crate::nodes::{
    Ast, AstNode, NodeCode, NodeFootnoteReference, NodeLink, NodeValue, Sourcepos,
};
use crate::parser::math::{self, NodeMath};
#[cfg(feature = "shortcodes")]
use crate::parser::shortcodes::NodeShortCode;
use crate::parser::{scan_anchor_name, BrokenLinkReference, Definitions, Options};
use crate::scanners;
use crate::strings::{self, ESCAPE_MARK};
use crate::Arena;

// Nested spans resolve recursively; past this depth the content of a span
// is kept as plain text.  A non-contrived document nests nowhere near
// this deeply.
const MAX_INLINE_NESTING: usize = 64;

/// Resolves one block's content into inline children of `block`.
pub(crate) fn process<'a, 'o, 'c, 'd, 'i>(
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options<'c>,
    definitions: &'d Definitions,
    anchors: &'d FxHashSet<String>,
    block: &'a AstNode<'a>,
    content: &'i str,
    allow_weak_comments: bool,
) where
    'c: 'o,
{
    let sourcepos = block.data.borrow().sourcepos;
    let mut subject = Subject {
        arena,
        options,
        definitions,
        anchors,
        input: content,
        pos: 0,
        depth: 0,
        sourcepos,
        allow_weak_comments,
        special_chars: special_chars(),
    };
    while subject.parse_inline(block) {}
}

fn special_chars() -> [bool; 256] {
    #[allow(unused_mut)]
    let mut set = character_set(b"\x02\n`!*~=[{</");
    #[cfg(feature = "shortcodes")]
    {
        set[b':' as usize] = true;
    }
    set
}

pub struct Subject<'a, 'o, 'd, 'i, 'c> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options<'c>,
    definitions: &'d Definitions,
    anchors: &'d FxHashSet<String>,
    input: &'i str,
    pos: usize,
    depth: usize,
    sourcepos: Sourcepos,
    allow_weak_comments: bool,
    special_chars: [bool; 256],
}

impl<'a, 'o, 'd, 'i, 'c> Subject<'a, 'o, 'd, 'i, 'c>
where
    'c: 'o,
{
    pub fn parse_inline(&mut self, node: &'a AstNode<'a>) -> bool {
        let byte = match self.peek_byte() {
            None => return false,
            Some(b) => b,
        };

        let new_inl: Option<&'a AstNode<'a>> = match byte {
            b'\n' => {
                self.pos += 1;
                Some(self.make_inline(NodeValue::SoftBreak))
            }
            b'`' => Some(self.handle_backticks()),
            b'*' => Some(self.handle_stars()),
            b'~' => Some(self.handle_tildes()),
            b'=' => Some(self.handle_equals()),
            b'[' => Some(self.handle_bracket(false)),
            b'!' => {
                if self.byte_at(self.pos + 1) == Some(b'[') {
                    Some(self.handle_bracket(true))
                } else {
                    self.pos += 1;
                    Some(self.make_inline(NodeValue::Text("!".to_string())))
                }
            }
            b'{' => Some(self.handle_brace()),
            b'<' => Some(self.handle_autolink()),
            b'/' => self.handle_slash(node),
            #[cfg(feature = "shortcodes")]
            b':' => Some(self.handle_shortcode()),
            b if b == ESCAPE_MARK => self.handle_escaped(),
            _ => {
                let end = self.find_special_char();
                let text = self.input[self.pos..end].to_string();
                self.pos = end;
                Some(self.make_inline(NodeValue::Text(text)))
            }
        };

        if let Some(inl) = new_inl {
            node.append(inl);
        }
        true
    }

    fn make_inline(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena.alloc(Node::new(RefCell::new(Ast {
            value,
            sourcepos: self.sourcepos,
            content: String::new(),
        })))
    }

    /// Resolves `input[from..to]` into children of `node` with a fresh
    /// scanner.
    fn resolve_into(&self, node: &'a AstNode<'a>, from: usize, to: usize) {
        if self.depth >= MAX_INLINE_NESTING {
            let literal = strings::unescape(&self.input[from..to]);
            node.append(self.make_inline(NodeValue::Text(literal)));
            return;
        }

        let mut child = Subject {
            arena: self.arena,
            options: self.options,
            definitions: self.definitions,
            anchors: self.anchors,
            input: &self.input[from..to],
            pos: 0,
            depth: self.depth + 1,
            sourcepos: self.sourcepos,
            allow_weak_comments: self.allow_weak_comments,
            special_chars: self.special_chars,
        };
        while child.parse_inline(node) {}
    }

    // An escape mark guards exactly one literal character.
    fn handle_escaped(&mut self) -> Option<&'a AstNode<'a>> {
        match self.input[self.pos + 1..].chars().next() {
            Some(c) => {
                self.pos += 1 + c.len_utf8();
                Some(self.make_inline(NodeValue::Text(c.to_string())))
            }
            None => {
                self.pos += 1;
                None
            }
        }
    }

    /// A code span runs from one backtick to the next unescaped backtick;
    /// with no closer the backtick is literal.  The span's content selects
    /// the payload: `{…}` emphasized code, `$…$` math, `¥…¥` function
    /// plot, anything else plain code.
    fn handle_backticks(&mut self) -> &'a AstNode<'a> {
        let open = self.pos;
        match scanners::find_unescaped(self.input, open + 1, b'`') {
            None => {
                self.pos += 1;
                self.make_inline(NodeValue::Text("`".to_string()))
            }
            Some(close) => {
                self.pos = close + 1;
                self.code_span_payload(open + 1, close)
            }
        }
    }

    fn code_span_payload(&self, from: usize, to: usize) -> &'a AstNode<'a> {
        let span = &self.input[from..to];

        if span.len() >= 2 && span.starts_with('{') && span.ends_with('}') {
            let node = self.make_inline(NodeValue::EmphasizedCode);
            self.resolve_into(node, from + 1, to - 1);
            return node;
        }

        if span.len() >= 2 && span.starts_with('$') && span.ends_with('$') {
            let literal = strings::unescape(&span[1..span.len() - 1]);
            return self.make_inline(NodeValue::Math(NodeMath { literal }));
        }

        if span.starts_with('¥') {
            if let Some(plot) = math::scan_function_plot(&strings::unescape(span)) {
                return self.make_inline(NodeValue::FunctionPlot(plot));
            }
        }

        self.make_inline(NodeValue::Code(NodeCode {
            literal: strings::unescape(span),
        }))
    }

    fn handle_stars(&mut self) -> &'a AstNode<'a> {
        let n = self.run_len(b'*');
        let open_len = n.min(3);
        let value = match open_len {
            1 => NodeValue::Emph,
            2 => NodeValue::Strong,
            _ => NodeValue::StrongEmph,
        };
        match self.close_span(b'*', open_len, value) {
            Some(inl) => inl,
            None => self.literal_run(n),
        }
    }

    fn handle_tildes(&mut self) -> &'a AstNode<'a> {
        let n = self.run_len(b'~');
        if n >= 3 {
            return self.literal_run(n);
        }
        let value = if n == 1 {
            NodeValue::Underline
        } else {
            NodeValue::Strikethrough
        };
        match self.close_span(b'~', n, value) {
            Some(inl) => inl,
            None => self.literal_run(n),
        }
    }

    fn handle_equals(&mut self) -> &'a AstNode<'a> {
        let n = self.run_len(b'=');
        if n < 2 {
            return self.literal_run(n);
        }
        match self.close_span(b'=', 2, NodeValue::Highlight) {
            Some(inl) => inl,
            None => self.literal_run(n),
        }
    }

    /// The closer is the first subsequent run of at least the opener's
    /// length; exactly that length is consumed and any surplus stays in the
    /// input.  No closer, or an empty span, leaves the opener literal.
    fn close_span(&mut self, c: u8, open_len: usize, value: NodeValue) -> Option<&'a AstNode<'a>> {
        let content_start = self.pos + open_len;
        let close = self.find_closer_run(content_start, c, open_len)?;
        if close == content_start {
            return None;
        }

        let node = self.make_inline(value);
        self.resolve_into(node, content_start, close);
        self.pos = close + open_len;
        Some(node)
    }

    fn literal_run(&mut self, n: usize) -> &'a AstNode<'a> {
        let text = self.input[self.pos..self.pos + n].to_string();
        self.pos += n;
        self.make_inline(NodeValue::Text(text))
    }

    /// Bracket forms are disambiguated strictly by the suffix after the
    /// matching `]`.  An unrecognized suffix makes the `[` (or the `!`) a
    /// plain character, and scanning continues inside the bracketed text.
    fn handle_bracket(&mut self, image: bool) -> &'a AstNode<'a> {
        let open = if image { self.pos + 1 } else { self.pos };

        if !image && self.byte_at(open + 1) == Some(b'^') {
            return self.handle_footnote_reference(open);
        }

        let close = match self.find_unescaped_skipping_code(open + 1, b']') {
            Some(q) => q,
            None => return self.bracket_fallback(image),
        };

        match self.byte_at(close + 1) {
            Some(b'(') => {
                let end = match scanners::find_unescaped(self.input, close + 2, b')') {
                    Some(r) => r,
                    None => return self.bracket_fallback(image),
                };
                let url =
                    strings::unescape(self.input[close + 2..end].trim_matches([' ', '\t']));
                let value = if image {
                    NodeValue::Image(NodeLink { url })
                } else {
                    NodeValue::Link(NodeLink { url })
                };
                let node = self.make_inline(value);
                self.resolve_into(node, open + 1, close);
                self.pos = end + 1;
                node
            }

            Some(b'^') if !image && self.byte_at(close + 2) == Some(b'(') => {
                let end = match scanners::find_unescaped(self.input, close + 3, b')') {
                    Some(r) => r,
                    None => return self.bracket_fallback(image),
                };
                let annotation = strings::unescape(&self.input[close + 3..end]);
                let node = self.make_inline(NodeValue::PinyinAnnotation(annotation));
                self.resolve_into(node, open + 1, close);
                self.pos = end + 1;
                node
            }

            Some(b'-') if !image && self.byte_at(close + 2) == Some(b'(') => {
                let end = match scanners::find_unescaped(self.input, close + 3, b')') {
                    Some(r) => r,
                    None => return self.bracket_fallback(image),
                };
                let hidden = strings::unescape(&self.input[close + 3..end]);
                let node = self.make_inline(NodeValue::HiddenReveal(hidden));
                self.resolve_into(node, open + 1, close);
                self.pos = end + 1;
                node
            }

            Some(b'[') => self.handle_reference_link(open, close, image),

            _ => self.bracket_fallback(image),
        }
    }

    fn handle_footnote_reference(&mut self, open: usize) -> &'a AstNode<'a> {
        if let Some(close) = scanners::find_unescaped(self.input, open + 2, b']') {
            if close > open + 2 {
                let name = strings::unescape(&self.input[open + 2..close]);
                if self.definitions.footnotes.contains(&name) {
                    self.pos = close + 1;
                    return self.make_inline(NodeValue::FootnoteReference(
                        NodeFootnoteReference {
                            name,
                            ref_num: 0,
                            ix: 0,
                        },
                    ));
                }
            }
        }
        self.bracket_fallback(false)
    }

    /// `[text][key]`: defined keys resolve from the Definition Table, then
    /// the broken link callback gets a say; failing both, the entire form
    /// stays literal.
    fn handle_reference_link(&mut self, open: usize, close: usize, image: bool) -> &'a AstNode<'a> {
        let key_close = match scanners::find_unescaped(self.input, close + 2, b']') {
            Some(k) if k > close + 2 => k,
            _ => return self.bracket_fallback(image),
        };

        let key = strings::unescape(&self.input[close + 2..key_close]);
        let resolved = self.definitions.links.get(&key).cloned().or_else(|| {
            self.options
                .parse
                .broken_link_callback
                .as_ref()
                .and_then(|callback| callback.resolve(BrokenLinkReference { key: &key }))
        });

        match resolved {
            Some(reference) => {
                let value = if image {
                    NodeValue::Image(NodeLink { url: reference.url })
                } else {
                    NodeValue::Link(NodeLink { url: reference.url })
                };
                let node = self.make_inline(value);
                self.resolve_into(node, open + 1, close);
                self.pos = key_close + 1;
                node
            }
            None => {
                // Includes the `!` of an image form.
                let literal = strings::unescape(&self.input[self.pos..key_close + 1]);
                self.pos = key_close + 1;
                self.make_inline(NodeValue::Text(literal))
            }
        }
    }

    fn bracket_fallback(&mut self, image: bool) -> &'a AstNode<'a> {
        self.pos += 1;
        let c = if image { "!" } else { "[" };
        self.make_inline(NodeValue::Text(c.to_string()))
    }

    /// `{#name}` declares an anchor target; `{key}` links to a registered
    /// anchor.  An unregistered key leaves the brace literal and scanning
    /// continues inside.
    fn handle_brace(&mut self) -> &'a AstNode<'a> {
        if self.byte_at(self.pos + 1) == Some(b'#') {
            if let Some((name, after)) = scan_anchor_name(self.input, self.pos + 2) {
                self.pos = after;
                return self.make_inline(NodeValue::AnchorTarget(name.to_string()));
            }
        } else if let Some((key, after)) = scan_anchor_name(self.input, self.pos + 1) {
            if self.anchors.contains(key) {
                self.pos = after;
                return self.make_inline(NodeValue::AnchorLink(key.to_string()));
            }
        }

        self.pos += 1;
        self.make_inline(NodeValue::Text("{".to_string()))
    }

    /// `<url>` with a URI scheme and no whitespace or `<` inside.
    fn handle_autolink(&mut self) -> &'a AstNode<'a> {
        let bytes = self.input.as_bytes();
        let mut j = self.pos + 1;
        let mut closed = None;

        while j < self.input.len() {
            match bytes[j] {
                b'>' => {
                    closed = Some(j);
                    break;
                }
                b'<' | b' ' | b'\t' | b'\n' => break,
                b if b == ESCAPE_MARK => j += 1 + self.char_len_at(j + 1),
                _ => j += self.char_len_at(j),
            }
        }

        if let Some(close) = closed {
            let content = &self.input[self.pos + 1..close];
            if scanners::scheme(content).is_some() {
                let url = strings::unescape(content);
                self.pos = close + 1;
                return self.make_inline(NodeValue::AutoLink(url));
            }
        }

        self.pos += 1;
        self.make_inline(NodeValue::Text("<".to_string()))
    }

    /// `//` deletes to the end of the physical line, along with any
    /// whitespace immediately before it.  The line break survives.
    fn handle_slash(&mut self, node: &'a AstNode<'a>) -> Option<&'a AstNode<'a>> {
        if self.allow_weak_comments && self.byte_at(self.pos + 1) == Some(b'/') {
            trim_trailing_whitespace(node);
            self.pos = self.input[self.pos..]
                .find('\n')
                .map_or(self.input.len(), |o| self.pos + o);
            None
        } else {
            self.pos += 1;
            Some(self.make_inline(NodeValue::Text("/".to_string())))
        }
    }

    #[cfg(feature = "shortcodes")]
    fn handle_shortcode(&mut self) -> &'a AstNode<'a> {
        let bytes = self.input.as_bytes();
        let mut j = self.pos + 1;
        while j < self.input.len()
            && (bytes[j].is_ascii_alphanumeric() || matches!(bytes[j], b'_' | b'+' | b'-'))
        {
            j += 1;
        }

        if j > self.pos + 1 && self.byte_at(j) == Some(b':') {
            let code = &self.input[self.pos + 1..j];
            if let Some(emoji) = emojis::get_by_shortcode(code) {
                let value = NodeValue::ShortCode(NodeShortCode {
                    code: code.to_string(),
                    emoji: emoji.as_str().to_string(),
                });
                self.pos = j + 1;
                return self.make_inline(value);
            }
        }

        self.pos += 1;
        self.make_inline(NodeValue::Text(":".to_string()))
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn byte_at(&self, i: usize) -> Option<u8> {
        self.input.as_bytes().get(i).copied()
    }

    fn run_len(&self, c: u8) -> usize {
        self.input.as_bytes()[self.pos..]
            .iter()
            .take_while(|&&b| b == c)
            .count()
    }

    fn char_len_at(&self, i: usize) -> usize {
        if i >= self.input.len() {
            return 0;
        }
        self.input[i..].chars().next().map_or(0, char::len_utf8)
    }

    fn find_special_char(&self) -> usize {
        let bytes = self.input.as_bytes();
        for n in self.pos..self.input.len() {
            if self.special_chars[bytes[n] as usize] {
                return n;
            }
        }
        self.input.len()
    }

    /// Finds the first run of at least `want` `c`s at or after `from`.
    /// Escaped characters and code spans never close a span.
    fn find_closer_run(&self, from: usize, c: u8, want: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut i = from;

        while i < self.input.len() {
            let b = bytes[i];
            if b == ESCAPE_MARK {
                i += 1 + self.char_len_at(i + 1);
            } else if b == b'`' {
                match scanners::find_unescaped(self.input, i + 1, b'`') {
                    Some(close) => i = close + 1,
                    None => i += 1,
                }
            } else if b == c {
                let run = bytes[i..].iter().take_while(|&&x| x == c).count();
                if run >= want {
                    return Some(i);
                }
                i += run;
            } else {
                i += self.char_len_at(i);
            }
        }

        None
    }

    fn find_unescaped_skipping_code(&self, from: usize, target: u8) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut i = from;

        while i < self.input.len() {
            let b = bytes[i];
            if b == ESCAPE_MARK {
                i += 1 + self.char_len_at(i + 1);
            } else if b == b'`' {
                match scanners::find_unescaped(self.input, i + 1, b'`') {
                    Some(close) => i = close + 1,
                    None => i += 1,
                }
            } else if b == target {
                return Some(i);
            } else {
                i += self.char_len_at(i);
            }
        }

        None
    }
}

fn trim_trailing_whitespace<'a>(node: &'a AstNode<'a>) {
    while let Some(last) = node.last_child() {
        let emptied = {
            let mut ast = last.data.borrow_mut();
            match &mut ast.value {
                NodeValue::Text(text) => {
                    let trimmed = text.trim_end_matches([' ', '\t']).len();
                    text.truncate(trimmed);
                    text.is_empty()
                }
                _ => return,
            }
        };
        if emptied {
            last.detach();
        } else {
            return;
        }
    }
}
