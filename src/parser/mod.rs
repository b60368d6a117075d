mod abbreviations;
pub mod admonition;
mod inlines;
pub mod math;
pub mod options;
#[cfg(feature = "shortcodes")]
pub mod shortcodes;
mod table;

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::panic::RefUnwindSafe;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena_tree::Node;
use crate::nodes::{
    self, Ast, AstNode, ListType, NodeCodeBlock, NodeFootnoteDefinition, NodeHeading, NodeList,
    NodeValue, TableAlignment,
};
use crate::parser::admonition::{BoxKind, NodeAdmonition};
pub use crate::parser::options::{Options, ParseOptions, Plugins, RenderOptions, RenderPlugins};
use crate::scanners;
use crate::strings::{self, is_blank};
use crate::Arena;

// Very deeply nested containers can exhaust the stack, and a non-contrived
// document does not nest anywhere near this deeply.  Container openers past
// this depth are treated as ordinary text.
const MAX_NESTING_DEPTH: usize = 100;

/// Parse a CrossDown document to an AST.
///
/// See the documentation of the crate root for an example.
pub fn parse_document<'a>(
    arena: &'a Arena<AstNode<'a>>,
    buffer: &str,
    options: &Options,
) -> &'a AstNode<'a> {
    Parser::new(arena, options).parse(buffer)
}

/// A reference link's resolved details.
#[derive(Clone, Debug)]
pub struct ResolvedReference {
    /// The destination URL of the reference link.
    pub url: String,
}

/// Struct passed to the broken link callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenLinkReference<'l> {
    /// The reference key exactly as written in the document.
    pub key: &'l str,
}

/// Implement this to resolve `[text][key]` references whose key has no
/// definition in the document.
pub trait BrokenLinkCallback: RefUnwindSafe + Send + Sync {
    /// Potentially resolve a broken reference to an actual destination.
    fn resolve(&self, broken_link_reference: BrokenLinkReference) -> Option<ResolvedReference>;
}

impl<'c> Debug for dyn BrokenLinkCallback + 'c {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.write_str("<dyn BrokenLinkCallback>")
    }
}

impl<F> BrokenLinkCallback for F
where
    F: Fn(BrokenLinkReference) -> Option<ResolvedReference>,
    F: RefUnwindSafe + Send + Sync,
{
    fn resolve(&self, broken_link_reference: BrokenLinkReference) -> Option<ResolvedReference> {
        self(broken_link_reference)
    }
}

/// The Definition Table: the side channel filled by definition lines during
/// block tokenization and consulted during the later passes.
#[derive(Default)]
pub(crate) struct Definitions {
    pub(crate) links: FxHashMap<String, ResolvedReference>,
    pub(crate) abbreviations: FxHashMap<String, String>,
    pub(crate) footnotes: FxHashSet<String>,
}

/// One terminator-free source line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'t> {
    pub(crate) text: &'t str,
    pub(crate) number: usize,
}

pub(crate) struct Parser<'a, 'o, 'c> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options<'c>,
    definitions: Definitions,
    anchors: FxHashSet<String>,
    depth: usize,
}

enum BlockStart<'t> {
    CodeFence(usize),
    Table {
        header: Vec<String>,
        alignments: Vec<TableAlignment>,
    },
    Admonition {
        kind: &'t str,
        title: Option<&'t str>,
    },
    Box(BoxKind),
    BlockQuote(u8),
    Bullet,
    Ordered(usize),
    ThematicBreak,
    AtxHeading(u8, usize),
    Outline(usize),
    FootnoteDef(&'t str, &'t str),
    LinkDef(&'t str, &'t str),
    AbbrDef(&'t str, &'t str),
    FootnoteSlot,
}

impl<'a, 'o, 'c> Parser<'a, 'o, 'c>
where
    'c: 'o,
{
    fn new(arena: &'a Arena<AstNode<'a>>, options: &'o Options<'c>) -> Self {
        Parser {
            arena,
            options,
            definitions: Definitions::default(),
            anchors: FxHashSet::default(),
            depth: 0,
        }
    }

    fn parse(mut self, buffer: &str) -> &'a AstNode<'a> {
        let buffer = strings::trim_start_match(buffer, "\u{feff}");
        let text = strings::resolve_escapes(buffer);
        let text = strings::strip_strong_comments(&text);
        let text = strings::strip_html_comments(&text);
        let lines = split_lines(&text);

        let root = self.arena.alloc(Node::new(RefCell::new(Ast::new(
            NodeValue::Document,
            (1, 1).into(),
        ))));

        self.tokenize_blocks(root, &lines);
        if let Some(last) = lines.last() {
            root.data.borrow_mut().sourcepos.end = (last.number, last.text.len()).into();
        } else {
            root.data.borrow_mut().sourcepos.end = (1, 1).into();
        }

        self.resolve_anchors(root);
        self.process_inlines(root);
        abbreviations::process(self.arena, root, &self.definitions.abbreviations);
        self.process_footnotes(root);

        root
    }

    //////////////////////
    // Block tokenizing //
    //////////////////////

    fn tokenize_blocks(&mut self, parent: &'a AstNode<'a>, lines: &[Line]) {
        let mut ix = 0;
        while ix < lines.len() {
            if is_blank(lines[ix].text) {
                ix += 1;
                continue;
            }
            ix = match self.block_start(lines, ix) {
                Some(start) => self.open_block(parent, lines, ix, start),
                None => self.consume_paragraph(parent, lines, ix),
            };
        }
    }

    /// Probes constructs in priority order.  `None` means the line belongs
    /// to a paragraph.
    fn block_start<'t>(&self, lines: &[Line<'t>], ix: usize) -> Option<BlockStart<'t>> {
        let text = lines[ix].text;
        let nested = self.depth < MAX_NESTING_DEPTH;

        if let Some(len) = scanners::open_code_fence(text) {
            return Some(BlockStart::CodeFence(len));
        }
        if let Some((header, alignments)) = table::detect(lines, ix) {
            return Some(BlockStart::Table { header, alignments });
        }
        if nested {
            if let Some((kind, title)) = scanners::admonition_start(text) {
                return Some(BlockStart::Admonition { kind, title });
            }
            if let Some(kind) = scanners::box_delimiter(text) {
                return Some(BlockStart::Box(kind));
            }
            if let Some((level, _)) = scanners::blockquote_start(text) {
                return Some(BlockStart::BlockQuote(level));
            }
        }
        if scanners::bullet_item(text).is_some() {
            return Some(BlockStart::Bullet);
        }
        if let Some((ordinal, _)) = scanners::ordered_item(text) {
            return Some(BlockStart::Ordered(ordinal));
        }
        if scanners::thematic_break(text) {
            return Some(BlockStart::ThematicBreak);
        }
        if let Some((level, offset)) = scanners::atx_heading_start(text) {
            return Some(BlockStart::AtxHeading(level, offset));
        }
        if let Some(end) = scanners::outline_candidate(text) {
            return Some(BlockStart::Outline(end));
        }
        if let Some((name, body)) = scanners::footnote_definition(text) {
            return Some(BlockStart::FootnoteDef(name, body));
        }
        if let Some((key, target)) = scanners::link_definition(text) {
            return Some(BlockStart::LinkDef(key, target));
        }
        if let Some((key, expansion)) = scanners::abbreviation_definition(text) {
            return Some(BlockStart::AbbrDef(key, expansion));
        }
        if scanners::footnote_slot(text) {
            return Some(BlockStart::FootnoteSlot);
        }
        None
    }

    fn open_block<'t>(
        &mut self,
        parent: &'a AstNode<'a>,
        lines: &[Line<'t>],
        ix: usize,
        start: BlockStart<'t>,
    ) -> usize {
        let first = &lines[ix];
        match start {
            BlockStart::CodeFence(fence_len) => {
                let info = strings::unescape(first.text[fence_len..].trim_matches([' ', '\t']));

                let mut end = ix + 1;
                while end < lines.len() {
                    let close = scanners::close_code_fence(lines[end].text);
                    if close.map_or(false, |n| n >= fence_len) {
                        break;
                    }
                    end += 1;
                }

                let mut literal = String::new();
                for line in &lines[ix + 1..end] {
                    literal.push_str(&strings::unescape(line.text));
                    literal.push('\n');
                }

                let node = self.add_child(
                    parent,
                    NodeValue::CodeBlock(NodeCodeBlock { info, literal }),
                    first.number,
                );
                let last = &lines[end.min(lines.len() - 1)];
                close_sourcepos(node, last);
                if end < lines.len() {
                    end + 1
                } else {
                    end
                }
            }

            BlockStart::Table { header, alignments } => {
                table::open(self, parent, lines, ix, header, alignments)
            }

            BlockStart::Admonition { kind, title } => {
                let node = self.add_child(
                    parent,
                    NodeValue::Admonition(NodeAdmonition {
                        kind: strings::unescape(kind),
                        title: title.map(strings::unescape),
                    }),
                    first.number,
                );

                let mut inner: Vec<Line> = Vec::new();
                let mut end = ix + 1;
                while end < lines.len() {
                    let line = &lines[end];
                    if is_blank(line.text) {
                        inner.push(Line {
                            text: "",
                            number: line.number,
                        });
                    } else if let Some(rest) = dedent(line.text) {
                        inner.push(Line {
                            text: rest,
                            number: line.number,
                        });
                    } else {
                        break;
                    }
                    end += 1;
                }
                while inner.last().map_or(false, |l| is_blank(l.text)) {
                    inner.pop();
                }

                self.recurse(node, &inner);
                close_sourcepos(node, &lines[end - 1]);
                end
            }

            BlockStart::Box(kind) => {
                let node = self.add_child(parent, NodeValue::BorderedBox(kind), first.number);

                let mut end = ix + 1;
                while end < lines.len() && scanners::box_delimiter(lines[end].text) != Some(kind) {
                    end += 1;
                }

                self.recurse(node, &lines[ix + 1..end]);
                let last = &lines[end.min(lines.len() - 1)];
                close_sourcepos(node, last);
                if end < lines.len() {
                    end + 1
                } else {
                    end
                }
            }

            BlockStart::BlockQuote(level) => {
                let node = self.add_child(parent, NodeValue::BlockQuote(level), first.number);
                let wanted = level as usize;

                let mut inner: Vec<Line> = Vec::new();
                let mut end = ix;
                while end < lines.len() {
                    match scanners::blockquote_start(lines[end].text) {
                        Some((found, _)) if found as usize >= wanted => {
                            inner.push(Line {
                                text: strip_quote_markers(lines[end].text, wanted),
                                number: lines[end].number,
                            });
                            end += 1;
                        }
                        _ => break,
                    }
                }

                self.recurse(node, &inner);
                close_sourcepos(node, &lines[end - 1]);
                end
            }

            BlockStart::Bullet => self.open_list(parent, lines, ix, ListType::Bullet, 0),

            BlockStart::Ordered(ordinal) => {
                self.open_list(parent, lines, ix, ListType::Ordered, ordinal)
            }

            BlockStart::ThematicBreak => {
                let node = self.add_child(parent, NodeValue::ThematicBreak, first.number);
                close_sourcepos(node, first);
                ix + 1
            }

            BlockStart::AtxHeading(level, offset) => {
                let node = self.add_child(
                    parent,
                    NodeValue::Heading(NodeHeading {
                        level,
                        outline: None,
                    }),
                    first.number,
                );
                let mut content = first.text[offset..].to_string();
                strings::chop_trailing_hashtags(&mut content);
                node.data.borrow_mut().content = content;
                close_sourcepos(node, first);
                ix + 1
            }

            BlockStart::Outline(prefix_end) => {
                // Candidate only; resolve_anchors validates the prefix and
                // demotes the node to a paragraph if it is malformed.
                let node = self.add_child(
                    parent,
                    NodeValue::Heading(NodeHeading {
                        level: 0,
                        outline: Some(first.text[..prefix_end].to_string()),
                    }),
                    first.number,
                );
                let mut content = first.text.to_string();
                strings::rtrim(&mut content);
                node.data.borrow_mut().content = content;
                close_sourcepos(node, first);
                ix + 1
            }

            BlockStart::FootnoteDef(name, body) => {
                let name = strings::unescape(name);
                self.definitions.footnotes.insert(name.clone());

                let def = self.add_child(
                    parent,
                    NodeValue::FootnoteDefinition(NodeFootnoteDefinition {
                        name,
                        total_references: 0,
                    }),
                    first.number,
                );
                let para = self.add_child(def, NodeValue::Paragraph, first.number);
                let mut content = body.to_string();
                strings::rtrim(&mut content);
                para.data.borrow_mut().content = content;
                close_sourcepos(def, first);
                close_sourcepos(para, first);
                ix + 1
            }

            BlockStart::LinkDef(key, target) => {
                self.definitions.links.insert(
                    strings::unescape(key),
                    ResolvedReference {
                        url: strings::unescape(target),
                    },
                );
                ix + 1
            }

            BlockStart::AbbrDef(key, expansion) => {
                self.definitions
                    .abbreviations
                    .insert(strings::unescape(key), strings::unescape(expansion));
                ix + 1
            }

            BlockStart::FootnoteSlot => {
                let node = self.add_child(parent, NodeValue::FootnoteSlot, first.number);
                close_sourcepos(node, first);
                ix + 1
            }
        }
    }

    /// Consecutive lines of one list kind merge into a single list; each
    /// item is one line of inline content.
    fn open_list(
        &mut self,
        parent: &'a AstNode<'a>,
        lines: &[Line],
        ix: usize,
        list_type: ListType,
        list_start: usize,
    ) -> usize {
        let list = self.add_child(
            parent,
            NodeValue::List(NodeList {
                list_type,
                start: list_start,
            }),
            lines[ix].number,
        );

        let mut end = ix;
        while end < lines.len() {
            let text = lines[end].text;
            let (item_start, offset) = match list_type {
                ListType::Bullet => match scanners::bullet_item(text) {
                    Some(offset) => (0, offset),
                    None => break,
                },
                ListType::Ordered => match scanners::ordered_item(text) {
                    Some((ordinal, offset)) => (ordinal, offset),
                    None => break,
                },
            };

            let item = self.add_child(
                list,
                NodeValue::Item(NodeList {
                    list_type,
                    start: item_start,
                }),
                lines[end].number,
            );
            let mut content = text[offset..].to_string();
            strings::rtrim(&mut content);
            item.data.borrow_mut().content = content;
            close_sourcepos(item, &lines[end]);
            end += 1;
        }

        close_sourcepos(list, &lines[end - 1]);
        end
    }

    fn consume_paragraph(&mut self, parent: &'a AstNode<'a>, lines: &[Line], ix: usize) -> usize {
        let mut end = ix + 1;
        while end < lines.len()
            && !is_blank(lines[end].text)
            && self.block_start(lines, end).is_none()
        {
            end += 1;
        }

        let mut content = String::new();
        for (i, line) in lines[ix..end].iter().enumerate() {
            if i > 0 {
                content.push('\n');
            }
            content.push_str(line.text.trim_end_matches([' ', '\t']));
        }

        let node = self.add_child(parent, NodeValue::Paragraph, lines[ix].number);
        node.data.borrow_mut().content = content;
        close_sourcepos(node, &lines[end - 1]);
        end
    }

    fn recurse(&mut self, parent: &'a AstNode<'a>, lines: &[Line]) {
        self.depth += 1;
        self.tokenize_blocks(parent, lines);
        self.depth -= 1;
    }

    fn add_child(
        &mut self,
        parent: &'a AstNode<'a>,
        value: NodeValue,
        start_line: usize,
    ) -> &'a AstNode<'a> {
        debug_assert!(nodes::can_contain_type(parent, &value));
        let node = self
            .arena
            .alloc(Node::new(RefCell::new(Ast::new(value, (start_line, 1).into()))));
        parent.append(node);
        node
    }

    //////////////////////
    // Resolver passes  //
    //////////////////////

    /// Validates outline heading candidates and registers every anchor key
    /// before inline resolution, so forward references resolve.
    fn resolve_anchors(&mut self, root: &'a AstNode<'a>) {
        for node in root.descendants() {
            let mut ast = node.data.borrow_mut();

            let demote = match &mut ast.value {
                NodeValue::Heading(heading) => match heading.outline.as_deref() {
                    Some(prefix) => match scanners::outline_level(prefix) {
                        Some(level) => {
                            heading.level = level;
                            self.anchors.insert(prefix.to_string());
                            false
                        }
                        None => true,
                    },
                    None => false,
                },
                _ => false,
            };
            if demote {
                ast.value = NodeValue::Paragraph;
            }

            if ast.value.contains_inlines() {
                let in_definition = node.parent().map_or(false, |p| {
                    matches!(p.data.borrow().value, NodeValue::FootnoteDefinition(..))
                });
                collect_anchor_targets(&ast.content, !in_definition, &mut self.anchors);
            }
        }
    }

    fn process_inlines(&mut self, root: &'a AstNode<'a>) {
        let mut blocks = Vec::new();
        for node in root.descendants() {
            let ast = node.data.borrow();
            if ast.value.contains_inlines() && !ast.content.is_empty() {
                blocks.push(node);
            }
        }

        for node in blocks {
            let content = mem::take(&mut node.data.borrow_mut().content);
            // Weak comments never apply to definition-line payloads.
            let in_definition = node
                .parent()
                .map_or(false, |p| {
                    matches!(p.data.borrow().value, NodeValue::FootnoteDefinition(..))
                });
            inlines::process(
                self.arena,
                self.options,
                &self.definitions,
                &self.anchors,
                node,
                &content,
                !in_definition,
            );
        }
    }

    //////////////////////
    // Footnote assembly //
    //////////////////////

    fn process_footnotes(&mut self, root: &'a AstNode<'a>) {
        let mut found = Vec::new();
        for node in root.descendants() {
            if matches!(node.data.borrow().value, NodeValue::FootnoteDefinition(..)) {
                found.push(node);
            }
        }

        // For a duplicate name the last definition wins.
        let mut defs: FxHashMap<String, &'a AstNode<'a>> = FxHashMap::default();
        for node in found {
            node.detach();
            if let NodeValue::FootnoteDefinition(nfd) = &node.data.borrow().value {
                defs.insert(nfd.name.clone(), node);
            }
        }

        let mut ordered: Vec<&'a AstNode<'a>> = Vec::new();
        let mut ix_by_name: FxHashMap<String, u32> = FxHashMap::default();

        number_footnote_references(root, &defs, &mut ordered, &mut ix_by_name);
        // Bodies of referenced footnotes may reference further footnotes;
        // those are numbered after everything in the main text.
        let mut i = 0;
        while i < ordered.len() {
            number_footnote_references(ordered[i], &defs, &mut ordered, &mut ix_by_name);
            i += 1;
        }

        let mut slots = Vec::new();
        for node in root.descendants() {
            if matches!(node.data.borrow().value, NodeValue::FootnoteSlot) {
                slots.push(node);
            }
        }

        if let Some(&slot) = slots.first() {
            for def in &ordered {
                slot.insert_before(def);
            }
        } else {
            for def in &ordered {
                root.append(def);
            }
        }
        for slot in slots {
            slot.detach();
        }
    }
}

fn number_footnote_references<'a>(
    tree: &'a AstNode<'a>,
    defs: &FxHashMap<String, &'a AstNode<'a>>,
    ordered: &mut Vec<&'a AstNode<'a>>,
    ix_by_name: &mut FxHashMap<String, u32>,
) {
    for node in tree.descendants() {
        let mut ast = node.data.borrow_mut();
        let reference = match &mut ast.value {
            NodeValue::FootnoteReference(reference) => reference,
            _ => continue,
        };
        let def = match defs.get(&reference.name) {
            Some(&def) => def,
            None => continue,
        };

        let ref_num = {
            let mut def_ast = def.data.borrow_mut();
            match &mut def_ast.value {
                NodeValue::FootnoteDefinition(nfd) => {
                    nfd.total_references += 1;
                    nfd.total_references
                }
                _ => continue,
            }
        };

        let ix = match ix_by_name.get(&reference.name) {
            Some(&ix) => ix,
            None => {
                ordered.push(def);
                let ix = ordered.len() as u32;
                ix_by_name.insert(reference.name.clone(), ix);
                ix
            }
        };

        reference.ix = ix;
        reference.ref_num = ref_num;
    }
}

/// Registers `{#name}` anchor targets found in block content, skipping code
/// spans and escaped characters.  Honors the weak `//` comment rule with the
/// same exemptions as the inline scanner, so a target in a commented-out
/// line tail never registers.
fn collect_anchor_targets(content: &str, weak_comments: bool, anchors: &mut FxHashSet<String>) {
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < content.len() {
        match bytes[i] {
            b if b == strings::ESCAPE_MARK => {
                i += 1 + char_len_at(content, i + 1);
            }
            b'`' => match scanners::find_unescaped(content, i + 1, b'`') {
                Some(close) => i = close + 1,
                None => i += 1,
            },
            b'{' if bytes.get(i + 1) == Some(&b'#') => {
                match scan_anchor_name(content, i + 2) {
                    Some((name, after)) => {
                        anchors.insert(name.to_string());
                        i = after;
                    }
                    None => i += 1,
                }
            }
            b'/' if weak_comments && bytes.get(i + 1) == Some(&b'/') => {
                i = content[i..].find('\n').map_or(content.len(), |o| i + o + 1);
            }
            b'<' if weak_comments => match scan_autolink_extent(content, i) {
                Some(after) => i = after,
                None => i += 1,
            },
            b']' if weak_comments => {
                // Link destinations, annotations, and reference keys are
                // opaque to the `//` rule.
                i = match bytes.get(i + 1) {
                    Some(b'(') => scanners::find_unescaped(content, i + 2, b')')
                        .map_or(i + 1, |r| r + 1),
                    Some(b'^') | Some(b'-') if bytes.get(i + 2) == Some(&b'(') => {
                        scanners::find_unescaped(content, i + 3, b')').map_or(i + 1, |r| r + 1)
                    }
                    Some(b'[') => scanners::find_unescaped(content, i + 2, b']')
                        .map_or(i + 1, |r| r + 1),
                    _ => i + 1,
                };
            }
            _ => i += char_len_at(content, i),
        }
    }
}

/// The extent of a `<url>` autolink form starting at `from`, or `None` when
/// the run is not one.
fn scan_autolink_extent(content: &str, from: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut j = from + 1;

    while j < content.len() {
        match bytes[j] {
            b'>' => {
                return scanners::scheme(&content[from + 1..j]).map(|_| j + 1);
            }
            b'<' | b' ' | b'\t' | b'\n' => return None,
            b if b == strings::ESCAPE_MARK => j += 1 + char_len_at(content, j + 1),
            _ => j += char_len_at(content, j),
        }
    }

    None
}

/// An anchor name runs to the closing `}` and contains no whitespace,
/// braces, or escapes.  Returns the name and the offset past the `}`.
pub(crate) fn scan_anchor_name(content: &str, from: usize) -> Option<(&str, usize)> {
    let bytes = content.as_bytes();
    let mut j = from;

    while j < content.len() {
        match bytes[j] {
            b'}' => {
                if j == from {
                    return None;
                }
                return Some((&content[from..j], j + 1));
            }
            b'{' | b' ' | b'\t' | b'\n' => return None,
            b if b == strings::ESCAPE_MARK => return None,
            _ => j += char_len_at(content, j),
        }
    }

    None
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let bytes = text.as_bytes();
    let end = text.len();
    let mut lines = Vec::new();
    let mut ix = 0;
    let mut number = 1;
    let matcher = jetscii::bytes!(b'\r', b'\n');

    while ix < end {
        let eol = match matcher.find(&bytes[ix..]) {
            Some(offset) => ix + offset,
            None => end,
        };
        lines.push(Line {
            text: &text[ix..eol],
            number,
        });
        ix = eol;
        if ix < end {
            if bytes[ix] == b'\r' {
                ix += 1;
                if ix < end && bytes[ix] == b'\n' {
                    ix += 1;
                }
            } else {
                ix += 1;
            }
        }
        number += 1;
    }

    lines
}

fn strip_quote_markers(text: &str, level: usize) -> &str {
    let rest = &text[level..];
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn dedent(text: &str) -> Option<&str> {
    text.strip_prefix("    ")
        .or_else(|| text.strip_prefix('\t'))
}

fn close_sourcepos(node: &AstNode, line: &Line) {
    node.data.borrow_mut().sourcepos.end = (line.number, line.text.len()).into();
}

fn char_len_at(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return 0;
    }
    match s[i..].chars().next() {
        Some(c) => c.len_utf8(),
        None => 0,
    }
}
