//! The CrossDown AST.

use crate::arena_tree::Node;
use std::cell::RefCell;

pub use crate::parser::admonition::{BoxKind, NodeAdmonition};
pub use crate::parser::math::{NodeFunctionPlot, NodeMath, PlotRange};
#[cfg(feature = "shortcodes")]
pub use crate::parser::shortcodes::NodeShortCode;

/// The core AST node enum.
#[derive(Debug, Clone)]
pub enum NodeValue {
    /// The root of every CrossDown document.  Contains **blocks**.
    Document,

    /// **Block**.  A nested quotation.  The level is the count of leading `>`
    /// markers on the opening line, 1 through 6.  Contains other **blocks**.
    ///
    /// ``` md
    /// >>> A level-three quote.
    /// ```
    BlockQuote(u8),

    /// **Block**.  A list.  Contains [`NodeValue::Item`]s.
    ///
    /// ``` md
    /// - An unordered list
    /// - Another item
    ///
    /// 1. An ordered list
    /// 2. Another item
    /// ```
    List(NodeList),

    /// **Block**.  A list item.  One source line; contains **inlines**.
    Item(NodeList),

    /// **Block**.  A fenced code block.  Contains raw text which is not
    /// parsed as CrossDown, although it is HTML escaped on output.
    CodeBlock(NodeCodeBlock),

    /// **Block**.  A paragraph.  Contains **inlines**.
    Paragraph,

    /// **Block**.  A heading, either `#`-marked or synthesized from a valid
    /// outline-numbered line.  Contains **inlines**.
    Heading(NodeHeading),

    /// **Block**.  A horizontal rule.  Has no children.
    ThematicBreak,

    /// **Block**.  An admonition directive (`!!! kind "title"` with an
    /// indented body).  Contains other **blocks**.
    Admonition(NodeAdmonition),

    /// **Block**.  A bordered box wrapped in bare `!!!` (alert) or `!!`
    /// (notice) delimiter lines.  Contains other **blocks**.
    BorderedBox(BoxKind),

    /// **Block**.  A footnote's body, moved into place by the assembly pass.
    /// Contains other **blocks**.
    FootnoteDefinition(NodeFootnoteDefinition),

    /// **Block**.  The footnote placement marker line.  Consumed during
    /// assembly; never survives into a finished document.
    FootnoteSlot,

    /// **Block**.  A table.  Contains table rows.
    Table(Vec<TableAlignment>),

    /// **Block**.  A table row.  The `bool` represents whether the row is
    /// the header row or not.  Contains table cells.
    TableRow(bool),

    /// **Block**.  A table cell.  Contains **inlines**.
    TableCell,

    /// **Inline**.  Literal text.  All visible prose ends up in `Text`
    /// nodes.
    Text(String),

    /// **Inline**.  A line break inside a paragraph.  Rendered as a newline,
    /// or as `<br />` when `render.hardbreaks` is set.
    SoftBreak,

    /// **Inline**.  A plain code span.
    Code(NodeCode),

    /// **Inline**.  Italic text (a `*one*` delimiter run).
    Emph,

    /// **Inline**.  Bold text (`**two**`).
    Strong,

    /// **Inline**.  Bold italic text (`***three***`), kept as one span
    /// rather than nested runs.
    StrongEmph,

    /// **Inline**.  Underlined text (`~one~`).
    Underline,

    /// **Inline**.  Struck-through text (`~~two~~`).
    Strikethrough,

    /// **Inline**.  Highlighted text (`==two==`).
    Highlight,

    /// **Inline**.  A pinyin ruby annotation, `[base]^(annotation)`.  The
    /// `String` is the annotation; the base text is the node's children.
    PinyinAnnotation(String),

    /// **Inline**.  A hidden-reveal span, `[visible]-(hidden)`.  The
    /// `String` is the hidden text, surfaced on hover; the visible part is
    /// the node's children.
    HiddenReveal(String),

    /// **Inline**.  A link to some URL, with the link text as children.
    Link(NodeLink),

    /// **Inline**.  An image, with the alt text as children.
    Image(NodeLink),

    /// **Inline**.  A `<url>` autolink.
    AutoLink(String),

    /// **Inline**.  An emphasized code span (`` `{…}` ``).  Unlike plain
    /// code, the contents are live CrossDown, carried as children.
    EmphasizedCode,

    /// **Inline**.  A LaTeX payload from a `` `$…$` `` code span.  Opaque
    /// passthrough for a client-side math renderer.
    Math(NodeMath),

    /// **Inline**.  A function-plot payload from a `` `¥…¥` `` code span
    /// with optional `€…€` ranges.  Opaque to the engine.
    FunctionPlot(NodeFunctionPlot),

    /// **Inline**.  An occurrence of a defined abbreviation, annotated with
    /// its expansion.
    Abbreviation(NodeAbbreviation),

    /// **Inline**.  A footnote reference.
    FootnoteReference(NodeFootnoteReference),

    /// **Inline**.  An explicit anchor target, `{#name}`.
    AnchorTarget(String),

    /// **Inline**.  A link, `{key}`, to an anchor defined elsewhere in the
    /// document.
    AnchorLink(String),

    #[cfg(feature = "shortcodes")]
    /// **Inline**.  An emoji generated from a shortcode.  Enable with
    /// feature "shortcodes".
    ShortCode(NodeShortCode),
}

/// Alignment of a single table cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TableAlignment {
    /// Cell content is unaligned.
    None,

    /// Cell content is aligned left.
    Left,

    /// Cell content is centered.
    Center,

    /// Cell content is aligned right.
    Right,
}

impl TableAlignment {
    pub(crate) fn html_name(&self) -> Option<&'static str> {
        match *self {
            TableAlignment::None => None,
            TableAlignment::Left => Some("left"),
            TableAlignment::Center => Some("center"),
            TableAlignment::Right => Some("right"),
        }
    }

    pub(crate) fn xml_name(&self) -> &'static str {
        match *self {
            TableAlignment::None => "none",
            TableAlignment::Left => "left",
            TableAlignment::Center => "center",
            TableAlignment::Right => "right",
        }
    }
}

/// An inline code span's contents.
#[derive(Debug, Clone)]
pub struct NodeCode {
    /// The literal contents of the span.  As the contents are not
    /// interpreted at all, they are carried here rather than inserted into a
    /// child inline of any kind.
    pub literal: String,
}

/// The details of a link's destination, or an image's source.
#[derive(Debug, Clone)]
pub struct NodeLink {
    /// The URL for the link destination or image source.  Link and alt text
    /// are supplied as the node's children.
    pub url: String,
}

/// The metadata of a list; the same struct is used for the list and for
/// each of its items.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeList {
    /// The kind of list (bullet (unordered) or ordered).
    pub list_type: ListType,

    /// For ordered lists, the ordinal the list starts at, taken from the
    /// first item's numeral.
    pub start: usize,
}

/// The type of list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListType {
    /// A bullet list, i.e. an unordered list.
    Bullet,

    /// An ordered list.
    Ordered,
}

impl Default for ListType {
    fn default() -> ListType {
        ListType::Bullet
    }
}

impl ListType {
    pub(crate) fn xml_name(&self) -> &'static str {
        match *self {
            ListType::Bullet => "bullet",
            ListType::Ordered => "ordered",
        }
    }
}

/// The metadata and data of a fenced code block.
#[derive(Default, Debug, Clone)]
pub struct NodeCodeBlock {
    /// The info string following the opening fence, if any.  Its first word
    /// is the language tag.
    pub info: String,

    /// The literal contents of the code block.  As the contents are not
    /// interpreted as CrossDown at all, they are contained within this
    /// structure, rather than inserted into a child inline of any kind.
    pub literal: String,
}

/// The metadata of a heading.
#[derive(Default, Debug, Clone)]
pub struct NodeHeading {
    /// The level of the header; from 1 to 6.
    pub level: u8,

    /// The numbering prefix of a heading synthesized from an outline line
    /// (`7.1.1 Title`).  The exact prefix string doubles as the heading's
    /// anchor key.  `#`-marked headings carry `None`.
    pub outline: Option<String>,
}

/// The metadata of a footnote definition.
#[derive(Debug, Default, Clone)]
pub struct NodeFootnoteDefinition {
    /// The name of the footnote.
    pub name: String,

    /// The total number of references to this footnote in the document.
    pub total_references: u32,
}

/// The metadata of a footnote reference.
#[derive(Debug, Default, Clone)]
pub struct NodeFootnoteReference {
    /// The name of the footnote.
    pub name: String,

    /// The index of reference to this footnote in the document, used to
    /// link to the correct place in the footnote back from the definition.
    pub ref_num: u32,

    /// The index of the footnote in the document, by order of first
    /// reference.
    pub ix: u32,
}

/// An occurrence of a defined abbreviation.
#[derive(Debug, Default, Clone)]
pub struct NodeAbbreviation {
    /// The literal text that matched the definition; stays visible.
    pub abbr: String,

    /// The expansion, surfaced as auxiliary display data (a hover title).
    pub title: String,
}

impl NodeValue {
    /// Indicates whether this node is a block node or inline node.
    pub fn block(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::BlockQuote(..)
                | NodeValue::List(..)
                | NodeValue::Item(..)
                | NodeValue::CodeBlock(..)
                | NodeValue::Paragraph
                | NodeValue::Heading(..)
                | NodeValue::ThematicBreak
                | NodeValue::Admonition(..)
                | NodeValue::BorderedBox(..)
                | NodeValue::FootnoteDefinition(..)
                | NodeValue::FootnoteSlot
                | NodeValue::Table(..)
                | NodeValue::TableRow(..)
                | NodeValue::TableCell
        )
    }

    /// Whether the type the node is of can contain inline nodes.
    pub fn contains_inlines(&self) -> bool {
        matches!(
            *self,
            NodeValue::Paragraph
                | NodeValue::Heading(..)
                | NodeValue::TableCell
                | NodeValue::Item(..)
        )
    }

    /// Return a reference to the text of a `Text` inline, if this node is one.
    ///
    /// Convenience method.
    pub fn text(&self) -> Option<&String> {
        match *self {
            NodeValue::Text(ref t) => Some(t),
            _ => None,
        }
    }

    /// Return a mutable reference to the text of a `Text` inline, if this node is one.
    ///
    /// Convenience method.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match *self {
            NodeValue::Text(ref mut t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn xml_node_name(&self) -> &'static str {
        match *self {
            NodeValue::Document => "document",
            NodeValue::BlockQuote(..) => "block_quote",
            NodeValue::List(..) => "list",
            NodeValue::Item(..) => "item",
            NodeValue::CodeBlock(..) => "code_block",
            NodeValue::Paragraph => "paragraph",
            NodeValue::Heading(..) => "heading",
            NodeValue::ThematicBreak => "thematic_break",
            NodeValue::Admonition(..) => "admonition",
            NodeValue::BorderedBox(..) => "bordered_box",
            NodeValue::FootnoteDefinition(..) => "footnote_definition",
            NodeValue::FootnoteSlot => "footnote_slot",
            NodeValue::Table(..) => "table",
            NodeValue::TableRow(..) => "table_row",
            NodeValue::TableCell => "table_cell",
            NodeValue::Text(..) => "text",
            NodeValue::SoftBreak => "softbreak",
            NodeValue::Code(..) => "code",
            NodeValue::Emph => "emph",
            NodeValue::Strong => "strong",
            NodeValue::StrongEmph => "strong_emph",
            NodeValue::Underline => "underline",
            NodeValue::Strikethrough => "strikethrough",
            NodeValue::Highlight => "highlight",
            NodeValue::PinyinAnnotation(..) => "pinyin",
            NodeValue::HiddenReveal(..) => "hidden_reveal",
            NodeValue::Link(..) => "link",
            NodeValue::Image(..) => "image",
            NodeValue::AutoLink(..) => "autolink",
            NodeValue::EmphasizedCode => "emphasized_code",
            NodeValue::Math(..) => "math",
            NodeValue::FunctionPlot(..) => "function_plot",
            NodeValue::Abbreviation(..) => "abbreviation",
            NodeValue::FootnoteReference(..) => "footnote_reference",
            NodeValue::AnchorTarget(..) => "anchor_target",
            NodeValue::AnchorLink(..) => "anchor_link",
            #[cfg(feature = "shortcodes")]
            NodeValue::ShortCode(..) => "shortcode",
        }
    }
}

/// A single node in the CrossDown AST.
///
/// The struct contains metadata about the node's position in the original
/// document, and the core enum, `NodeValue`.
#[derive(Debug, Clone)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The positions in the source document this node comes from.
    pub sourcepos: Sourcepos,

    pub(crate) content: String,
}

impl Ast {
    /// Create a new AST node with the given value, starting at the given
    /// source position.
    pub fn new(value: NodeValue, start: LineColumn) -> Self {
        Ast {
            value,
            content: String::new(),
            sourcepos: (start.line, start.column, start.line, 0).into(),
        }
    }
}

/// Represents the position in the source document this node comes from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sourcepos {
    /// The line and column of the first character of this node.
    pub start: LineColumn,

    /// The line and column of the last character of this node.
    pub end: LineColumn,
}

impl std::fmt::Display for Sourcepos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column,
        )
    }
}

impl From<(usize, usize, usize, usize)> for Sourcepos {
    fn from(sp: (usize, usize, usize, usize)) -> Sourcepos {
        Sourcepos {
            start: LineColumn {
                line: sp.0,
                column: sp.1,
            },
            end: LineColumn {
                line: sp.2,
                column: sp.3,
            },
        }
    }
}

/// Represents the 1-based line and column positions of a given character.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineColumn {
    /// The 1-based line number of the character.
    pub line: usize,

    /// The 1-based column number of the character.
    pub column: usize,
}

impl From<(usize, usize)> for LineColumn {
    fn from(lc: (usize, usize)) -> LineColumn {
        LineColumn {
            line: lc.0,
            column: lc.1,
        }
    }
}

/// The type of a node within the document.
///
/// It is bound by the lifetime `'a`, which corresponds to the `Arena` nodes
/// are allocated in.  `Ast`s are wrapped in `RefCell` for interior
/// mutability.
pub type AstNode<'a> = Node<'a, RefCell<Ast>>;

/// Returns whether the given node may contain a child with the given value.
pub fn can_contain_type<'a>(node: &'a AstNode<'a>, child: &NodeValue) -> bool {
    if let NodeValue::Document = *child {
        return false;
    }

    match node.data.borrow().value {
        NodeValue::Document
        | NodeValue::BlockQuote(..)
        | NodeValue::Admonition(..)
        | NodeValue::BorderedBox(..)
        | NodeValue::FootnoteDefinition(..) => {
            child.block() && !matches!(*child, NodeValue::Item(..))
        }

        NodeValue::List(..) => matches!(*child, NodeValue::Item(..)),

        NodeValue::Item(..)
        | NodeValue::Paragraph
        | NodeValue::Heading(..)
        | NodeValue::TableCell
        | NodeValue::Emph
        | NodeValue::Strong
        | NodeValue::StrongEmph
        | NodeValue::Underline
        | NodeValue::Strikethrough
        | NodeValue::Highlight
        | NodeValue::PinyinAnnotation(..)
        | NodeValue::HiddenReveal(..)
        | NodeValue::EmphasizedCode
        | NodeValue::Link(..)
        | NodeValue::Image(..) => !child.block(),

        NodeValue::Table(..) => matches!(*child, NodeValue::TableRow(..)),

        NodeValue::TableRow(..) => matches!(*child, NodeValue::TableCell),

        _ => false,
    }
}
