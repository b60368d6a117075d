//! The HTML formatter.  Takes an AST and renders the HTML described by the
//! tag map in the crate documentation; document text is always escaped on
//! the way out.

mod context;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};

pub use self::context::Context;
use crate::character_set::character_set;
use crate::nodes::{AstNode, ListType, NodeFootnoteDefinition, NodeValue, TableAlignment};
use crate::parser::{Options, Plugins};

/// Formats an AST as HTML, modified by the given options.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> fmt::Result {
    format_document_with_plugins(root, options, output, &Plugins::default())
}

/// Formats an AST as HTML, modified by the given options.  Accepts custom
/// plugins.
pub fn format_document_with_plugins<'a, 'o, 'c: 'o>(
    root: &'a AstNode<'a>,
    options: &'o Options<'c>,
    output: &'o mut dyn Write,
    plugins: &'o Plugins<'o>,
) -> fmt::Result {
    let mut context = Context::new(output, options, plugins);
    format_nodes(&mut context, root)
}

enum Phase {
    Pre,
    Post,
}

fn format_nodes<'a>(context: &mut Context, root: &'a AstNode<'a>) -> fmt::Result {
    // An explicit stack, because a deeply nested document would otherwise
    // exhaust the call stack.
    let mut stack = vec![(root, false, Phase::Pre)];

    while let Some((node, plain, phase)) = stack.pop() {
        match phase {
            Phase::Pre => {
                let new_plain = if plain {
                    format_node_plain(context, node)?;
                    true
                } else {
                    stack.push((node, false, Phase::Post));
                    format_node(context, node, true)?
                };

                for ch in node.reverse_children() {
                    stack.push((ch, new_plain, Phase::Pre));
                }
            }
            Phase::Post => {
                format_node(context, node, false)?;
            }
        }
    }

    Ok(())
}

// Inside an image's alt attribute only the text content of the alt inlines
// survives.
fn format_node_plain<'a>(context: &mut Context, node: &'a AstNode<'a>) -> fmt::Result {
    match node.data.borrow().value {
        NodeValue::Text(ref literal) => context.escape(literal),
        NodeValue::Code(ref nc) => context.escape(&nc.literal),
        NodeValue::Math(ref nm) => context.escape(&nm.literal),
        NodeValue::Abbreviation(ref na) => context.escape(&na.abbr),
        NodeValue::AutoLink(ref url) => context.escape(url),
        NodeValue::AnchorTarget(ref name) => context.escape(name),
        NodeValue::AnchorLink(ref key) => context.escape(key),
        NodeValue::SoftBreak => context.write_str(" "),
        #[cfg(feature = "shortcodes")]
        NodeValue::ShortCode(ref nsc) => context.write_str(&nsc.emoji),
        _ => Ok(()),
    }
}

fn format_node<'a>(
    context: &mut Context,
    node: &'a AstNode<'a>,
    entering: bool,
) -> Result<bool, fmt::Error> {
    match node.data.borrow().value {
        NodeValue::Document => (),

        NodeValue::BlockQuote(level) => {
            if entering {
                context.cr()?;
                writeln!(context, "<blockquote{}>", render_sourcepos(context, node))?;
                for _ in 1..level {
                    context.write_str("<blockquote>\n")?;
                }
            } else {
                context.cr()?;
                for _ in 0..level {
                    context.write_str("</blockquote>\n")?;
                }
            }
        }

        NodeValue::List(ref nl) => {
            if entering {
                context.cr()?;
                match nl.list_type {
                    ListType::Bullet => {
                        writeln!(context, "<ul{}>", render_sourcepos(context, node))?;
                    }
                    ListType::Ordered if nl.start == 1 => {
                        writeln!(context, "<ol{}>", render_sourcepos(context, node))?;
                    }
                    ListType::Ordered => {
                        writeln!(
                            context,
                            "<ol{} start=\"{}\">",
                            render_sourcepos(context, node),
                            nl.start
                        )?;
                    }
                }
            } else if nl.list_type == ListType::Bullet {
                context.cr()?;
                context.write_str("</ul>\n")?;
            } else {
                context.cr()?;
                context.write_str("</ol>\n")?;
            }
        }

        NodeValue::Item(..) => {
            if entering {
                context.cr()?;
                write!(context, "<li{}>", render_sourcepos(context, node))?;
            } else {
                context.write_str("</li>\n")?;
            }
        }

        NodeValue::Heading(ref nch) => {
            if entering {
                context.cr()?;
                write!(context, "<h{}{}", nch.level, render_sourcepos(context, node))?;
                if let Some(ref prefix) = nch.outline {
                    context.write_str(" id=\"")?;
                    context.escape(prefix)?;
                    context.write_str("\"")?;
                }
                context.write_str(">")?;
            } else {
                writeln!(context, "</h{}>", nch.level)?;
            }
        }

        NodeValue::CodeBlock(ref ncb) => {
            if entering {
                context.cr()?;
                let lang = ncb.info.split_whitespace().next().unwrap_or("");

                match context.plugins.render.codefence_syntax_highlighter {
                    None => {
                        if context.options.render.github_pre_lang && !lang.is_empty() {
                            write!(context, "<pre{} lang=\"", render_sourcepos(context, node))?;
                            context.escape(lang)?;
                            context.write_str("\"><code>")?;
                        } else if !lang.is_empty() {
                            write!(
                                context,
                                "<pre{}><code class=\"language-",
                                render_sourcepos(context, node)
                            )?;
                            context.escape(lang)?;
                            context.write_str("\">")?;
                        } else {
                            write!(context, "<pre{}><code>", render_sourcepos(context, node))?;
                        }

                        context.escape(&ncb.literal)?;
                        context.write_str("</code></pre>\n")?;
                    }
                    Some(highlighter) => {
                        let mut pre_attributes: HashMap<&'static str, Cow<str>> = HashMap::new();
                        let mut code_attributes: HashMap<&'static str, Cow<str>> = HashMap::new();

                        if !lang.is_empty() {
                            if context.options.render.github_pre_lang {
                                pre_attributes.insert("lang", Cow::from(lang));
                            } else {
                                code_attributes
                                    .insert("class", Cow::from(format!("language-{}", lang)));
                            }
                        }

                        if context.options.render.sourcepos {
                            pre_attributes.insert(
                                "data-sourcepos",
                                Cow::from(node.data.borrow().sourcepos.to_string()),
                            );
                        }

                        highlighter.write_pre_tag(context, pre_attributes)?;
                        highlighter.write_code_tag(context, code_attributes)?;
                        highlighter.write_highlighted(
                            context,
                            if lang.is_empty() { None } else { Some(lang) },
                            &ncb.literal,
                        )?;
                        context.write_str("</code></pre>\n")?;
                    }
                }
            }
        }

        NodeValue::Paragraph => {
            if entering {
                context.cr()?;
                write!(context, "<p{}>", render_sourcepos(context, node))?;
            } else {
                if node.next_sibling().is_none() {
                    if let Some(parent) = node.parent() {
                        if let NodeValue::FootnoteDefinition(ref nfd) = parent.data.borrow().value {
                            put_footnote_backref(context, nfd)?;
                        }
                    }
                }
                context.write_str("</p>\n")?;
            }
        }

        NodeValue::ThematicBreak => {
            if entering {
                context.cr()?;
                writeln!(context, "<hr{} />", render_sourcepos(context, node))?;
            }
        }

        NodeValue::Admonition(ref na) => {
            if entering {
                context.cr()?;
                write!(
                    context,
                    "<div{} class=\"admonition ",
                    render_sourcepos(context, node)
                )?;
                context.escape(&na.kind)?;
                context.write_str("\">\n")?;

                let title = match na.title {
                    None => Some(na.default_title()),
                    Some(ref title) if title.is_empty() => None,
                    Some(ref title) => Some(title.clone()),
                };
                if let Some(title) = title {
                    context.write_str("<p class=\"admonition-title\">")?;
                    context.escape(&title)?;
                    context.write_str("</p>\n")?;
                }
            } else {
                context.cr()?;
                context.write_str("</div>\n")?;
            }
        }

        NodeValue::BorderedBox(kind) => {
            if entering {
                context.cr()?;
                writeln!(
                    context,
                    "<div{} class=\"box {}\">",
                    render_sourcepos(context, node),
                    kind.css_class()
                )?;
            } else {
                context.cr()?;
                context.write_str("</div>\n")?;
            }
        }

        NodeValue::FootnoteDefinition(ref nfd) => {
            if entering {
                if !is_footnote_definition(node.previous_sibling()) {
                    context.cr()?;
                    context.write_str("<section class=\"footnotes\" data-footnotes>\n<ol>\n")?;
                }
                write!(context, "<li{} id=\"fn-", render_sourcepos(context, node))?;
                context.escape_href(&nfd.name)?;
                context.write_str("\">")?;
            } else {
                context.cr()?;
                context.write_str("</li>\n")?;
                if !is_footnote_definition(node.next_sibling()) {
                    context.write_str("</ol>\n</section>\n")?;
                }
            }
        }

        // Slots are consumed during footnote assembly; one only reaches the
        // formatter in a hand-constructed AST, and renders as nothing.
        NodeValue::FootnoteSlot => (),

        NodeValue::Table(..) => {
            if entering {
                context.cr()?;
                writeln!(context, "<table{}>", render_sourcepos(context, node))?;
            } else {
                context.cr()?;
                context.write_str("</table>\n")?;
            }
        }

        NodeValue::TableRow(header) => {
            if entering {
                context.cr()?;
                if header {
                    context.write_str("<thead>\n")?;
                } else if is_table_header(node.previous_sibling()) {
                    context.write_str("<tbody>\n")?;
                }
                writeln!(context, "<tr{}>", render_sourcepos(context, node))?;
            } else {
                context.cr()?;
                context.write_str("</tr>\n")?;
                if header {
                    context.write_str("</thead>\n")?;
                } else if node.next_sibling().is_none() {
                    context.write_str("</tbody>\n")?;
                }
            }
        }

        NodeValue::TableCell => {
            let in_header = is_table_header(node.parent());
            if entering {
                context.cr()?;
                if in_header {
                    write!(context, "<th{}", render_sourcepos(context, node))?;
                } else {
                    write!(context, "<td{}", render_sourcepos(context, node))?;
                }
                if let Some(alignment) = table_cell_alignment(node) {
                    write!(context, " align=\"{}\"", alignment)?;
                }
                context.write_str(">")?;
            } else if in_header {
                context.write_str("</th>")?;
            } else {
                context.write_str("</td>")?;
            }
        }

        NodeValue::Text(ref literal) => {
            if entering {
                context.escape(literal)?;
            }
        }

        NodeValue::SoftBreak => {
            if entering {
                if context.options.render.hardbreaks {
                    context.write_str("<br />\n")?;
                } else {
                    context.write_str("\n")?;
                }
            }
        }

        NodeValue::Code(ref nc) => {
            if entering {
                context.write_str("<code>")?;
                context.escape(&nc.literal)?;
                context.write_str("</code>")?;
            }
        }

        NodeValue::Emph => {
            context.write_str(if entering { "<em>" } else { "</em>" })?;
        }

        NodeValue::Strong => {
            context.write_str(if entering { "<strong>" } else { "</strong>" })?;
        }

        NodeValue::StrongEmph => {
            context.write_str(if entering { "<strong><em>" } else { "</em></strong>" })?;
        }

        NodeValue::Underline => {
            context.write_str(if entering { "<u>" } else { "</u>" })?;
        }

        NodeValue::Strikethrough => {
            context.write_str(if entering { "<del>" } else { "</del>" })?;
        }

        NodeValue::Highlight => {
            context.write_str(if entering { "<mark>" } else { "</mark>" })?;
        }

        NodeValue::PinyinAnnotation(ref annotation) => {
            if entering {
                context.write_str("<ruby>")?;
            } else {
                context.write_str("<rt>")?;
                context.escape(annotation)?;
                context.write_str("</rt></ruby>")?;
            }
        }

        NodeValue::HiddenReveal(ref hidden) => {
            if entering {
                context.write_str("<span title=\"")?;
                context.escape(hidden)?;
                context.write_str("\">")?;
            } else {
                context.write_str("</span>")?;
            }
        }

        NodeValue::Link(ref nl) => {
            if entering {
                context.write_str("<a href=\"")?;
                context.escape_href(&nl.url)?;
                context.write_str("\">")?;
            } else {
                context.write_str("</a>")?;
            }
        }

        NodeValue::Image(ref nl) => {
            if entering {
                context.write_str("<img src=\"")?;
                context.escape_href(&nl.url)?;
                context.write_str("\" alt=\"")?;
                return Ok(true);
            }
            context.write_str("\" />")?;
        }

        NodeValue::AutoLink(ref url) => {
            if entering {
                context.write_str("<a href=\"")?;
                context.escape_href(url)?;
                context.write_str("\">")?;
                context.escape(url)?;
                context.write_str("</a>")?;
            }
        }

        NodeValue::EmphasizedCode => {
            context.write_str(if entering { "<code><em>" } else { "</em></code>" })?;
        }

        NodeValue::Math(ref nm) => {
            if entering {
                context.write_str("<span data-math-style=\"inline\">")?;
                context.escape(&nm.literal)?;
                context.write_str("</span>")?;
            }
        }

        NodeValue::FunctionPlot(ref nfp) => {
            if entering {
                context.write_str("<span class=\"function-plot\" data-expression=\"")?;
                context.escape(&nfp.expression)?;
                context.write_str("\"")?;
                if let Some(domain) = nfp.ranges.first() {
                    write!(context, " data-domain=\"{},{}\"", domain.from, domain.to)?;
                }
                if let Some(range) = nfp.ranges.get(1) {
                    write!(context, " data-range=\"{},{}\"", range.from, range.to)?;
                }
                context.write_str("></span>")?;
            }
        }

        NodeValue::Abbreviation(ref na) => {
            if entering {
                context.write_str("<abbr title=\"")?;
                context.escape(&na.title)?;
                context.write_str("\">")?;
                context.escape(&na.abbr)?;
                context.write_str("</abbr>")?;
            }
        }

        NodeValue::FootnoteReference(ref nfr) => {
            if entering {
                context.write_str("<sup class=\"footnote-ref\"><a href=\"#fn-")?;
                context.escape_href(&nfr.name)?;
                context.write_str("\" id=\"fnref-")?;
                context.escape_href(&nfr.name)?;
                if nfr.ref_num > 1 {
                    write!(context, "-{}", nfr.ref_num)?;
                }
                write!(context, "\" data-footnote-ref>{}</a></sup>", nfr.ix)?;
            }
        }

        NodeValue::AnchorTarget(ref name) => {
            if entering {
                context.write_str("<span id=\"")?;
                context.escape(name)?;
                context.write_str("\">")?;
                context.escape(name)?;
                context.write_str("</span>")?;
            }
        }

        NodeValue::AnchorLink(ref key) => {
            if entering {
                context.write_str("<a href=\"#")?;
                context.escape_href(key)?;
                context.write_str("\">")?;
                context.escape(key)?;
                context.write_str("</a>")?;
            }
        }

        #[cfg(feature = "shortcodes")]
        NodeValue::ShortCode(ref nsc) => {
            if entering {
                context.write_str(&nsc.emoji)?;
            }
        }
    }

    Ok(false)
}

fn render_sourcepos<'a>(context: &Context, node: &'a AstNode<'a>) -> String {
    if context.options.render.sourcepos {
        format!(" data-sourcepos=\"{}\"", node.data.borrow().sourcepos)
    } else {
        String::new()
    }
}

fn put_footnote_backref(context: &mut Context, nfd: &NodeFootnoteDefinition) -> fmt::Result {
    let mut ref_num = 1;
    while ref_num <= nfd.total_references {
        context.write_str(" <a href=\"#fnref-")?;
        context.escape_href(&nfd.name)?;
        if ref_num > 1 {
            write!(context, "-{}", ref_num)?;
        }
        write!(
            context,
            "\" class=\"footnote-backref\" data-footnote-backref \
             data-footnote-backref-idx=\"{}\" aria-label=\"Back to reference {}\">↩",
            ref_num, ref_num
        )?;
        if ref_num > 1 {
            write!(context, "<sup class=\"footnote-ref\">{}</sup>", ref_num)?;
        }
        context.write_str("</a>")?;
        ref_num += 1;
    }
    Ok(())
}

fn is_footnote_definition<'a>(node: Option<&'a AstNode<'a>>) -> bool {
    node.map_or(false, |node| {
        matches!(node.data.borrow().value, NodeValue::FootnoteDefinition(..))
    })
}

fn is_table_header<'a>(node: Option<&'a AstNode<'a>>) -> bool {
    node.map_or(false, |node| {
        matches!(node.data.borrow().value, NodeValue::TableRow(true))
    })
}

fn table_cell_alignment<'a>(cell: &'a AstNode<'a>) -> Option<&'static str> {
    let table = cell.parent()?.parent()?;

    let mut ix = 0;
    let mut sibling = cell.previous_sibling();
    while let Some(node) = sibling {
        ix += 1;
        sibling = node.previous_sibling();
    }

    match table.data.borrow().value {
        NodeValue::Table(ref alignments) => alignments.get(ix).and_then(TableAlignment::html_name),
        _ => None,
    }
}

/// Writes an opening HTML tag with the given attributes, sorted by name so
/// the output is deterministic.  Attribute values are escaped.
pub fn write_opening_tag<K, V>(
    output: &mut dyn Write,
    tag: &str,
    attributes: impl IntoIterator<Item = (K, V)>,
) -> fmt::Result
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut attributes: Vec<(K, V)> = attributes.into_iter().collect();
    attributes.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    write!(output, "<{}", tag)?;
    for (name, value) in attributes {
        write!(output, " {}=\"", name.as_ref())?;
        escape(output, value.as_ref())?;
        output.write_str("\"")?;
    }
    output.write_str(">")
}

/// Writes `buffer` to `output`, escaping anything that could be interpreted
/// as an HTML tag or entity.
pub fn escape(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    const NEEDS_ESCAPED: [bool; 256] = character_set(b"\"&<>");

    let bytes = buffer.as_bytes();
    let mut offset = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if NEEDS_ESCAPED[byte as usize] {
            let esc: &str = match byte {
                b'"' => "&quot;",
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                _ => unreachable!(),
            };
            output.write_str(&buffer[offset..i])?;
            output.write_str(esc)?;
            offset = i + 1;
        }
    }
    output.write_str(&buffer[offset..])?;
    Ok(())
}

/// Writes `buffer` to `output`, escaped in a manner appropriate for URLs in
/// HTML attributes.  Unsafe bytes are percent-encoded.
pub fn escape_href(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    const HREF_SAFE: [bool; 256] = character_set(
        b"-_.+!*(),%#@?=;:/,+$~abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    );

    let bytes = buffer.as_bytes();
    let size = bytes.len();
    let mut i = 0;

    while i < size {
        let org = i;
        while i < size && HREF_SAFE[bytes[i] as usize] {
            i += 1;
        }

        if i > org {
            output.write_str(&buffer[org..i])?;
        }

        if i >= size {
            break;
        }

        match bytes[i] {
            b'&' => output.write_str("&amp;")?,
            b'\'' => output.write_str("&#x27;")?,
            _ => write!(output, "%{:02X}", bytes[i])?,
        }

        i += 1;
    }

    Ok(())
}
