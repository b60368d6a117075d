//! The XML formatter: a direct serialization of the AST, mostly useful for
//! inspecting what the parser produced.

use std::cmp;
use std::fmt::{self, Write};

use crate::character_set::character_set;
use crate::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use crate::parser::{Options, Plugins};

const MAX_INDENT: u32 = 40;

/// Formats an AST as XML, modified by the given options.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> fmt::Result {
    format_document_with_plugins(root, options, output, &Plugins::default())
}

/// Formats an AST as XML, modified by the given options.  Accepts custom
/// plugins.
pub fn format_document_with_plugins<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
    _plugins: &Plugins,
) -> fmt::Result {
    output.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
    output.write_str("<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n")?;

    XmlFormatter::new(options, output).format(root)
}

struct XmlFormatter<'o, 'c> {
    output: &'o mut dyn Write,
    options: &'o Options<'c>,
    indent: u32,
}

impl<'o, 'c> XmlFormatter<'o, 'c> {
    fn new(options: &'o Options<'c>, output: &'o mut dyn Write) -> Self {
        XmlFormatter {
            options,
            output,
            indent: 0,
        }
    }

    fn escape(&mut self, buffer: &str) -> fmt::Result {
        const XML_UNSAFE: [bool; 256] = character_set(b"&<>\"\0");

        let bytes = buffer.as_bytes();
        let mut offset = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            if XML_UNSAFE[byte as usize] {
                let esc: &str = match byte {
                    b'"' => "&quot;",
                    b'&' => "&amp;",
                    b'<' => "&lt;",
                    b'>' => "&gt;",
                    b'\0' => "\u{fffd}",
                    _ => unreachable!(),
                };
                self.output.write_str(&buffer[offset..i])?;
                self.output.write_str(esc)?;
                offset = i + 1;
            }
        }
        self.output.write_str(&buffer[offset..])?;
        Ok(())
    }

    fn format<'a>(&mut self, node: &'a AstNode<'a>) -> fmt::Result {
        // Pre-order rendering of the opening tag, then the children, then
        // the closing tag, all driven by a work stack rather than
        // recursion.
        enum Phase {
            Pre,
            Post,
        }
        let mut stack = vec![(node, Phase::Pre)];

        while let Some((node, phase)) = stack.pop() {
            match phase {
                Phase::Pre => {
                    stack.push((node, Phase::Post));
                    self.format_node(node, true)?;

                    for ch in node.reverse_children() {
                        stack.push((ch, Phase::Pre));
                    }
                }
                Phase::Post => {
                    self.format_node(node, false)?;
                }
            }
        }

        Ok(())
    }

    fn indent(&mut self) -> fmt::Result {
        for _ in 0..(cmp::min(self.indent, MAX_INDENT)) {
            self.output.write_str(" ")?;
        }
        Ok(())
    }

    fn format_node<'a>(&mut self, node: &'a AstNode<'a>, entering: bool) -> fmt::Result {
        if entering {
            self.indent()?;

            let ast = node.data.borrow();

            write!(self.output, "<{}", ast.value.xml_node_name())?;

            if self.options.render.sourcepos && ast.sourcepos.start.line != 0 {
                write!(self.output, " sourcepos=\"{}\"", ast.sourcepos)?;
            }

            let mut was_literal = false;

            match ast.value {
                NodeValue::Document
                | NodeValue::Paragraph
                | NodeValue::ThematicBreak
                | NodeValue::FootnoteSlot
                | NodeValue::Item(..)
                | NodeValue::Table(..)
                | NodeValue::TableRow(..)
                | NodeValue::SoftBreak
                | NodeValue::Emph
                | NodeValue::Strong
                | NodeValue::StrongEmph
                | NodeValue::Underline
                | NodeValue::Strikethrough
                | NodeValue::Highlight
                | NodeValue::EmphasizedCode => {}

                NodeValue::BlockQuote(level) => {
                    write!(self.output, " level=\"{}\"", level)?;
                }

                NodeValue::List(ref nl) => {
                    write!(self.output, " type=\"{}\"", nl.list_type.xml_name())?;
                    if nl.list_type == ListType::Ordered {
                        write!(self.output, " start=\"{}\"", nl.start)?;
                    }
                }

                NodeValue::Heading(ref nh) => {
                    write!(self.output, " level=\"{}\"", nh.level)?;
                    if let Some(ref prefix) = nh.outline {
                        self.output.write_str(" outline=\"")?;
                        self.escape(prefix)?;
                        self.output.write_str("\"")?;
                    }
                }

                NodeValue::CodeBlock(ref ncb) => {
                    if !ncb.info.is_empty() {
                        self.output.write_str(" info=\"")?;
                        self.escape(&ncb.info)?;
                        self.output.write_str("\"")?;
                    }
                    self.output.write_str(" xml:space=\"preserve\">")?;
                    self.escape(&ncb.literal)?;
                    write!(self.output, "</{}", ast.value.xml_node_name())?;
                    was_literal = true;
                }

                NodeValue::Admonition(ref na) => {
                    self.output.write_str(" kind=\"")?;
                    self.escape(&na.kind)?;
                    self.output.write_str("\"")?;
                    if let Some(ref title) = na.title {
                        self.output.write_str(" title=\"")?;
                        self.escape(title)?;
                        self.output.write_str("\"")?;
                    }
                }

                NodeValue::BorderedBox(kind) => {
                    write!(self.output, " kind=\"{}\"", kind.xml_name())?;
                }

                NodeValue::FootnoteDefinition(ref nfd) => {
                    self.output.write_str(" label=\"")?;
                    self.escape(&nfd.name)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::TableCell => {
                    if let Some(alignment) = cell_alignment(node) {
                        if alignment != TableAlignment::None {
                            write!(self.output, " align=\"{}\"", alignment.xml_name())?;
                        }
                    }
                }

                NodeValue::Text(ref literal) => {
                    self.output.write_str(" xml:space=\"preserve\">")?;
                    self.escape(literal)?;
                    write!(self.output, "</{}", ast.value.xml_node_name())?;
                    was_literal = true;
                }

                NodeValue::Code(ref nc) => {
                    self.output.write_str(" xml:space=\"preserve\">")?;
                    self.escape(&nc.literal)?;
                    write!(self.output, "</{}", ast.value.xml_node_name())?;
                    was_literal = true;
                }

                NodeValue::Math(ref nm) => {
                    self.output.write_str(" math_style=\"inline\" xml:space=\"preserve\">")?;
                    self.escape(&nm.literal)?;
                    write!(self.output, "</{}", ast.value.xml_node_name())?;
                    was_literal = true;
                }

                NodeValue::FunctionPlot(ref nfp) => {
                    self.output.write_str(" expression=\"")?;
                    self.escape(&nfp.expression)?;
                    self.output.write_str("\"")?;
                    if let Some(domain) = nfp.ranges.first() {
                        write!(self.output, " domain=\"{},{}\"", domain.from, domain.to)?;
                    }
                    if let Some(range) = nfp.ranges.get(1) {
                        write!(self.output, " range=\"{},{}\"", range.from, range.to)?;
                    }
                }

                NodeValue::PinyinAnnotation(ref annotation) => {
                    self.output.write_str(" annotation=\"")?;
                    self.escape(annotation)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::HiddenReveal(ref hidden) => {
                    self.output.write_str(" hidden=\"")?;
                    self.escape(hidden)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::Link(ref nl) | NodeValue::Image(ref nl) => {
                    self.output.write_str(" destination=\"")?;
                    self.escape(&nl.url)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::AutoLink(ref url) => {
                    self.output.write_str(" destination=\"")?;
                    self.escape(url)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::Abbreviation(ref na) => {
                    self.output.write_str(" title=\"")?;
                    self.escape(&na.title)?;
                    self.output.write_str("\" xml:space=\"preserve\">")?;
                    self.escape(&na.abbr)?;
                    write!(self.output, "</{}", ast.value.xml_node_name())?;
                    was_literal = true;
                }

                NodeValue::FootnoteReference(ref nfr) => {
                    self.output.write_str(" label=\"")?;
                    self.escape(&nfr.name)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::AnchorTarget(ref name) => {
                    self.output.write_str(" name=\"")?;
                    self.escape(name)?;
                    self.output.write_str("\"")?;
                }

                NodeValue::AnchorLink(ref key) => {
                    self.output.write_str(" target=\"")?;
                    self.escape(key)?;
                    self.output.write_str("\"")?;
                }

                #[cfg(feature = "shortcodes")]
                NodeValue::ShortCode(ref nsc) => {
                    self.output.write_str(" id=\"")?;
                    self.escape(&nsc.code)?;
                    self.output.write_str("\"")?;
                }
            }

            if node.first_child().is_some() {
                self.indent += 2;
            } else if !was_literal {
                self.output.write_str(" /")?;
            }
            self.output.write_str(">\n")?;
        } else if node.first_child().is_some() {
            self.indent -= 2;
            self.indent()?;
            writeln!(self.output, "</{}>", node.data.borrow().value.xml_node_name())?;
        }
        Ok(())
    }
}

fn cell_alignment<'a>(cell: &'a AstNode<'a>) -> Option<TableAlignment> {
    let table = cell.parent()?.parent()?;

    let mut ix = 0;
    let mut sibling = cell.previous_sibling();
    while let Some(node) = sibling {
        ix += 1;
        sibling = node.previous_sibling();
    }

    match table.data.borrow().value {
        NodeValue::Table(ref alignments) => alignments.get(ix).copied(),
        _ => None,
    }
}
