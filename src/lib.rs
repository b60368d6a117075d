//! A parser and formatter for CrossDown, a Markdown superset with escape
//! preprocessing, comment stripping, pinyin ruby and hidden-reveal spans,
//! outline-numbered headings with document anchors, admonitions, bordered
//! boxes, and deferred footnote placement.
//!
//! The simplest interface is [`crossdown_to_html`]:
//!
//! ```
//! use crossdown::{crossdown_to_html, Options};
//! assert_eq!(crossdown_to_html("Hello, **世界**!", &Options::default()),
//!            "<p>Hello, <strong>世界</strong>!</p>\n");
//! ```
//!
//! When the AST itself is of interest, parse and format separately:
//!
//! ```
//! use crossdown::nodes::{AstNode, NodeValue};
//! use crossdown::{format_html, parse_document, Arena, Options};
//!
//! # fn main() {
//! // The returned nodes are created in the supplied Arena, and are bound by
//! // its lifetime.
//! let arena = Arena::new();
//! let options = Options::default();
//!
//! let root = parse_document(&arena, "This is my input.\n\n1. Also [my](#) input.\n", &options);
//!
//! fn iter_nodes<'a, F>(node: &'a AstNode<'a>, f: &F)
//! where
//!     F: Fn(&'a AstNode<'a>),
//! {
//!     f(node);
//!     for c in node.children() {
//!         iter_nodes(c, f);
//!     }
//! }
//!
//! iter_nodes(root, &|node| {
//!     if let NodeValue::Text(ref mut text) = node.data.borrow_mut().value {
//!         *text = text.replace("my", "your");
//!     }
//! });
//!
//! let mut html = String::new();
//! format_html(root, &options, &mut html).unwrap();
//!
//! assert_eq!(
//!     html,
//!     "<p>This is your input.</p>\n\
//!      <ol>\n\
//!      <li>Also <a href=\"#\">your</a> input.</li>\n\
//!      </ol>\n"
//! );
//! # }
//! ```

#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod adapters;
pub mod arena_tree;
mod character_set;
pub mod html;
pub mod nodes;
mod parser;
pub mod plugins;
mod scanners;
mod strings;
mod xml;

pub use typed_arena::Arena;

pub use crate::html::format_document as format_html;
pub use crate::html::format_document_with_plugins as format_html_with_plugins;
pub use crate::parser::{
    parse_document, BrokenLinkCallback, BrokenLinkReference, Options, ParseOptions, Plugins,
    RenderOptions, RenderPlugins, ResolvedReference,
};
pub use crate::xml::format_document as format_xml;
pub use crate::xml::format_document_with_plugins as format_xml_with_plugins;

/// Render CrossDown to HTML.
///
/// A convenience wrapper for when the AST is not needed; equivalent to
/// [`parse_document`] followed by [`format_html`].
pub fn crossdown_to_html(md: &str, options: &Options) -> String {
    crossdown_to_html_with_plugins(md, options, &Plugins::default())
}

/// Render CrossDown to HTML using plugins.
///
/// See the documentation of [`crossdown_to_html`].
pub fn crossdown_to_html_with_plugins(md: &str, options: &Options, plugins: &Plugins) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, md, options);
    let mut s = String::new();
    // Writing into a String cannot fail.
    format_html_with_plugins(root, options, &mut s, plugins).unwrap();
    s
}

/// Render CrossDown to the XML serialization of its AST.
pub fn crossdown_to_xml(md: &str, options: &Options) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, md, options);
    let mut s = String::new();
    // Writing into a String cannot fail.
    format_xml(root, options, &mut s).unwrap();
    s
}

/// Return the version of the crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
