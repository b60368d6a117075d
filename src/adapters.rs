//! Adapter traits for plugins.
//!
//! Each plugin has to implement one of the traits available in this module.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Implement this adapter for creating a plugin for custom syntax
/// highlighting of codefence blocks.
pub trait SyntaxHighlighterAdapter {
    /// Writes a syntax highlighted HTML output.
    ///
    /// `lang`: Name of the programming language (the info string of the
    /// codefence block after the initial "```" part).
    /// `code`: The source code to be syntax highlighted.
    fn write_highlighted(
        &self,
        output: &mut dyn fmt::Write,
        lang: Option<&str>,
        code: &str,
    ) -> fmt::Result;

    /// Writes the opening `<pre>` tag.  Some syntax highlighter libraries
    /// might include their own `<pre>` tag possibly with some HTML
    /// attributes pre-filled.
    ///
    /// `attributes`: A map of HTML attributes provided by the formatter.
    fn write_pre_tag<'s>(
        &self,
        output: &mut dyn fmt::Write,
        attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result;

    /// Writes the opening `<code>` tag.  Some syntax highlighter libraries
    /// might include their own `<code>` tag possibly with some HTML
    /// attributes pre-filled.
    ///
    /// `attributes`: A map of HTML attributes provided by the formatter.
    fn write_code_tag<'s>(
        &self,
        output: &mut dyn fmt::Write,
        attributes: HashMap<&'static str, Cow<'s, str>>,
    ) -> fmt::Result;
}
