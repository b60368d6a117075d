use std::cell::Cell;
use std::fmt::{self, Debug, Formatter, Write};

use crate::html;
use crate::parser::{Options, Plugins};

/// The state carried through a formatting pass: the output stream, the
/// options and plugins in effect, and the newline discipline.
pub struct Context<'o, 'c> {
    output: &'o mut dyn Write,
    last_was_lf: Cell<bool>,

    /// The options to use when formatting.
    pub options: &'o Options<'c>,

    /// The plugins to use when formatting.
    pub plugins: &'o Plugins<'o>,
}

impl<'o, 'c> Context<'o, 'c> {
    pub(crate) fn new(
        output: &'o mut dyn Write,
        options: &'o Options<'c>,
        plugins: &'o Plugins<'o>,
    ) -> Self {
        Context {
            output,
            last_was_lf: Cell::new(true),
            options,
            plugins,
        }
    }

    /// Ensures the output ends with a newline, so the next tag written
    /// starts on a fresh line.
    pub fn cr(&mut self) -> fmt::Result {
        if !self.last_was_lf.get() {
            self.write_str("\n")?;
        }
        Ok(())
    }

    /// Writes `buffer` to the output, escaping HTML metacharacters.
    pub fn escape(&mut self, buffer: &str) -> fmt::Result {
        html::escape(self, buffer)
    }

    /// Writes `buffer` to the output, escaped for use inside a URL
    /// attribute.
    pub fn escape_href(&mut self, buffer: &str) -> fmt::Result {
        html::escape_href(self, buffer)
    }
}

impl<'o, 'c> Write for Context<'o, 'c> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if !s.is_empty() {
            self.last_was_lf.set(s.ends_with('\n'));
        }
        self.output.write_str(s)
    }
}

impl<'o, 'c> Debug for Context<'o, 'c> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("<crossdown::html::Context>")
    }
}
