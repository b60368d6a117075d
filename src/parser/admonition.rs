/// The metadata of an Admonition node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAdmonition {
    /// The kind word exactly as written, e.g. `note` or `warning`.
    pub kind: String,

    /// Overridden title.  `None` falls back to the capitalized kind;
    /// `Some("")` suppresses the title line entirely.
    pub title: Option<String>,
}

impl NodeAdmonition {
    /// Returns the title used when none is given: the kind with its first
    /// letter upper-cased.
    pub(crate) fn default_title(&self) -> String {
        let mut chars = self.kind.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// The flavor of a bordered box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    /// Fenced by `!!!` lines.
    Alert,

    /// Fenced by `!!` lines.
    Notice,
}

impl BoxKind {
    /// Returns the CSS class to use for a box flavor.
    pub(crate) fn css_class(&self) -> &'static str {
        match *self {
            BoxKind::Alert => "box-alert",
            BoxKind::Notice => "box-notice",
        }
    }

    pub(crate) fn xml_name(&self) -> &'static str {
        match *self {
            BoxKind::Alert => "alert",
            BoxKind::Notice => "notice",
        }
    }
}
