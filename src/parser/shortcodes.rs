/// The details of an inline emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeShortCode {
    /// The shortcode as written between the colons.
    pub code: String,

    /// The emoji the shortcode resolved to.
    pub emoji: String,
}
