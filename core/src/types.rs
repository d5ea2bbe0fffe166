//! Fragment and command type definitions.
//!
//! This module defines the typed unit of extracted documentation content
//! ([`Fragment`]) and the per-command record ([`Command`]) assembled from a
//! fragment sequence. The types derive [`serde`] traits so they can be
//! serialized to JSON or embedded as static data by a renderer.

use serde::{Deserialize, Serialize};

/// The character that introduces a Doxygen command (`\ref`, `\param`, ...).
///
/// Content whose text starts with this character names another command; the
/// walker re-tags such link fragments as [`FragmentKind::CrossReference`].
pub const COMMAND_ESCAPE: char = '\\';

/// Semantic classification of a piece of documentation content.
///
/// A closed set: every piece of inline content in a command description maps
/// to exactly one of these kinds. Renderers map each kind to a target-format
/// symbol (e.g. bold, monospace) when serializing.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::FragmentKind;
///
/// let kind = FragmentKind::default();
/// assert_eq!(kind, FragmentKind::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FragmentKind {
    /// Plain prose (the default kind).
    #[default]
    Text,
    /// Inline code or a preformatted code block.
    Code,
    /// Emphasized prose.
    Emphasis,
    /// The label of a "Note:" block.
    Note,
    /// The label of a "Warning:" block.
    Warning,
    /// Content that names another command (starts with [`COMMAND_ESCAPE`]).
    CrossReference,
}

/// One typed unit of extracted documentation content.
///
/// Fragments are immutable once they are part of a finalized sequence: the
/// normalization operations in [`merge`](crate::merge) always return new
/// sequences, and consumers that need escaped content must produce copies.
///
/// Invariants for finalized sequences:
/// - `content` is never empty (empty fragments are pruned during merging),
/// - `hyperlink`, when present, is a non-empty absolute `http(s)` URL,
/// - a fragment never carries more than one hyperlink; nested hyperlinks in
///   the source document are a structural error, not something to flatten.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{Fragment, FragmentKind};
///
/// let plain = Fragment::text("See the manual");
/// assert_eq!(plain.kind, FragmentKind::Text);
/// assert!(plain.hyperlink.is_none());
///
/// let linked = Fragment::new(FragmentKind::CrossReference, "\\ref")
///     .with_hyperlink("https://www.doxygen.nl/manual/commands.html#cmdref");
/// assert!(linked.hyperlink.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Semantic kind of this content.
    pub kind: FragmentKind,
    /// The content itself, unescaped for any particular output syntax.
    pub content: String,
    /// Absolute URL this content links to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

impl Fragment {
    /// Creates a fragment of the given kind with no hyperlink.
    pub fn new(kind: FragmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            hyperlink: None,
        }
    }

    /// Creates a plain [`Text`](FragmentKind::Text) fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use doxy_commands_core::Fragment;
    ///
    /// let fragment = Fragment::text("hello");
    /// assert_eq!(fragment.content, "hello");
    /// ```
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(FragmentKind::Text, content)
    }

    /// Attaches a hyperlink target.
    pub fn with_hyperlink(mut self, url: impl Into<String>) -> Self {
        self.hyperlink = Some(url.into());
        self
    }

    /// Returns `true` if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One fully extracted command from the help page.
///
/// Constructed exactly once per heading found in the document and fully
/// populated before being exposed; no consumer may mutate `body` fragments
/// in place.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{Command, Fragment};
///
/// let command = Command::new(
///     "file",
///     "[<name>]",
///     "cmdfile",
///     vec![Fragment::text("Indicates that a comment block documents a file.")],
/// );
/// assert_eq!(command.name, "file");
/// assert_eq!(
///     command.documentation_url("https://www.doxygen.nl/manual/commands.html"),
///     "https://www.doxygen.nl/manual/commands.html#cmdfile",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// The command keyword, without the leading escape character.
    pub name: String,
    /// Trailing signature text, including bracketed optional arguments.
    pub parameters: String,
    /// Stable identifier of the command's heading in the source document.
    pub anchor: String,
    /// Normalized description, in document order.
    pub body: Vec<Fragment>,
}

impl Command {
    /// Creates a command record.
    pub fn new(
        name: impl Into<String>,
        parameters: impl Into<String>,
        anchor: impl Into<String>,
        body: Vec<Fragment>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into(),
            anchor: anchor.into(),
            body,
        }
    }

    /// Builds a deep link to this command's section of the source document.
    pub fn documentation_url(&self, base: &str) -> String {
        format!("{base}#{}", self.anchor)
    }
}
