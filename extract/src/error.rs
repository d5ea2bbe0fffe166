//! Error types for help-page extraction.
//!
//! Every failure is fatal to the extraction run: the help page is a trusted
//! but structurally fragile input, and a malformed document must be fixed at
//! the source rather than worked around. Each variant carries enough context
//! (the offending node's category or text) to locate the defect by hand.

use thiserror::Error;

/// Errors that can occur while extracting commands from the help page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A command heading does not start with the command escape character.
    #[error("heading does not start with '\\': {0}")]
    MalformedHeader(String),

    /// A table has an irregular row/column shape or no single body section.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// A node violated a "children must be simple" structural assumption.
    #[error("unexpected document structure: {0}")]
    UnexpectedStructure(String),

    /// A hyperlink wraps content that already carries one.
    #[error("nested hyperlink: {url} wraps content already linking to {existing}")]
    NestedHyperlink {
        /// Link already stamped on the inner fragment.
        existing: String,
        /// Link of the enclosing anchor.
        url: String,
    },

    /// A hyperlink target is empty or not an absolute http(s) URL.
    #[error("invalid hyperlink target: {0:?}")]
    InvalidHyperlink(String),

    /// An anchor node carries an attribute combination that is neither a
    /// hyperlink nor a cross-reference target.
    #[error("unexpected anchor form: {0}")]
    UnexpectedAnchorForm(String),

    /// An image other than the known LaTeX logo.
    #[error("unrecognized image with alt text: {0:?}")]
    UnrecognizedImage(String),

    /// A command heading has no leading anchor child with an id.
    #[error("heading has no anchor: {0}")]
    MissingAnchor(String),
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
