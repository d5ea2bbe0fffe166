//! Extraction of typed command documentation from the Doxygen help page.
//!
//! The pipeline: [`html::parse_html`] loads the page into a generic
//! [`dom::DocTree`], [`extractor::extract_commands`] locates each command's
//! heading and body and drives the recursive [`walker`] over the body nodes,
//! and [`output`] renders the resulting records as C#, JSON, or a debug
//! dump.
//!
//! The whole conversion is a pure function of the input document; every
//! structural surprise in the page fails the run with an
//! [`error::ExtractError`] rather than producing partial output.
//!
//! # Example
//!
//! ```
//! use doxy_commands_extract::extract_from_html;
//!
//! let html = r#"
//! <div class="contents">
//! <center>Introduction</center>
//! <h1><a class="anchor" id="cmda"></a>\a &lt;word&gt;</h1>
//! <p>Displays the argument in italics.</p>
//! </div>"#;
//!
//! let commands = extract_from_html(html).unwrap();
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands[0].name, "a");
//! assert_eq!(commands[0].anchor, "cmda");
//! ```

pub mod dom;
pub mod error;
pub mod extractor;
pub mod header;
pub mod html;
pub mod output;
pub mod table;
pub mod walker;

pub use error::{ExtractError, Result};

use doxy_commands_core::Command;

/// Parses an HTML help page and extracts every command it documents.
pub fn extract_from_html(html: &str) -> Result<Vec<Command>> {
    let doc = html::parse_html(html);
    extractor::extract_commands(&doc)
}
