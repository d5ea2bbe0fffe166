//! Core fragment model and normalization algebra.
//!
//! This crate defines the typed representation of extracted Doxygen command
//! documentation:
//!
//! - [`Fragment`] — one typed unit of content (plain text, code, emphasis,
//!   note/warning label, cross-reference), optionally carrying a hyperlink.
//! - [`Command`] — the per-command record (name, parameters, heading anchor,
//!   normalized fragment body).
//! - [`merge`] / [`strip`] — the normalization algebra that keeps fragment
//!   sequences well-formed under recursive composition: merging concatenates
//!   adjacent fragments of identical kind and hyperlink and prunes empty
//!   ones; stripping trims the effective concatenated text of a sequence via
//!   a trim-then-merge fixed-point loop.
//! - [`render_fragments`] — a lossless, human-readable stringification for
//!   debugging.
//!
//! The whole model is pure data: no I/O, no mutation of inputs, and every
//! operation returns new values.
//!
//! # Example
//!
//! ```
//! use doxy_commands_core::*;
//!
//! let body = strip(
//!     &merge(&[
//!         Fragment::text("Starts a paragraph. "),
//!         Fragment::text(""),
//!         Fragment::new(FragmentKind::Code, "\\par"),
//!         Fragment::text("  "),
//!     ]),
//!     None,
//! );
//! let command = Command::new("par", "[(paragraph title)]", "cmdpar", body);
//! assert_eq!(command.body.len(), 2);
//! assert_eq!(command.body[1].kind, FragmentKind::Code);
//! ```

mod merge;
mod render;
mod types;

pub use merge::{merge, strip, strip_left, strip_right};
pub use render::render_fragments;
pub use types::{COMMAND_ESCAPE, Command, Fragment, FragmentKind};
