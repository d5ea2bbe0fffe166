//! Lossless debug stringification of fragment sequences.
//!
//! Purely for inspection and debugging; not part of the data contract. Each
//! fragment is wrapped in a kind-specific marker pair, and a hyperlink, when
//! present, is appended as `§url§`.

use std::fmt::Write;

use crate::{Fragment, FragmentKind};

/// Renders a fragment sequence into a human-readable string.
///
/// Markers: `<text>`, `` ```code``` ``, `*emphasis*`, `!note!`,
/// `!!!warning!!!`, `[cross-reference]`.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{render_fragments, Fragment, FragmentKind};
///
/// let rendered = render_fragments(&[
///     Fragment::text("see "),
///     Fragment::new(FragmentKind::CrossReference, "\\ref")
///         .with_hyperlink("https://example.org#cmdref"),
/// ]);
/// assert_eq!(rendered, "<see >[\\ref]§https://example.org#cmdref§");
/// ```
pub fn render_fragments(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        let (open, close) = markers(fragment.kind);
        out.push_str(open);
        out.push_str(&fragment.content);
        out.push_str(close);
        if let Some(url) = &fragment.hyperlink {
            let _ = write!(out, "§{url}§");
        }
    }
    out
}

fn markers(kind: FragmentKind) -> (&'static str, &'static str) {
    match kind {
        FragmentKind::Text => ("<", ">"),
        FragmentKind::Code => ("```", "```"),
        FragmentKind::Emphasis => ("*", "*"),
        FragmentKind::Note => ("!", "!"),
        FragmentKind::Warning => ("!!!", "!!!"),
        FragmentKind::CrossReference => ("[", "]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_kinds() {
        let fragments = vec![
            Fragment::text("t"),
            Fragment::new(FragmentKind::Code, "c"),
            Fragment::new(FragmentKind::Emphasis, "e"),
            Fragment::new(FragmentKind::Note, "Note:"),
            Fragment::new(FragmentKind::Warning, "Warning:"),
            Fragment::new(FragmentKind::CrossReference, "\\x"),
        ];
        assert_eq!(
            render_fragments(&fragments),
            "<t>```c```*e*!Note:!!!!Warning:!!![\\x]"
        );
    }

    #[test]
    fn test_render_hyperlink_suffix() {
        let fragments = vec![Fragment::text("here").with_hyperlink("https://example.org")];
        assert_eq!(render_fragments(&fragments), "<here>§https://example.org§");
    }
}
