//! Fragment sequence normalization.
//!
//! The walker builds fragment sequences bottom-up from arbitrarily nested
//! markup, which leaves them littered with empty fragments and split runs of
//! identical kinds. [`merge`] restores the well-formed shape (no empty
//! fragments, no mergeable adjacency), and [`strip`]/[`strip_left`]/
//! [`strip_right`] trim the *effective concatenated text* of a sequence
//! without collapsing its typed structure.
//!
//! Both operations are idempotent and always return new sequences.
//!
//! # Example
//!
//! ```
//! use doxy_commands_core::{merge, strip, Fragment};
//!
//! let pieces = vec![
//!     Fragment::text("  Hello "),
//!     Fragment::text("world"),
//!     Fragment::text("  "),
//! ];
//! let normalized = strip(&merge(&pieces), None);
//! assert_eq!(normalized.len(), 1);
//! assert_eq!(normalized[0].content, "Hello world");
//! ```

use crate::Fragment;

/// Merges adjacent fragments of identical kind and hyperlink, dropping
/// fragments with empty content.
///
/// One literal exception: the "Click here for the corresponding
/// documentation" boilerplate must survive as three separate `Text`
/// fragments so a renderer that cannot represent hyperlinks can detect and
/// strip the whole phrase as a unit. The first two boundaries of that phrase
/// are therefore never merged; content within and after its third fragment
/// merges normally, which keeps line-break fragments attached to the text
/// that follows the phrase.
///
/// Idempotent: `merge(&merge(s)) == merge(s)`.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{merge, Fragment, FragmentKind};
///
/// let merged = merge(&[
///     Fragment::text("one "),
///     Fragment::text(""),
///     Fragment::text("two"),
///     Fragment::new(FragmentKind::Code, "\\brief"),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].content, "one two");
/// ```
pub fn merge(fragments: &[Fragment]) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(prev)
                if prev.kind == fragment.kind
                    && prev.hyperlink == fragment.hyperlink
                    && !suppresses_merge(prev, fragment) =>
            {
                prev.content.push_str(&fragment.content);
            }
            _ => out.push(fragment.clone()),
        }
    }
    out
}

/// Returns `true` for the two boundaries of the external-documentation
/// boilerplate phrase that must stay split (see [`merge`]).
///
/// This is a hand-coded exception tied to exact substrings of the help page,
/// not a general rule.
fn suppresses_merge(prev: &Fragment, next: &Fragment) -> bool {
    let prev_end = prev.content.trim_end();
    let next_start = next.content.trim_start();
    (prev_end.ends_with("Click") && next_start.starts_with("here"))
        || (prev_end.ends_with("here") && next_start.starts_with("for the corresponding"))
}

fn trim_start_with<'a>(content: &'a str, charset: Option<&[char]>) -> &'a str {
    match charset {
        Some(set) => content.trim_start_matches(|ch| set.contains(&ch)),
        None => content.trim_start(),
    }
}

fn trim_end_with<'a>(content: &'a str, charset: Option<&[char]>) -> &'a str {
    match charset {
        Some(set) => content.trim_end_matches(|ch| set.contains(&ch)),
        None => content.trim_end(),
    }
}

/// Trims the given characters (whitespace when `charset` is `None`) from the
/// start of a sequence's effective text.
///
/// Iterates to a fixed point: trimming the first fragment can empty it, and
/// the re-merge can then newly adjoin two fragments that were previously
/// separated, exposing further leading characters to trim. Each iteration
/// strictly shrinks the sequence's total content, so the loop terminates.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{strip_left, Fragment, FragmentKind};
///
/// let stripped = strip_left(
///     &[Fragment::text("   "), Fragment::new(FragmentKind::Code, "int x;")],
///     None,
/// );
/// assert_eq!(stripped.len(), 1);
/// assert_eq!(stripped[0].content, "int x;");
/// ```
pub fn strip_left(fragments: &[Fragment], charset: Option<&[char]>) -> Vec<Fragment> {
    let mut current = merge(fragments);
    loop {
        let Some(first) = current.first_mut() else {
            return current;
        };
        let trimmed = trim_start_with(&first.content, charset);
        if trimmed.len() == first.content.len() {
            return current;
        }
        first.content = trimmed.to_string();
        current = merge(&current);
    }
}

/// Trims the given characters (whitespace when `charset` is `None`) from the
/// end of a sequence's effective text. See [`strip_left`].
pub fn strip_right(fragments: &[Fragment], charset: Option<&[char]>) -> Vec<Fragment> {
    let mut current = merge(fragments);
    loop {
        let Some(last) = current.last_mut() else {
            return current;
        };
        let trimmed = trim_end_with(&last.content, charset);
        if trimmed.len() == last.content.len() {
            return current;
        }
        last.content = trimmed.to_string();
        current = merge(&current);
    }
}

/// Trims both ends of a sequence's effective text.
///
/// Idempotent: `strip(&strip(s, cs), cs) == strip(s, cs)`.
///
/// # Examples
///
/// ```
/// use doxy_commands_core::{strip, Fragment};
///
/// let stripped = strip(&[Fragment::text("\n\nSee below.\n")], Some(&['\n']));
/// assert_eq!(stripped[0].content, "See below.");
/// ```
pub fn strip(fragments: &[Fragment], charset: Option<&[char]>) -> Vec<Fragment> {
    strip_right(&strip_left(fragments, charset), charset)
}
