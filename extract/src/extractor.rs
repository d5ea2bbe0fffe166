//! Top-level command extraction driver.
//!
//! Finds each command's `<h1>` heading after the first `<center>` separator,
//! walks the sibling run up to the next heading as the command's body, and
//! assembles one [`Command`] per heading. Fails fast on the first structural
//! violation; partial output is worse than no output for a generated file.

use doxy_commands_core::{Command, Fragment, strip};
use tracing::{debug, info};

use crate::dom::{DocTree, NodeId};
use crate::error::{ExtractError, Result};
use crate::header::split_command_header;
use crate::walker::{identity, walk_node};

/// Extracts every command documented in the page, in document order.
///
/// The command descriptions start at the first `<h1>` following the first
/// `<center>` tag; a missing skeleton fails with
/// [`ExtractError::UnexpectedStructure`].
pub fn extract_commands(doc: &DocTree) -> Result<Vec<Command>> {
    let center = doc.find_first_element("center").ok_or_else(|| {
        ExtractError::UnexpectedStructure("document has no <center> section separator".into())
    })?;

    let mut commands = Vec::new();
    let mut heading = doc.find_next_sibling_element(center, "h1");
    while let Some(h1) = heading {
        let mut fragments = Vec::new();
        let mut cursor = doc.next_sibling(h1);
        while let Some(node) = cursor {
            if doc.tag(node) == Some("h1") {
                break;
            }
            fragments.extend(walk_node(doc, node, &identity)?);
            cursor = doc.next_sibling(node);
        }

        let body = strip_navigation_tail(strip(&fragments, None));
        let command = build_command(doc, h1, body)?;
        debug!(name = %command.name, fragments = command.body.len(), "extracted command");
        commands.push(command);
        heading = cursor;
    }

    info!(commands = commands.len(), "help page extraction complete");
    Ok(commands)
}

const NAVIGATION_TAIL: &str = "Go to the next section or return to the index";

/// Drops the "Go to the next section or return to the index." navigation
/// text the page appends to every command body. It survives the walker when
/// interleaved hyperlinks or line wrapping split it across fragments, and
/// merging can glue its opening words onto preceding prose, so the tail is
/// located by offset in the concatenated body text and the containing
/// fragment is split at that offset.
fn strip_navigation_tail(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let text: String = fragments
        .iter()
        .map(|fragment| fragment.content.as_str())
        .collect();
    let Some(offset) = text.rfind("Go to the") else {
        return fragments;
    };
    let normalized = text[offset..].split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.starts_with(NAVIGATION_TAIL) {
        return fragments;
    }

    let mut out = Vec::new();
    let mut consumed = 0;
    for fragment in fragments {
        let end = consumed + fragment.content.len();
        if end <= offset {
            out.push(fragment);
        } else {
            if consumed < offset {
                let mut head = fragment;
                head.content.truncate(offset - consumed);
                out.push(head);
            }
            break;
        }
        consumed = end;
    }
    strip(&out, None)
}

fn build_command(doc: &DocTree, h1: NodeId, body: Vec<Fragment>) -> Result<Command> {
    let heading = doc.text_content(h1).trim().to_string();
    let anchor = heading_anchor(doc, h1, &heading)?;
    let (name, parameters) = split_command_header(&heading)?;
    Ok(Command::new(name, parameters, anchor, body))
}

/// The heading's first child must be an `<a>` with a non-empty `id`; that id
/// is the anchor used to deep-link back into the online manual.
fn heading_anchor(doc: &DocTree, h1: NodeId, heading: &str) -> Result<String> {
    let first = doc
        .children(h1)
        .iter()
        .copied()
        .find(|&child| !doc.is_bare_newline(child));
    let Some(node) = first else {
        return Err(ExtractError::MissingAnchor(heading.to_string()));
    };
    if doc.tag(node) != Some("a") {
        return Err(ExtractError::MissingAnchor(heading.to_string()));
    }
    match doc.attr(node, "id") {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ExtractError::MissingAnchor(heading.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;
    use doxy_commands_core::FragmentKind;

    fn page(body: &str) -> String {
        format!(
            "<html><body><div class=\"contents\">\n<center>Introduction</center>\n{body}</div></body></html>"
        )
    }

    #[test]
    fn test_missing_center_is_rejected() {
        let doc = parse_html("<html><body><h1>\\a</h1></body></html>");
        let err = extract_commands(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::UnexpectedStructure(_)));
    }

    #[test]
    fn test_empty_page_yields_no_commands() {
        let doc = parse_html(&page(""));
        assert!(extract_commands(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_single_command() {
        let html = page(
            "<h1><a class=\"anchor\" id=\"cmda\"></a>\\a &lt;word&gt;</h1>\n\
             <p>Displays the argument in italics.</p>\n",
        );
        let doc = parse_html(&html);
        let commands = extract_commands(&doc).unwrap();
        assert_eq!(commands.len(), 1);
        let command = &commands[0];
        assert_eq!(command.name, "a");
        assert_eq!(command.parameters, "<word>");
        assert_eq!(command.anchor, "cmda");
        assert_eq!(
            command.body,
            vec![Fragment::text("Displays the argument in italics.")]
        );
    }

    #[test]
    fn test_navigation_tail_is_stripped() {
        let html = page(
            "<h1><a class=\"anchor\" id=\"cmdb\"></a>\\b &lt;word&gt;</h1>\n\
             <p>Displays the argument in bold.</p>\n\
             <p>Go to the <a href=\"https://example.org/next\">next</a> section or return to the \
             <a href=\"https://example.org/index\">index</a>.</p>\n",
        );
        let doc = parse_html(&html);
        let commands = extract_commands(&doc).unwrap();
        assert_eq!(
            commands[0].body,
            vec![Fragment::text("Displays the argument in bold.")]
        );
    }

    #[test]
    fn test_navigation_tail_split_across_fragments() {
        // A hyperlink in the middle of the navigation sentence keeps the
        // paragraph-level suppression from matching; the tail stripper has
        // to catch it on the whitespace-normalized concatenation.
        let html = page(
            "<h1><a class=\"anchor\" id=\"cmdd\"></a>\\d</h1>\n\
             <dl><dd>Body text.</dd></dl>\n\
             <dl><dd>Go to the <a href=\"https://example.org/n\">next</a>\n \
             section or return to the index.</dd></dl>\n",
        );
        let doc = parse_html(&html);
        let commands = extract_commands(&doc).unwrap();
        assert_eq!(commands[0].body, vec![Fragment::text("Body text.")]);
    }

    #[test]
    fn test_go_to_prose_is_not_stripped() {
        let html = page(
            "<h1><a class=\"anchor\" id=\"cmde\"></a>\\e</h1>\n\
             <p>Go to the definition of the symbol.</p>\n",
        );
        let doc = parse_html(&html);
        let commands = extract_commands(&doc).unwrap();
        assert_eq!(
            commands[0].body,
            vec![Fragment::text("Go to the definition of the symbol.")]
        );
    }

    #[test]
    fn test_heading_without_anchor_is_rejected() {
        let html = page("<h1>\\c &lt;word&gt;</h1>\n<p>text</p>\n");
        let doc = parse_html(&html);
        let err = extract_commands(&doc).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingAnchor("\\c <word>".to_string())
        );
    }

    #[test]
    fn test_cross_reference_body_fragment() {
        let html = page(
            "<h1><a class=\"anchor\" id=\"cmdsa\"></a>\\sa { references }</h1>\n\
             <p>Equivalent to <a href=\"https://example.org/#cmdsee\">\\see</a>.</p>\n",
        );
        let doc = parse_html(&html);
        let commands = extract_commands(&doc).unwrap();
        let body = &commands[0].body;
        assert_eq!(body[0], Fragment::text("Equivalent to "));
        assert_eq!(body[1].kind, FragmentKind::CrossReference);
        assert_eq!(body[1].content, "\\see");
        assert_eq!(body[1].hyperlink.as_deref(), Some("https://example.org/#cmdsee"));
        assert_eq!(body[2], Fragment::text("."));
    }
}
