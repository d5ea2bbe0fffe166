//! Recursive tag-dispatch conversion from document nodes to fragments.
//!
//! Every node is classified into a closed [`NodeCategory`] and handled by
//! one rule per category; unrecognized elements fall through to the default
//! rule of concatenating their children's fragments. The rules reproduce
//! the help page's rendering conventions (paragraph spacing, note/warning
//! layout, list bullets, code indentation) as `Text`/`Code`/... fragments,
//! relying on [`merge`]/[`strip`] to keep the stream well-formed as results
//! compose bottom-up.

use std::sync::LazyLock;

use doxy_commands_core::{COMMAND_ESCAPE, Fragment, FragmentKind, merge, strip, strip_left, strip_right};
use regex::Regex;
use tracing::trace;

use crate::dom::{DocTree, NodeData, NodeId};
use crate::error::{ExtractError, Result};
use crate::table::format_table;

/// A paragraph consisting solely of this text links to the online manual and
/// is dropped (note the double space, an artifact of the page's line breaks).
const CLICK_HERE_PARAGRAPH: &str =
    "Click here  for the corresponding HTML documentation that is generated by doxygen.";

/// A paragraph consisting solely of this text is inter-section navigation.
const NAVIGATION_PARAGRAPH: &str = "Go to the next section or return to the index.";

/// Text rewrite hook applied to every raw text node during a walk.
///
/// Paragraph handling installs a newline-stripping decorator for its
/// subtree; everything else threads the caller's decorator through
/// unchanged. [`identity`] is the no-op decorator for top-level walks.
pub type Decorator<'a> = &'a dyn Fn(&str) -> String;

/// The no-op [`Decorator`].
pub fn identity(text: &str) -> String {
    text.to_string()
}

/// The closed set of node categories the walker knows how to handle.
///
/// Classification is by tag name, refined by the `class` attribute where
/// the help page overloads a tag (`dl`, `div`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Comment,
    TextNode,
    Paragraph,
    InlineCode,
    Emphasis,
    SeeAlso,
    NoteBlock,
    WarningBlock,
    UserSection,
    DefinitionTerm,
    DefinitionBody,
    CodeBlock,
    BulletList,
    ListItem,
    Table,
    Image,
    Anchor,
    Centering,
    /// Anything else: transparent, children are concatenated.
    Container,
}

/// Classifies a node into its [`NodeCategory`].
pub fn classify(doc: &DocTree, node: NodeId) -> NodeCategory {
    match doc.data(node) {
        NodeData::Comment => NodeCategory::Comment,
        NodeData::Text(_) => NodeCategory::TextNode,
        NodeData::Document => NodeCategory::Container,
        NodeData::Element { tag, .. } => match tag.as_str() {
            "p" => NodeCategory::Paragraph,
            "code" => NodeCategory::InlineCode,
            "em" => NodeCategory::Emphasis,
            "dl" => match doc.attr(node, "class") {
                Some("section see") => NodeCategory::SeeAlso,
                Some("section note") => NodeCategory::NoteBlock,
                Some("section warning") => NodeCategory::WarningBlock,
                Some("section user") => NodeCategory::UserSection,
                _ => NodeCategory::Container,
            },
            "dt" => NodeCategory::DefinitionTerm,
            "dd" => NodeCategory::DefinitionBody,
            "pre" | "blockquote" => NodeCategory::CodeBlock,
            "div" if doc.attr(node, "class") == Some("fragment") => NodeCategory::CodeBlock,
            "ul" => NodeCategory::BulletList,
            "li" => NodeCategory::ListItem,
            "table" => NodeCategory::Table,
            "img" => NodeCategory::Image,
            "a" => NodeCategory::Anchor,
            "center" => NodeCategory::Centering,
            _ => NodeCategory::Container,
        },
    }
}

/// Converts one node (recursively) into a fragment sequence.
pub fn walk_node(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let category = classify(doc, node);
    trace!(node = %doc.describe(node), ?category, "walking node");
    match category {
        NodeCategory::Comment | NodeCategory::Centering => Ok(Vec::new()),
        NodeCategory::TextNode => {
            let text = doc.text(node).unwrap_or_default();
            Ok(vec![Fragment::text(decorator(text))])
        }
        NodeCategory::Paragraph => paragraph(doc, node, decorator),
        NodeCategory::InlineCode => inline_code(doc, node, decorator),
        NodeCategory::Emphasis => emphasis(doc, node, decorator),
        NodeCategory::SeeAlso => see_also(doc, node, decorator),
        NodeCategory::NoteBlock => labeled_block(doc, node, decorator, FragmentKind::Note, "Note:"),
        NodeCategory::WarningBlock => {
            labeled_block(doc, node, decorator, FragmentKind::Warning, "Warning:")
        }
        NodeCategory::UserSection => {
            let mut fragments = walk_children(doc, node, decorator)?;
            fragments.push(Fragment::text("\n"));
            Ok(fragments)
        }
        NodeCategory::DefinitionTerm => {
            let mut fragments = walk_children(doc, node, decorator)?;
            fragments.push(Fragment::text(" "));
            Ok(fragments)
        }
        NodeCategory::DefinitionBody => definition_body(doc, node, decorator),
        NodeCategory::CodeBlock => code_block(doc, node),
        NodeCategory::BulletList => bullet_list(doc, node, decorator),
        NodeCategory::ListItem => list_item(doc, node, decorator),
        NodeCategory::Table => Ok(vec![format_table(doc, node)?]),
        NodeCategory::Image => image(doc, node),
        NodeCategory::Anchor => anchor(doc, node, decorator),
        NodeCategory::Container => walk_children(doc, node, decorator),
    }
}

/// Concatenates the fragment sequences of all children, in order.
pub fn walk_children(
    doc: &DocTree,
    node: NodeId,
    decorator: Decorator<'_>,
) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    for &child in doc.children(node) {
        fragments.extend(walk_node(doc, child, decorator)?);
    }
    Ok(fragments)
}

fn paragraph(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    // Line breaks inside a paragraph are layout, not content.
    let inner = |text: &str| decorator(text).replace('\r', "").replace('\n', "");
    let mut fragments = strip(&walk_children(doc, node, &inner)?, Some(&[' ']));

    let flat: String = fragments
        .iter()
        .map(|fragment| fragment.content.as_str())
        .collect();
    if flat == CLICK_HERE_PARAGRAPH || flat == NAVIGATION_PARAGRAPH {
        return Ok(Vec::new());
    }

    let followed_by_list = doc
        .next_sibling(node)
        .is_some_and(|next| doc.tag(next) == Some("ul"));
    if !flat.is_empty() && !followed_by_list {
        fragments.push(Fragment::text("\n"));
    }
    Ok(fragments)
}

fn inline_code(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    // Markup nested inside a code span is demoted to its text.
    let content: String = walk_children(doc, node, decorator)?
        .into_iter()
        .map(|fragment| fragment.content)
        .collect();
    Ok(vec![Fragment::new(FragmentKind::Code, content)])
}

fn emphasis(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let children = walk_children(doc, node, decorator)?;
    let mut content = String::new();
    for fragment in children {
        if fragment.kind != FragmentKind::Text {
            return Err(ExtractError::UnexpectedStructure(format!(
                "emphasis contains non-text content in {}",
                doc.describe(node)
            )));
        }
        content.push_str(&fragment.content);
    }
    Ok(vec![Fragment::new(FragmentKind::Emphasis, content)])
}

static SECTION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[Ss]ections?\b").expect("static regex must compile"));

/// Rewrites standalone "section(s)" into "command(s)" so that cross-manual
/// phrasing like "see section \page" reads correctly out of context. An
/// occurrence directly preceded by the escape character is the `\section`
/// command itself and is left alone.
fn replace_section_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in SECTION_WORD.find_iter(text) {
        out.push_str(&text[last..found.start()]);
        if text[..found.start()].ends_with(COMMAND_ESCAPE) {
            out.push_str(found.as_str());
        } else {
            out.push_str(match found.as_str() {
                "section" => "command",
                "Section" => "Command",
                "sections" => "commands",
                _ => "Commands",
            });
        }
        last = found.end();
    }
    out.push_str(&text[last..]);
    out
}

fn see_also(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let children = doc.children(node);
    if children.len() != 2 {
        return Err(ExtractError::UnexpectedStructure(format!(
            "\"see also\" block must have exactly 2 children, {} has {}",
            doc.describe(node),
            children.len()
        )));
    }

    let mut fragments = walk_node(doc, children[1], decorator)?;
    for fragment in &mut fragments {
        fragment.content = replace_section_words(&fragment.content);
    }
    let fragments = strip(&fragments, None);
    if fragments.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = vec![Fragment::text("See also: ")];
    out.extend(fragments);
    out.push(Fragment::text("\n"));
    Ok(out)
}

fn labeled_block(
    doc: &DocTree,
    node: NodeId,
    decorator: Decorator<'_>,
    kind: FragmentKind,
    label: &str,
) -> Result<Vec<Fragment>> {
    let mut out = Vec::new();
    let preceded_by_newline = doc
        .prev_sibling(node)
        .is_some_and(|prev| doc.is_bare_newline(prev));
    if !preceded_by_newline {
        out.push(Fragment::text("\n"));
    }
    out.push(Fragment::new(kind, label));

    // children[0] is the block's own label term.
    let rest = doc.children(node).get(1..).unwrap_or_default();
    if rest.len() > 1 {
        for &child in rest {
            if doc.is_bare_newline(child) {
                continue;
            }
            out.push(Fragment::text("\n\t"));
            out.extend(strip(&walk_node(doc, child, decorator)?, None));
        }
    } else {
        out.push(Fragment::text(" "));
        let mut inner = Vec::new();
        for &child in rest {
            inner.extend(walk_node(doc, child, decorator)?);
        }
        out.extend(strip(&inner, None));
    }
    out.push(Fragment::text("\n"));
    Ok(out)
}

fn definition_body(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let mut fragments = merge(&walk_children(doc, node, decorator)?);
    // The online-manual link paragraph sometimes arrives wrapped across a
    // line break inside a definition body; normalize it so the paragraph
    // suppression and tail stripping recognize it.
    for fragment in &mut fragments {
        fragment.content = fragment
            .content
            .replace(
                "\n  for the corresponding documentation",
                " for the corresponding documentation",
            )
            .replace("  Click", " Click");
    }
    Ok(fragments)
}

fn code_block(doc: &DocTree, node: NodeId) -> Result<Vec<Fragment>> {
    let text = doc.text_content(node);
    let text = text.trim_matches('\n');
    let mut block = String::new();
    let preceded_by_newline = doc
        .prev_sibling(node)
        .is_some_and(|prev| doc.is_bare_newline(prev));
    if !preceded_by_newline {
        block.push('\n');
    }
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            block.push('\n');
        }
        block.push_str("   ");
        block.push_str(line);
    }
    block.push_str("\n\n");
    Ok(vec![Fragment::new(FragmentKind::Code, block)])
}

fn bullet_list(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let mut fragments = walk_children(doc, node, decorator)?;
    let trailing_newline = fragments
        .last()
        .is_some_and(|fragment| fragment.content.ends_with('\n'));
    if trailing_newline {
        fragments = strip_right(&fragments, Some(&['\n']));
        fragments.push(Fragment::text("\n"));
    }
    Ok(fragments)
}

fn list_item(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let depth = doc
        .ancestors(node)
        .filter(|&ancestor| doc.tag(ancestor) == Some("ul"))
        .count();
    let mut fragments = vec![Fragment::text(format!("{}\u{2022} ", "    ".repeat(depth)))];
    fragments.extend(strip_left(&walk_children(doc, node, decorator)?, None));

    // Collapse runs of newlines between items, keeping exactly one unless a
    // bare-newline separator follows and supplies it.
    let trailing_newline = fragments
        .last()
        .is_some_and(|fragment| fragment.content.ends_with('\n'));
    if trailing_newline {
        fragments = strip_right(&fragments, Some(&['\n']));
        let separator_follows = doc
            .next_sibling(node)
            .is_some_and(|next| doc.is_bare_newline(next));
        if !separator_follows {
            fragments.push(Fragment::text("\n"));
        }
    }
    Ok(fragments)
}

fn image(doc: &DocTree, node: NodeId) -> Result<Vec<Fragment>> {
    let alt = doc.attr(node, "alt").unwrap_or_default();
    if alt.contains("LaTeX") {
        Ok(vec![Fragment::text("LaTeX")])
    } else {
        Err(ExtractError::UnrecognizedImage(alt.to_string()))
    }
}

fn anchor(doc: &DocTree, node: NodeId, decorator: Decorator<'_>) -> Result<Vec<Fragment>> {
    let mut fragments = walk_children(doc, node, decorator)?;

    match doc.attr(node, "href") {
        Some(href) => {
            if href.is_empty() || !href.starts_with("http") {
                return Err(ExtractError::InvalidHyperlink(href.to_string()));
            }
            for fragment in &mut fragments {
                if let Some(existing) = &fragment.hyperlink {
                    return Err(ExtractError::NestedHyperlink {
                        existing: existing.clone(),
                        url: href.to_string(),
                    });
                }
                fragment.hyperlink = Some(href.to_string());
            }
            // A link whose sole content names another command is a
            // cross-reference to that command's own entry.
            if let [fragment] = fragments.as_mut_slice() {
                if fragment.content.starts_with(COMMAND_ESCAPE) {
                    fragment.kind = FragmentKind::CrossReference;
                }
            }
            Ok(fragments)
        }
        None => {
            let is_target = doc.attr(node, "id").is_some()
                || doc
                    .attr(node, "class")
                    .is_some_and(|class| class.contains("anchor"));
            if is_target {
                Ok(Vec::new())
            } else {
                Err(ExtractError::UnexpectedAnchorForm(doc.describe(node)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    fn walk_first(html: &str, tag: &str) -> Result<Vec<Fragment>> {
        let doc = parse_html(html);
        let node = doc.find_first_element(tag).expect("tag present");
        walk_node(&doc, node, &identity)
    }

    fn flat(fragments: &[Fragment]) -> String {
        fragments
            .iter()
            .map(|fragment| fragment.content.as_str())
            .collect()
    }

    #[test]
    fn test_paragraph_strips_inner_newlines_and_appends_one() {
        let fragments = walk_first("<p>first\nline</p>", "p").unwrap();
        assert_eq!(flat(&fragments), "firstline\n");
    }

    #[test]
    fn test_paragraph_before_list_has_no_trailing_newline() {
        let fragments = walk_first("<p>intro</p><ul><li>x</li></ul>", "p").unwrap();
        assert_eq!(flat(&fragments), "intro");
    }

    #[test]
    fn test_boilerplate_paragraphs_are_suppressed() {
        let html = format!("<p>{CLICK_HERE_PARAGRAPH}</p>");
        assert!(walk_first(&html, "p").unwrap().is_empty());
        let html = format!("<p>{NAVIGATION_PARAGRAPH}</p>");
        assert!(walk_first(&html, "p").unwrap().is_empty());
    }

    #[test]
    fn test_inline_code_demotes_markup() {
        let fragments = walk_first("<code>a<em>b</em>c</code>", "code").unwrap();
        assert_eq!(fragments, vec![Fragment::new(FragmentKind::Code, "abc")]);
    }

    #[test]
    fn test_emphasis_rejects_nested_markup() {
        let err = walk_first("<em>a<code>b</code></em>", "em").unwrap_err();
        assert!(matches!(err, ExtractError::UnexpectedStructure(_)));
    }

    #[test]
    fn test_emphasis_fragment() {
        let fragments = walk_first("<em>word</em>", "em").unwrap();
        assert_eq!(
            fragments,
            vec![Fragment::new(FragmentKind::Emphasis, "word")]
        );
    }

    #[test]
    fn test_see_also_rewrites_section_words() {
        let html = r#"<dl class="section see"><dt>See also</dt><dd>Section <a href="https://example.org/x">\page</a> for sections</dd></dl>"#;
        let fragments = walk_first(html, "dl").unwrap();
        let text = flat(&fragments);
        assert!(text.starts_with("See also: Command "));
        assert!(text.contains("for commands"));
        assert!(text.ends_with('\n'));
        // The \page cross-reference keeps its backslash untouched.
        assert!(
            fragments
                .iter()
                .any(|fragment| fragment.kind == FragmentKind::CrossReference
                    && fragment.content == "\\page")
        );
    }

    #[test]
    fn test_section_word_not_rewritten_after_escape() {
        assert_eq!(replace_section_words("use \\section here"), "use \\section here");
        assert_eq!(replace_section_words("see section 3"), "see command 3");
        assert_eq!(replace_section_words("Sections below"), "Commands below");
        assert_eq!(replace_section_words("dissection"), "dissection");
    }

    #[test]
    fn test_note_block_inline_layout() {
        let html = r#"<p>before</p><dl class="section note"><dt>Note</dt><dd>short note</dd></dl>"#;
        let fragments = walk_first(html, "dl").unwrap();
        assert_eq!(fragments[0], Fragment::text("\n"));
        assert_eq!(fragments[1], Fragment::new(FragmentKind::Note, "Note:"));
        assert_eq!(flat(&fragments), "\nNote: short note\n");
    }

    #[test]
    fn test_warning_block_multi_child_layout() {
        let html = "<dl class=\"section warning\"><dt>Warning</dt>\n<dd>first</dd>\n<dd>second</dd></dl>";
        let fragments = walk_first(html, "dl").unwrap();
        assert_eq!(
            fragments[1],
            Fragment::new(FragmentKind::Warning, "Warning:")
        );
        assert_eq!(flat(&fragments), "\nWarning:\n\tfirst\n\tsecond\n");
    }

    #[test]
    fn test_code_block_indents_lines() {
        let fragments = walk_first("<p>x</p><pre>\nint a;\nint b;\n</pre>", "pre").unwrap();
        assert_eq!(
            fragments,
            vec![Fragment::new(
                FragmentKind::Code,
                "\n   int a;\n   int b;\n\n"
            )]
        );
    }

    #[test]
    fn test_code_block_via_fragment_div() {
        let html = "<div class=\"fragment\">code()</div>";
        let fragments = walk_first(html, "div").unwrap();
        assert_eq!(
            fragments,
            vec![Fragment::new(FragmentKind::Code, "\n   code()\n\n")]
        );
    }

    #[test]
    fn test_list_items_get_depth_prefix() {
        let html = "<ul>\n<li>outer<ul>\n<li>inner</li>\n</ul>\n</li>\n</ul>";
        let fragments = walk_first(html, "ul").unwrap();
        let text = flat(&fragments);
        assert!(text.contains("    \u{2022} outer"));
        assert!(text.contains("        \u{2022} inner"));
        assert!(text.ends_with("inner\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_image_latex_logo() {
        let fragments = walk_first(r#"<img alt="LaTeX logo">"#, "img").unwrap();
        assert_eq!(fragments, vec![Fragment::text("LaTeX")]);
    }

    #[test]
    fn test_image_unknown_is_rejected() {
        let err = walk_first(r#"<img alt="diagram">"#, "img").unwrap_err();
        assert_eq!(err, ExtractError::UnrecognizedImage("diagram".to_string()));
    }

    #[test]
    fn test_hyperlink_stamps_fragments() {
        let html = r#"<a href="https://example.org/doc">one <em>two</em></a>"#;
        let fragments = walk_first(html, "a").unwrap();
        assert_eq!(fragments.len(), 2);
        for fragment in &fragments {
            assert_eq!(fragment.hyperlink.as_deref(), Some("https://example.org/doc"));
        }
        assert_eq!(fragments[1].kind, FragmentKind::Emphasis);
    }

    #[test]
    fn test_sole_command_link_becomes_cross_reference() {
        let html = r#"<a href="https://example.org/#cmdref">\ref</a>"#;
        let fragments = walk_first(html, "a").unwrap();
        assert_eq!(
            fragments,
            vec![
                Fragment::new(FragmentKind::CrossReference, "\\ref")
                    .with_hyperlink("https://example.org/#cmdref")
            ]
        );
    }

    #[test]
    fn test_nested_hyperlink_is_rejected() {
        // html5ever splits nested anchors while parsing; build the nesting
        // directly to exercise the stamping rule.
        let mut doc = crate::dom::DocTree::new();
        let root = doc.root();
        let outer = doc.append_element(
            root,
            "a",
            vec![("href".into(), "https://outer.example".into())],
        );
        let inner = doc.append_element(
            outer,
            "a",
            vec![("href".into(), "https://inner.example".into())],
        );
        doc.append_text(inner, "x");
        let err = walk_node(&doc, outer, &identity).unwrap_err();
        assert_eq!(
            err,
            ExtractError::NestedHyperlink {
                existing: "https://inner.example".to_string(),
                url: "https://outer.example".to_string(),
            }
        );
    }

    #[test]
    fn test_relative_hyperlink_is_rejected() {
        let err = walk_first(r#"<a href="commands.html">x</a>"#, "a").unwrap_err();
        assert_eq!(
            err,
            ExtractError::InvalidHyperlink("commands.html".to_string())
        );
    }

    #[test]
    fn test_anchor_target_produces_nothing() {
        let fragments = walk_first(r#"<a class="anchor" id="cmdfile"></a>"#, "a").unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_bare_anchor_is_rejected() {
        let err = walk_first("<a>dangling</a>", "a").unwrap_err();
        assert!(matches!(err, ExtractError::UnexpectedAnchorForm(_)));
    }

    #[test]
    fn test_center_produces_nothing() {
        let fragments = walk_first("<center>Commands for examples</center>", "center").unwrap();
        assert!(fragments.is_empty());
    }
}
