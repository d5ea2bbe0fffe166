//! HTML loading via html5ever.
//!
//! Parses the help page into an rcdom tree and converts it into the crate's
//! own [`DocTree`] arena, which is what the walker consumes. Doctype and
//! processing-instruction nodes are dropped; everything else maps 1:1.

use html5ever::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::dom::{DocTree, NodeId};

/// Parses an HTML document into a [`DocTree`].
///
/// html5ever is error-tolerant, so this never fails; structural problems
/// surface later as extraction errors.
///
/// # Examples
///
/// ```
/// use doxy_commands_extract::html::parse_html;
///
/// let tree = parse_html("<p>hello <em>world</em></p>");
/// let para = tree.find_first_element("p").unwrap();
/// assert_eq!(tree.text_content(para), "hello world");
/// ```
pub fn parse_html(html: &str) -> DocTree {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut tree = DocTree::new();
    let root = tree.root();
    convert_children(&dom.document, &mut tree, root);
    tree
}

fn convert_children(handle: &Handle, tree: &mut DocTree, parent: NodeId) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            RcNodeData::Element { name, attrs, .. } => {
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let id = tree.append_element(parent, name.local.to_string(), attrs);
                convert_children(child, tree, id);
            }
            RcNodeData::Text { contents } => {
                tree.append_text(parent, contents.borrow().to_string());
            }
            RcNodeData::Comment { .. } => {
                tree.append_comment(parent);
            }
            RcNodeData::Document => convert_children(child, tree, parent),
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_structure_and_attributes() {
        let tree = parse_html(
            r#"<div class="contents"><h1><a class="anchor" id="cmdfile"></a>\file [&lt;name&gt;]</h1></div>"#,
        );
        let heading = tree.find_first_element("h1").unwrap();
        let anchor = tree.children(heading)[0];
        assert_eq!(tree.tag(anchor), Some("a"));
        assert_eq!(tree.attr(anchor, "id"), Some("cmdfile"));
        assert_eq!(tree.text_content(heading), "\\file [<name>]");
    }

    #[test]
    fn test_parse_keeps_whitespace_text_nodes() {
        let tree = parse_html("<p>a</p>\n<p>b</p>");
        let first = tree.find_first_element("p").unwrap();
        let separator = tree.next_sibling(first).unwrap();
        assert!(tree.is_bare_newline(separator));
    }

    #[test]
    fn test_parse_drops_comments_content() {
        let tree = parse_html("<p><!-- hidden -->shown</p>");
        let para = tree.find_first_element("p").unwrap();
        assert_eq!(tree.text_content(para), "shown");
    }
}
