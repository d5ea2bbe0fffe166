//! Read-only document tree consumed by the walker.
//!
//! A flat arena of nodes with parent/child/sibling navigation. The walker
//! and extractor only ever need a generic tree-of-nodes abstraction (tag,
//! attributes, text, navigation queries), so the HTML parser behind it is
//! swappable; [`crate::html`] provides the html5ever-backed loader.
//!
//! Trees are append-only during construction and never mutated afterwards.

/// Index of a node within a [`DocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of a single document node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The synthetic tree root.
    Document,
    /// An element with its tag name and attributes, in document order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node.
    Text(String),
    /// A comment node (content is irrelevant to extraction).
    Comment,
}

#[derive(Debug)]
struct DocNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-backed markup document tree.
///
/// # Examples
///
/// ```
/// use doxy_commands_extract::dom::DocTree;
///
/// let mut tree = DocTree::new();
/// let root = tree.root();
/// let para = tree.append_element(root, "p", Vec::new());
/// tree.append_text(para, "hello");
///
/// assert_eq!(tree.tag(para), Some("p"));
/// assert_eq!(tree.text_content(para), "hello");
/// ```
#[derive(Debug)]
pub struct DocTree {
    nodes: Vec<DocNode>,
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocTree {
    /// Creates an empty tree containing only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![DocNode {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The synthetic root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends an element node as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        self.append(
            parent,
            NodeData::Element {
                tag: tag.into(),
                attrs,
            },
        )
    }

    /// Appends a text node as the last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeData::Text(text.into()))
    }

    /// Appends a comment node as the last child of `parent`.
    pub fn append_comment(&mut self, parent: NodeId) -> NodeId {
        self.append(parent, NodeData::Comment)
    }

    /// The payload of a node.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// The tag name, for element nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// The value of an attribute, for element nodes that carry it.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.data(id) {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// The content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for a text node containing exactly one newline, the
    /// inter-element separator the help page uses everywhere.
    pub fn is_bare_newline(&self, id: NodeId) -> bool {
        self.text(id) == Some("\n")
    }

    /// The node's children, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The node's parent, unless it is the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The sibling immediately before this node.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&node| node == id)?;
        index.checked_sub(1).map(|prev| siblings[prev])
    }

    /// The sibling immediately after this node.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&node| node == id)?;
        siblings.get(index + 1).copied()
    }

    /// All ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&node| self.parent(node))
    }

    /// All descendants of a node, in document (pre-)order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// The first element with the given tag, in document order.
    pub fn find_first_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&node| self.tag(node) == Some(tag))
    }

    /// The first following sibling with the given tag.
    pub fn find_next_sibling_element(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.next_sibling(id);
        while let Some(node) = cursor {
            if self.tag(node) == Some(tag) {
                return Some(node);
            }
            cursor = self.next_sibling(node);
        }
        None
    }

    /// The concatenated text of a node and all its descendants, ignoring
    /// comments and markup.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment => {}
            NodeData::Document | NodeData::Element { .. } => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// A short human-readable description of a node, for error context.
    pub fn describe(&self, id: NodeId) -> String {
        match self.data(id) {
            NodeData::Document => "#document".to_string(),
            NodeData::Comment => "#comment".to_string(),
            NodeData::Text(text) => format!("text {:?}", text),
            NodeData::Element { tag, attrs } => {
                let attrs = attrs
                    .iter()
                    .map(|(key, value)| format!("{key}={value:?}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if attrs.is_empty() {
                    format!("<{tag}>")
                } else {
                    format!("<{tag} {attrs}>")
                }
            }
        }
    }
}
