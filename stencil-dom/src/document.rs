use thiserror::Error;

use crate::{Props, VNode, html};

/// Index of a node inside the `Document` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element { tag: String, props: Props },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn data(&self) -> &NodeData {
        &self.data
    }
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }
    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0:?} does not belong to this document")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an element and cannot take children")]
    NotAnElement(NodeId),
    #[error("appending {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// A mutable node tree stored as an arena. Nodes are never freed; detached
/// nodes simply have no parent.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    text_writes: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: impl Into<String>, props: impl Into<Props>) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.into(),
            props: props.into(),
        })
    }

    pub fn create_text(&mut self, t: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(t.into()))
    }

    pub fn create_comment(&mut self, t: impl Into<String>) -> NodeId {
        self.push(NodeData::Comment(t.into()))
    }

    /// Builds a detached subtree from `vnode` and returns its root.
    pub fn materialize(&mut self, vnode: &VNode) -> NodeId {
        match vnode {
            VNode::Text(t) => self.create_text(t.clone()),
            VNode::Comment(t) => self.create_comment(t.clone()),
            VNode::Element {
                tag,
                props,
                children,
            } => {
                let id = self.create_element(tag.clone(), props.clone());
                for child in children {
                    let child_id = self.materialize(child);
                    self.link(id, child_id);
                }
                id
            }
        }
    }

    /// Snapshot of the subtree rooted at `id`.
    pub fn to_vnode(&self, id: NodeId) -> Option<VNode> {
        let node = self.node(id)?;
        Some(match &node.data {
            NodeData::Text(t) => VNode::Text(t.clone()),
            NodeData::Comment(t) => VNode::Comment(t.clone()),
            NodeData::Element { tag, props } => VNode::Element {
                tag: tag.clone(),
                props: props.clone(),
                children: node
                    .children
                    .iter()
                    .filter_map(|&c| self.to_vnode(c))
                    .collect(),
            },
        })
    }

    /// Deep-copies the subtree at `id` in `source` into this document,
    /// detached. Returns the copy's root.
    pub fn import(&mut self, source: &Document, id: NodeId) -> Result<NodeId, DomError> {
        let vnode = source.to_vnode(id).ok_or(DomError::UnknownNode(id))?;
        Ok(self.materialize(&vnode))
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Appends `child` as the last child of `parent`, moving it out of its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.node(parent).ok_or(DomError::UnknownNode(parent))?;
        if !parent_node.is_element() {
            return Err(DomError::NotAnElement(parent));
        }
        self.node(child).ok_or(DomError::UnknownNode(child))?;
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return Err(DomError::Cycle { parent, child });
        }
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
        self.link(parent, child);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// The parent, if it is an element.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.node(parent)?.is_element().then_some(parent)
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Content of a text node; `None` for any other node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Replaces the content of a text node. Every successful call counts as
    /// one mutation, even when the content is unchanged.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Text(t)) => {
                *t = value.into();
                self.text_writes += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of text writes performed through `set_text`.
    pub fn mutation_count(&self) -> u64 {
        self.text_writes
    }

    fn props(&self, id: NodeId) -> Option<&Props> {
        match &self.node(id)?.data {
            NodeData::Element { props, .. } => Some(props),
            _ => None,
        }
    }

    fn props_mut(&mut self, id: NodeId) -> Option<&mut Props> {
        match &mut self.nodes.get_mut(id.0)?.data {
            NodeData::Element { props, .. } => Some(props),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.props(id)?.get(name)
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.props_mut(id) {
            Some(props) => {
                props.insert(name, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.props_mut(id)?.remove(name)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    /// Adds or removes `class`. Returns whether the class is now present, or
    /// `None` when `id` is not an element.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Option<bool> {
        let props = self.props_mut(id)?;
        let current = props.get("class").unwrap_or("");
        let mut classes: Vec<&str> = current.split_whitespace().collect();
        let present = if let Some(pos) = classes.iter().position(|&c| c == class) {
            classes.remove(pos);
            false
        } else {
            classes.push(class);
            true
        };
        let joined = classes.join(" ");
        props.insert("class", joined);
        Some(present)
    }

    /// Concatenated text of `id` and its descendants, comments excluded
    /// unless `id` itself is a comment.
    pub fn text_content(&self, id: NodeId) -> String {
        fn collect(doc: &Document, id: NodeId, out: &mut String) {
            match doc.node(id).map(Node::data) {
                Some(NodeData::Text(t)) => out.push_str(t),
                Some(NodeData::Element { .. }) => {
                    for &c in doc.children(id) {
                        collect(doc, c, out);
                    }
                }
                _ => {}
            }
        }
        match self.node(id).map(Node::data) {
            Some(NodeData::Comment(t)) => t.clone(),
            _ => {
                let mut out = String::new();
                collect(self, id, &mut out);
                out
            }
        }
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        html::write_node(self, id, &mut out);
        out
    }
}
