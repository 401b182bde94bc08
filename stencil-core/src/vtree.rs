use std::collections::HashMap;

use stencil_dom::{Document, Node, NodeId};
use tracing::debug;

/// Attribute that names an element for `Component::element_by_handle`.
pub const HANDLE_ATTRIBUTE: &str = "#handle";

/// Shadow record of one real node. `parent` and `children` index into the
/// owning `VirtualTree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNode {
    pub node: NodeId,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// A shadow of a materialized subtree, in document order, plus what the walk
/// collected on the way: handle registrations and text nodes.
#[derive(Debug, Clone, Default)]
pub struct VirtualTree {
    nodes: Vec<VirtualNode>,
    handles: HashMap<String, NodeId>,
    texts: Vec<NodeId>,
}

impl VirtualTree {
    /// Walks the subtree at `root` depth-first.
    ///
    /// A node whose parent declares `#handle="name"` is registered under
    /// `name` unless the name is taken, so the first child of the annotated
    /// element is what gets stored and the first declaration wins. The root's
    /// own parent is never consulted.
    pub fn build(document: &Document, root: NodeId) -> Self {
        let mut tree = VirtualTree::default();
        let mut stack: Vec<(NodeId, Option<usize>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let index = tree.nodes.len();
            tree.nodes.push(VirtualNode {
                node,
                parent,
                children: Vec::new(),
            });

            if let Some(parent) = parent {
                tree.nodes[parent].children.push(index);
                let parent_node = tree.nodes[parent].node;
                tree.register_handle(document, parent_node, node);
            }
            if document.node(node).is_some_and(Node::is_text) {
                tree.texts.push(node);
            }

            for &child in document.children(node).iter().rev() {
                stack.push((child, Some(index)));
            }
        }
        tree
    }

    fn register_handle(&mut self, document: &Document, parent: NodeId, node: NodeId) {
        let Some(name) = document.attribute(parent, HANDLE_ATTRIBUTE) else {
            return;
        };
        if name.is_empty() || self.handles.contains_key(name) {
            return;
        }
        debug!(handle = name, node = node.index(), "registered handle");
        self.handles.insert(name.to_owned(), node);
    }

    pub fn root(&self) -> Option<&VirtualNode> {
        self.nodes.first()
    }

    pub fn get(&self, index: usize) -> Option<&VirtualNode> {
        self.nodes.get(index)
    }

    /// All shadow nodes in document order.
    pub fn nodes(&self) -> &[VirtualNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn handles(&self) -> &HashMap<String, NodeId> {
        &self.handles
    }

    /// Text nodes in document order.
    pub fn texts(&self) -> &[NodeId] {
        &self.texts
    }

    pub fn into_parts(self) -> (HashMap<String, NodeId>, Vec<NodeId>) {
        (self.handles, self.texts)
    }
}
