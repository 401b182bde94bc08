//! Owned node descriptions (`VNode`), the live arena tree (`Document`) and the
//! fragment parser that turns template markup into nodes.

pub mod document;
pub mod html;
pub mod parse;

pub use document::{Document, DomError, Node, NodeData, NodeId};
pub use parse::parse_fragment;

#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Element {
        tag: String,
        props: Props,
        children: Vec<VNode>,
    },
    Text(String),
    Comment(String),
}

/// Element attributes in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    pub attrs: Vec<(String, String)>,
}

impl Props {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }
    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.insert(k, v);
        self
    }
    /// Sets `k`, replacing an existing value in place.
    pub fn insert(&mut self, k: impl Into<String>, v: impl Into<String>) {
        let (k, v) = (k.into(), v.into());
        match self.attrs.iter_mut().find(|(name, _)| *name == k) {
            Some((_, value)) => *value = v,
            None => self.attrs.push((k, v)),
        }
    }
    pub fn get(&self, k: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == k)
            .map(|(_, v)| v.as_str())
    }
    pub fn remove(&mut self, k: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(name, _)| name == k)?;
        Some(self.attrs.remove(pos).1)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// Allow concise props creation
impl From<()> for Props {
    fn from(_: ()) -> Self {
        Props::default()
    }
}
impl From<Vec<(&str, &str)>> for Props {
    fn from(v: Vec<(&str, &str)>) -> Self {
        let mut p = Props::new();
        for (k, v) in v {
            p.insert(k, v);
        }
        p
    }
}

pub fn h(tag: impl Into<String>, props: impl Into<Props>, children: Vec<VNode>) -> VNode {
    VNode::Element {
        tag: tag.into(),
        props: props.into(),
        children,
    }
}
pub fn text(t: impl Into<String>) -> VNode {
    VNode::Text(t.into())
}
pub fn comment(t: impl Into<String>) -> VNode {
    VNode::Comment(t.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tree() {
        let node = h(
            "div",
            vec![("class", "app")],
            vec![text("hello"), h("span", (), vec![text("world")])],
        );
        if let VNode::Element {
            tag,
            props,
            children,
        } = node
        {
            assert_eq!(tag, "div");
            assert_eq!(props.get("class"), Some("app"));
            assert_eq!(children.len(), 2);
        } else {
            panic!("expected element");
        }
    }

    #[test]
    fn props_keep_source_order_and_replace_in_place() {
        let mut props = Props::new().set("id", "a").set("class", "x");
        props.insert("id", "b");
        let pairs: Vec<_> = props.iter().collect();
        assert_eq!(pairs, vec![("id", "b"), ("class", "x")]);
        assert_eq!(props.remove("id").as_deref(), Some("b"));
        assert_eq!(props.get("id"), None);
    }
}
