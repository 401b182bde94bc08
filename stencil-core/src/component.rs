use std::borrow::Cow;
use std::collections::HashMap;

use stencil_dom::{Document, NodeId};
use tracing::debug;

use crate::binding::{Bindings, VariableCase};
use crate::error::Error;
use crate::materialize::materialize;
use crate::style::{ClassMap, rewrite_classes};
use crate::vtree::VirtualTree;

#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    /// Applied to the raw template before parsing.
    pub class_map: Option<ClassMap>,
    pub variable_case: VariableCase,
}

impl ComponentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_map(mut self, map: ClassMap) -> Self {
        self.class_map = Some(map);
        self
    }

    pub fn variable_case(mut self, case: VariableCase) -> Self {
        self.variable_case = case;
        self
    }
}

/// A template instantiated into its own document, with its variables and
/// handles indexed.
///
/// Structural changes made through `document_mut` are not tracked: removing
/// or replacing an indexed text node or a handle's element makes later
/// updates and lookups act on stale nodes.
#[derive(Debug, Clone)]
pub struct Component {
    document: Document,
    root: NodeId,
    bindings: Bindings,
    handles: HashMap<String, NodeId>,
}

impl Component {
    pub fn new(template: &str) -> Result<Self, Error> {
        Self::with_options(template, ComponentOptions::default())
    }

    pub fn with_class_map(template: &str, class_map: &ClassMap) -> Result<Self, Error> {
        Self::with_options(template, ComponentOptions::new().class_map(class_map.clone()))
    }

    /// Rewrites classes, parses, indexes, and renders every placeholder with
    /// its initial empty value.
    pub fn with_options(template: &str, options: ComponentOptions) -> Result<Self, Error> {
        let source = match &options.class_map {
            Some(map) => Cow::Owned(rewrite_classes(template, map)),
            None => Cow::Borrowed(template),
        };

        let (document, root) = materialize(&source)?;
        let tree = VirtualTree::build(&document, root);
        let node_count = tree.len();
        let (handles, texts) = tree.into_parts();
        let bindings = Bindings::index(&document, &texts, options.variable_case);

        let mut component = Component {
            document,
            root,
            bindings,
            handles,
        };
        component.refresh();

        debug!(
            nodes = node_count,
            texts = component.bindings.texts().len(),
            variables = component.bindings.len(),
            handles = component.handles.len(),
            "component ready"
        );
        Ok(component)
    }

    /// Root of the instantiated subtree.
    pub fn instance(&self) -> NodeId {
        self.root
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Sets one variable and re-renders every tracked text node.
    pub fn update_variable(&mut self, name: &str, value: impl Into<String>) -> Result<(), Error> {
        self.bindings.set(name, value)?;
        self.refresh();
        Ok(())
    }

    /// Sets several variables, then renders once. Nothing is changed if any
    /// name is unknown.
    pub fn update_variables<I, K, V>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values: Vec<(K, V)> = values.into_iter().collect();
        if let Some((name, _)) = values.iter().find(|(k, _)| !self.bindings.contains(k.as_ref())) {
            return Err(Error::InvalidVariable {
                name: name.as_ref().to_owned(),
            });
        }
        for (name, value) in values {
            self.bindings.set(name.as_ref(), value)?;
        }
        self.refresh();
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(|v| v.value())
    }

    /// Name/value pairs in the order the names first appear in the template.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.variables().map(|(k, v)| (k, v.value()))
    }

    /// Re-renders every tracked text node from its original text. Returns the
    /// number of nodes whose content changed.
    pub fn refresh(&mut self) -> usize {
        self.bindings.apply(&mut self.document)
    }

    /// The element that declared `#handle="name"`.
    pub fn element_by_handle(&self, name: &str) -> Result<NodeId, Error> {
        self.handles
            .get(name)
            .and_then(|&node| self.document.parent_element(node))
            .ok_or_else(|| Error::HandleNotFound {
                handle: name.to_owned(),
            })
    }

    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    pub fn text_content(&self) -> String {
        self.document.text_content(self.root)
    }

    pub fn to_html(&self) -> String {
        self.document.outer_html(self.root)
    }

    /// Copies the current rendering of this component under `parent` in
    /// another document. The copy is static: later updates do not reach it.
    pub fn mount_into(&self, target: &mut Document, parent: NodeId) -> Result<NodeId, Error> {
        let copy = target.import(&self.document, self.root)?;
        target.append_child(parent, copy)?;
        Ok(copy)
    }
}
