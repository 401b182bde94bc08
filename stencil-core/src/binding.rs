//! Variable index and the text update pass.

use std::borrow::Cow;
use std::ops::Range;

use indexmap::IndexMap;
use stencil_dom::{Document, NodeId};
use tracing::trace;

use crate::error::Error;
use crate::scan::{Segment, segments};

/// How placeholder names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableCase {
    /// `{{Name}}` and `{{name}}` are different variables.
    #[default]
    Sensitive,
    /// Names are folded to lowercase when indexed and when looked up.
    Insensitive,
}

impl VariableCase {
    pub fn normalize(self, name: &str) -> Cow<'_, str> {
        match self {
            VariableCase::Sensitive => Cow::Borrowed(name),
            VariableCase::Insensitive => Cow::Owned(name.to_lowercase()),
        }
    }
}

/// The only access the update pass needs to the node tree.
pub trait TextTarget {
    fn text(&self, node: NodeId) -> Option<&str>;
    fn set_text(&mut self, node: NodeId, value: String);
}

impl TextTarget for Document {
    fn text(&self, node: NodeId) -> Option<&str> {
        Document::text(self, node)
    }

    fn set_text(&mut self, node: NodeId, value: String) {
        Document::set_text(self, node, value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(Range<usize>),
    /// Index into the variable map.
    Variable(usize),
}

/// A tracked text node and the text it had before any substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBinding {
    node: NodeId,
    original: String,
    pieces: Vec<Piece>,
}

impl TextBinding {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn has_placeholders(&self) -> bool {
        self.pieces.iter().any(|p| matches!(p, Piece::Variable(_)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBinding {
    value: String,
    texts: Vec<usize>,
}

impl VariableBinding {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Indices of the text bindings that reference this variable.
    pub fn texts(&self) -> &[usize] {
        &self.texts
    }
}

/// Every tracked text node plus the variables their placeholders name.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    case: VariableCase,
    texts: Vec<TextBinding>,
    variables: IndexMap<String, VariableBinding>,
}

impl Bindings {
    /// Captures the current text of each node in `nodes` as its original text
    /// and records every placeholder found in it. Variables start out empty.
    pub fn index<T: TextTarget + ?Sized>(target: &T, nodes: &[NodeId], case: VariableCase) -> Self {
        let mut bindings = Bindings {
            case,
            ..Default::default()
        };

        for &node in nodes {
            let original = target.text(node).unwrap_or_default().to_owned();
            let text_index = bindings.texts.len();
            let mut pieces = Vec::new();
            let mut offset = 0;

            for segment in segments(&original) {
                match segment {
                    Segment::Literal(s) => pieces.push(Piece::Literal(offset..offset + s.len())),
                    Segment::Placeholder(name) => {
                        let entry = bindings.variables.entry(case.normalize(name).into_owned());
                        let var_index = entry.index();
                        let var = entry.or_default();
                        if var.texts.last() != Some(&text_index) {
                            var.texts.push(text_index);
                        }
                        pieces.push(Piece::Variable(var_index));
                    }
                }
                offset += segment.source_len();
            }

            bindings.texts.push(TextBinding {
                node,
                original,
                pieces,
            });
        }
        bindings
    }

    pub fn case(&self) -> VariableCase {
        self.case
    }

    pub fn texts(&self) -> &[TextBinding] {
        &self.texts
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(self.case.normalize(name).as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&VariableBinding> {
        self.variables.get(self.case.normalize(name).as_ref())
    }

    /// Variables in the order they were first seen.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &VariableBinding)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Stores a new value. Fails without touching anything when `name` was not
    /// found during indexing.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), Error> {
        let key = self.case.normalize(name);
        match self.variables.get_mut(key.as_ref()) {
            Some(var) => {
                var.value = value.into();
                Ok(())
            }
            None => Err(Error::InvalidVariable {
                name: name.to_owned(),
            }),
        }
    }

    /// Rebuilds the text of `binding` from its original text and the current
    /// values. Replayed from the original every time, so values are never
    /// scanned for placeholders themselves.
    pub fn render(&self, binding: &TextBinding) -> String {
        let mut out = String::with_capacity(binding.original.len());
        for piece in &binding.pieces {
            match piece {
                Piece::Literal(range) => out.push_str(&binding.original[range.clone()]),
                Piece::Variable(index) => {
                    if let Some((_, var)) = self.variables.get_index(*index) {
                        out.push_str(&var.value);
                    }
                }
            }
        }
        out
    }

    /// Writes the rendering of every tracked text node whose content differs.
    /// Returns the number of nodes written.
    pub fn apply<T: TextTarget + ?Sized>(&self, target: &mut T) -> usize {
        let mut writes = 0;
        for binding in &self.texts {
            let rendered = self.render(binding);
            if target.text(binding.node) == Some(rendered.as_str()) {
                continue;
            }
            trace!(node = binding.node.index(), "rewriting text node");
            target.set_text(binding.node, rendered);
            writes += 1;
        }
        writes
    }
}
