use stencil_dom::DomError;
use thiserror::Error;

/// Why a template could not be turned into a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The trimmed template produced no top-level node.
    #[error("template produced no root node")]
    Empty,
    /// The markup was rejected by the fragment parser.
    #[error("template markup could not be parsed: {0}")]
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("failed to create component from template: {0}")]
    Construction(#[from] ConstructionError),

    /// The name never appeared as a placeholder in the template.
    #[error("invalid variable name `{name}`, check the template")]
    InvalidVariable { name: String },

    #[error("no element with handle `{handle}` found")]
    HandleNotFound { handle: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}
