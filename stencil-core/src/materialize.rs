use stencil_dom::{Document, NodeId, parse_fragment};
use tracing::debug;

use crate::error::ConstructionError;

/// Parses the trimmed template into a fresh document and returns it with the
/// first top-level node. Further top-level nodes are dropped.
pub fn materialize(template: &str) -> Result<(Document, NodeId), ConstructionError> {
    let nodes = parse_fragment(template.trim()).map_err(ConstructionError::Markup)?;
    let mut nodes = nodes.into_iter();
    let first = nodes.next().ok_or(ConstructionError::Empty)?;

    let dropped = nodes.count();
    if dropped > 0 {
        debug!(dropped, "ignoring top-level nodes after the first");
    }

    let mut document = Document::new();
    let root = document.materialize(&first);
    Ok((document, root))
}
