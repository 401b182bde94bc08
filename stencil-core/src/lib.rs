//! Template components: parse markup once into a live `stencil_dom::Document`,
//! then keep `{{name}}` placeholders in its text nodes in sync with named
//! variables, and look up `#handle`-annotated elements by name.
//!
//! ```
//! use stencil_core::Component;
//!
//! let mut c = Component::new("<div>Hello {{name}}!</div>").unwrap();
//! assert_eq!(c.text_content(), "Hello !");
//! c.update_variable("name", "Bob").unwrap();
//! assert_eq!(c.text_content(), "Hello Bob!");
//! ```

pub mod binding;
pub mod component;
pub mod error;
pub mod materialize;
pub mod scan;
pub mod style;
pub mod vtree;

pub use binding::{Bindings, TextBinding, TextTarget, VariableBinding, VariableCase};
pub use component::{Component, ComponentOptions};
pub use error::{ConstructionError, Error};
pub use materialize::materialize;
pub use style::{ClassMap, rewrite_classes};
pub use vtree::{HANDLE_ATTRIBUTE, VirtualNode, VirtualTree};
