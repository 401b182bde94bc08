//! Scoped class names for component stylesheets.
//!
//! A stylesheet's class selectors are collected with `cssparser` and each one
//! is given a short hashed replacement that is stable for a given scope. The
//! resulting `ClassMap` feeds `stencil_core::Component::with_class_map`.

use cssparser::{ParseError, Parser, ParserInput, Token};
use stencil_core::ClassMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Hex digits of the blake3 digest kept in a hashed name.
const HASH_LEN: usize = 8;

/// Re-hash attempts before giving up on a clash-free name.
const MAX_SALT: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("stylesheet parse error at {line}:{column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },
}

/// Class selectors in `css`, first-seen order, without duplicates. Looks
/// inside rule bodies (nested rules), at-rule blocks and functional
/// pseudo-classes like `:not(.a)`.
pub fn class_names(css: &str) -> Result<Vec<String>, StyleError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    collect_classes(&mut parser, &mut found).map_err(|e| StyleError::Parse {
        line: e.location.line,
        column: e.location.column,
        message: format!("{:?}", e.kind),
    })?;
    Ok(found)
}

fn collect_classes<'i>(
    parser: &mut Parser<'i, '_>,
    found: &mut Vec<String>,
) -> Result<(), ParseError<'i, ()>> {
    let mut after_dot = false;
    loop {
        // end of input (or of the enclosing block)
        let Ok(token) = parser.next_including_whitespace_and_comments() else {
            return Ok(());
        };
        match token.clone() {
            Token::Delim('.') => {
                after_dot = true;
                continue;
            }
            Token::Ident(name) if after_dot => {
                let name: &str = &name;
                if !found.iter().any(|f| f == name) {
                    found.push(name.to_owned());
                }
            }
            Token::CurlyBracketBlock
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::Function(_) => {
                parser.parse_nested_block(|nested| collect_classes(nested, found))?;
            }
            _ => {}
        }
        after_dot = false;
    }
}

/// Produces hashed class names for one stylesheet scope (usually the
/// stylesheet's file name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    scope: String,
}

impl ModuleNames {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// `_` followed by the first hex digits of blake3(`scope:class`).
    pub fn hashed(&self, class: &str) -> String {
        self.salted(class, 0)
    }

    fn salted(&self, class: &str, salt: u32) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher
            .update(self.scope.as_bytes())
            .update(b":")
            .update(class.as_bytes());
        if salt > 0 {
            hasher.update(b":").update(&salt.to_le_bytes());
        }
        let hex = hasher.finalize().to_hex();
        format!("_{}", &hex[..HASH_LEN])
    }

    /// Hashed name for `class` that contains none of `others`, so the
    /// textual rewrite never touches it again. Falls back to the plain hash
    /// when no salt up to `MAX_SALT` works.
    fn hashed_avoiding(&self, class: &str, others: &[String]) -> String {
        let clashes = |name: &str| {
            others
                .iter()
                .any(|other| other != class && name.contains(other.as_str()))
        };
        for salt in 0..=MAX_SALT {
            let name = self.salted(class, salt);
            if !clashes(&name) {
                return name;
            }
        }
        warn!(scope = %self.scope, class, "hashed class name contains another class name");
        self.hashed(class)
    }

    /// Class map for every class in `css`, longest class first so that a class
    /// is rewritten before any shorter class it contains. Each hashed name is
    /// usually `hashed(class)`, salted when that would contain another class.
    pub fn class_map(&self, css: &str) -> Result<ClassMap, StyleError> {
        let mut names = class_names(css)?;
        names.sort_by(|a, b| b.len().cmp(&a.len()));
        debug!(scope = %self.scope, classes = names.len(), "built class map");
        Ok(names
            .iter()
            .map(|name| (name.clone(), self.hashed_avoiding(name, &names)))
            .collect())
    }
}
