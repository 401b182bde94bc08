use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use stencil_core::{ClassMap, Component, ComponentOptions, VariableCase};
use stencil_style::ModuleNames;
use tracing::debug;

/// Template and stylesheet inputs shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct Source {
    /// Path to the HTML template
    pub template: PathBuf,
    /// Stylesheet whose class names are hashed into the template
    #[arg(long)]
    pub style: Option<PathBuf>,
    /// Hash scope for --style (default: the stylesheet's file name)
    #[arg(long, requires = "style")]
    pub scope: Option<String>,
    /// Treat variable names case-insensitively
    #[arg(long)]
    pub ignore_case: bool,
}

impl Source {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            style: None,
            scope: None,
            ignore_case: false,
        }
    }

    pub fn with_style(mut self, style: impl Into<PathBuf>) -> Self {
        self.style = Some(style.into());
        self
    }

    fn variable_case(&self) -> VariableCase {
        if self.ignore_case {
            VariableCase::Insensitive
        } else {
            VariableCase::Sensitive
        }
    }
}

/// A `name=value` pair from `--set`. The value may be empty or contain `=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
        if name.is_empty() {
            return Err(format!("missing variable name in `{s}`"));
        }
        Ok(Assignment {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// Hashed class map for a stylesheet, scoped by `scope` or the file name.
pub fn load_class_map(style: &Path, scope: Option<&str>) -> Result<ClassMap> {
    let css =
        fs::read_to_string(style).with_context(|| format!("failed to read {}", style.display()))?;
    let scope = match scope {
        Some(scope) => scope.to_owned(),
        None => style
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("style")
            .to_owned(),
    };
    ModuleNames::new(scope)
        .class_map(&css)
        .with_context(|| format!("failed to parse {}", style.display()))
}

/// Reads the template (and stylesheet, if any) and builds the component.
pub fn load_component(source: &Source) -> Result<Component> {
    let template = fs::read_to_string(&source.template)
        .with_context(|| format!("failed to read {}", source.template.display()))?;

    let mut options = ComponentOptions::new().variable_case(source.variable_case());
    if let Some(style) = &source.style {
        options = options.class_map(load_class_map(style, source.scope.as_deref())?);
    }

    debug!(template = %source.template.display(), "loading component");
    Component::with_options(&template, options)
        .with_context(|| format!("failed to build {}", source.template.display()))
}

/// Builds the component, applies `assignments` in order and returns its
/// outer HTML, or its text content when `text` is set.
pub fn render_cmd(source: &Source, assignments: &[Assignment], text: bool) -> Result<String> {
    let mut component = load_component(source)?;
    for Assignment { name, value } in assignments {
        component
            .update_variable(name, value.as_str())
            .with_context(|| format!("cannot set `{name}`"))?;
    }
    Ok(if text {
        component.text_content()
    } else {
        component.to_html()
    })
}

/// Lists the template's variables, handles and (with a stylesheet) the class
/// rewrites applied to it.
pub fn inspect_cmd(source: &Source) -> Result<String> {
    let component = load_component(source)?;
    let mut out = String::new();

    let variables: Vec<_> = component.variables().map(|(name, _)| name).collect();
    writeln!(out, "variables ({}):", variables.len())?;
    for name in variables {
        writeln!(out, "  {name}")?;
    }

    let mut handles: Vec<_> = component.handles().collect();
    handles.sort_unstable();
    writeln!(out, "handles ({}):", handles.len())?;
    for handle in handles {
        let element = component.element_by_handle(handle)?;
        let tag = component
            .document()
            .node(element)
            .and_then(|n| n.tag())
            .unwrap_or("?");
        writeln!(out, "  {handle} -> <{tag}>")?;
    }

    if let Some(style) = &source.style {
        let map = load_class_map(style, source.scope.as_deref())?;
        writeln!(out, "classes ({}):", map.len())?;
        for (class, hashed) in map.iter() {
            writeln!(out, "  {class} -> {hashed}")?;
        }
    }
    Ok(out)
}
