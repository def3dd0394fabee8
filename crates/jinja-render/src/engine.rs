//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between the command line and the template
//! backend. [`MiniJinjaEngine`] is the only implementation.

use std::fs;

use minijinja::{path_loader, AutoEscape, Environment, UndefinedBehavior, Value};

use crate::error::RenderError;
use crate::source::{TemplateSource, INLINE_NAME};

/// Context handed to a template: top-level names and their values.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// A template engine that can render a template against a context.
pub trait TemplateEngine {
    /// Renders `template` with `context` and returns the output text.
    fn render(&self, template: &TemplateSource, context: &Context) -> Result<String, RenderError>;
}

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail on undefined variables instead of rendering them as empty.
    pub strict_undefined: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_undefined(mut self, strict: bool) -> Self {
        self.strict_undefined = strict;
        self
    }
}

/// MiniJinja-based template engine.
///
/// The environment keeps trailing newlines and never auto-escapes, so output
/// is plain text whatever the template file is called. A file template is
/// read from disk and registered under its file name; a loader on its
/// directory makes `{% include %}` and `{% extends %}` resolve relative to
/// the template.
///
/// # Example
///
/// ```rust
/// use jinja_render::{MiniJinjaEngine, TemplateEngine, TemplateSource};
/// use serde_json::json;
///
/// let context = json!({"name": "World"});
/// let output = MiniJinjaEngine::new()
///     .render(
///         &TemplateSource::inline("Hello {{ name }}!\n"),
///         context.as_object().unwrap(),
///     )
///     .unwrap();
/// assert_eq!(output, "Hello World!\n");
/// ```
#[derive(Debug, Clone)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates an engine with default options (lenient undefined handling).
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(if options.strict_undefined {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        });
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment,
    /// e.g. to register extra filters or globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template: &TemplateSource, context: &Context) -> Result<String, RenderError> {
        let mut env = self.env.clone();
        let ctx = Value::from_serialize(context);

        match template {
            TemplateSource::Inline(source) => {
                env.add_template_owned(INLINE_NAME, source.clone())?;
                Ok(env.get_template(INLINE_NAME)?.render(ctx)?)
            }
            TemplateSource::File(path) => {
                // Read directly: the loader refuses some valid names, such as
                // dot files. It only serves includes, imports and extends.
                let source = fs::read_to_string(path).map_err(|err| RenderError::read(path, err))?;
                if let Some(dir) = template.search_dir() {
                    env.set_loader(path_loader(dir));
                }
                let name = template.name().into_owned();
                env.add_template_owned(name.clone(), source)?;
                Ok(env.get_template(&name)?.render(ctx)?)
            }
        }
    }
}
