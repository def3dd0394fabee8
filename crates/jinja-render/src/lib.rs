//! Template rendering for the `jinja` command line renderer.
//!
//! This crate is the only place that talks to the template engine. Callers
//! hand it a [`TemplateSource`] and a context mapping and get text back, or a
//! [`RenderError`] that does not expose the engine's own error type.
//!
//! ```rust
//! use jinja_render::{MiniJinjaEngine, RenderOptions, TemplateEngine, TemplateSource};
//! use serde_json::json;
//!
//! let engine = MiniJinjaEngine::with_options(RenderOptions::new().strict_undefined(true));
//! let context = json!({"items": ["a", "b"]});
//! let output = engine
//!     .render(
//!         &TemplateSource::inline("{{ items | join(',') }}\n"),
//!         context.as_object().unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(output, "a,b\n");
//! ```

mod engine;
mod error;
mod source;

pub use engine::{Context, MiniJinjaEngine, RenderOptions, TemplateEngine};
pub use error::RenderError;
pub use source::{TemplateSource, INLINE_NAME};
