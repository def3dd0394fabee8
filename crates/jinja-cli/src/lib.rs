//! The `jinja` command line renderer.
//!
//! Reads a template (from a file or stdin), loads an optional data file
//! through [`jinja_data`], applies `-D` overrides, renders through
//! [`jinja_render`] and writes the result.
//!
//! ```text
//! jinja [OPTIONS] [TEMPLATE]
//!
//! jinja -d people.csv page.j2            # rows are available as `data`
//! jinja -d config.ini -o out.txt page.j2
//! jinja -D name World < page.j2
//! cat data.yaml | jinja -d - -f yaml page.j2
//! ```

pub mod cli;
mod error;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use error::Error;

use jinja_data::{DataLoader, DataSource, RealStdin, StdinReader};
use jinja_render::{MiniJinjaEngine, RenderOptions, TemplateEngine, TemplateSource};

/// Renders the template described by `cli` and returns the text.
///
/// Nothing is written; `stdin` serves whichever of template or data is `-`.
pub fn render<S: StdinReader>(cli: &Cli, stdin: S) -> Result<String, Error> {
    let data = cli.data_source();
    if cli.template_from_stdin() && data == Some(DataSource::Stdin) {
        return Err(Error::StdinConflict);
    }

    let template = match cli.template_file() {
        Some(file) => file,
        None => TemplateSource::Inline(stdin.read_to_string().map_err(Error::TemplateRead)?),
    };

    let context = DataLoader::new()
        .with_stdin(&stdin)
        .format(cli.format.clone())
        .has_headers(!cli.no_headers)
        .load_with_overrides(data.as_ref(), cli.overrides())?;
    tracing::debug!(template = %template, variables = context.len(), "rendering");

    let engine =
        MiniJinjaEngine::with_options(RenderOptions::new().strict_undefined(cli.strict_undefined));
    Ok(engine.render(&template, &context)?)
}

/// Renders and writes the output. Nothing is written if rendering fails.
pub fn run(cli: &Cli) -> Result<(), Error> {
    let output = render(cli, RealStdin)?;
    let destination = cli.output_destination();
    destination
        .write_text(&output)
        .map_err(|source| Error::Output {
            destination: destination.clone(),
            source,
        })?;
    tracing::debug!(destination = %destination, bytes = output.len(), "output written");
    Ok(())
}
