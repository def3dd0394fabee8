use std::io;

use jinja_data::LoadError;
use jinja_render::RenderError;
use thiserror::Error;

use crate::output::OutputDestination;

/// Everything that can stop a render.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to read template from stdin")]
    TemplateRead(#[source] io::Error),

    #[error("the template and the data cannot both be read from stdin")]
    StdinConflict,

    #[error("failed to write output to {destination}")]
    Output {
        destination: OutputDestination,
        #[source]
        source: io::Error,
    },
}
