//! Command line arguments.

use clap::{ArgAction, Parser};
use jinja_data::{DataSource, Override, STDIO_SENTINEL};
use jinja_render::TemplateSource;

use crate::logging::LogConfig;
use crate::output::OutputDestination;

/// Render a Jinja template against ini, json, xml, yaml or csv data.
#[derive(Debug, Clone, Parser)]
#[command(name = "jinja", version, about)]
pub struct Cli {
    /// Template file; `-` or absent reads the template from stdin
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Set a template variable, overriding the data file (repeatable)
    #[arg(
        short = 'D',
        long = "define",
        value_names = ["KEY", "VALUE"],
        num_args = 2,
        action = ArgAction::Append,
    )]
    pub define: Vec<String>,

    /// Data file; `-` reads the data from stdin
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<String>,

    /// Data format: ini, json, xml, yaml, csv, tsv or csv.<dialect>
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output file; `-` writes to stdout
    #[arg(short, long, value_name = "FILE", default_value = STDIO_SENTINEL)]
    pub output: String,

    /// Treat the first row of tabular data as data instead of field names
    #[arg(long)]
    pub no_headers: bool,

    /// Fail on undefined template variables instead of rendering them empty
    #[arg(long)]
    pub strict_undefined: bool,

    /// Log more (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// `-D` pairs in command line order.
    pub fn overrides(&self) -> Vec<Override> {
        self.define
            .chunks_exact(2)
            .map(|pair| Override::new(pair[0].clone(), pair[1].clone()))
            .collect()
    }

    pub fn template_from_stdin(&self) -> bool {
        self.template
            .as_deref()
            .map_or(true, |arg| arg == STDIO_SENTINEL)
    }

    /// The template file, or `None` when the template comes from stdin.
    pub fn template_file(&self) -> Option<TemplateSource> {
        match self.template.as_deref() {
            Some(arg) if arg != STDIO_SENTINEL => Some(TemplateSource::file(arg)),
            _ => None,
        }
    }

    pub fn data_source(&self) -> Option<DataSource> {
        self.data.as_deref().map(DataSource::from_arg)
    }

    pub fn output_destination(&self) -> OutputDestination {
        OutputDestination::from_arg(&self.output)
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_flags(self.verbose, self.quiet)
    }
}
