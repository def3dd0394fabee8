use clap::Parser;
use jinja_cli::{logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_config());
    jinja_cli::run(&cli)?;
    Ok(())
}
