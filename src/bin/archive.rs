use anyhow::Result;
use clap::Parser;
use projpack::cli::ArchiveCli;
use projpack::{PackContext, commands, output};
use std::process;

fn main() {
    if let Err(e) = run() {
        output::error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = ArchiveCli::parse();
    output::init_logging(cli.common.verbosity());

    let ctx = PackContext::resolve(cli.common.script_dir)?;
    commands::archive::execute(&ctx)?;
    Ok(())
}
