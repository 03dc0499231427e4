use anyhow::Result;
use clap::Parser;
use projpack::cli::ScanCli;
use projpack::scanner::{ScanOptions, WalkStrategy};
use projpack::{PackContext, commands, output};
use std::process;

fn main() {
    if let Err(e) = run() {
        output::error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = ScanCli::parse();
    output::init_logging(cli.common.verbosity());

    let ctx = PackContext::resolve(cli.common.script_dir)?;
    let config_path = cli.config.unwrap_or_else(|| ctx.default_config_path());
    let options = ScanOptions {
        strategy: if cli.iterative {
            WalkStrategy::Iterative
        } else {
            WalkStrategy::Recursive
        },
        prune_excluded: cli.prune_excluded,
    };

    commands::scan::execute(&ctx, &config_path, options)?;
    Ok(())
}
