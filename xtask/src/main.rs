//! xtask for projpack - build automation and tooling
//!
//! Generates man pages for both stage binaries from their clap definitions.

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};
use projpack::cli::{ArchiveCli, ScanCli};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for projpack")]
enum Task {
    /// Generate man pages from clap definitions
    GenerateManPages {
        /// Output directory for man pages (default: ./man)
        #[arg(short, long, default_value = "man")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let task = Task::parse();

    match task {
        Task::GenerateManPages { output } => generate_man_pages(&output)?,
    }

    Ok(())
}

fn generate_man_pages(output_dir: &Path) -> Result<()> {
    println!("Generating man pages...");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    for cmd in [ScanCli::command(), ArchiveCli::command()] {
        render_man_page(cmd, output_dir)?;
    }

    println!(
        "\nMan pages successfully generated in: {}",
        output_dir.display()
    );
    println!("\nTo install system-wide (requires root):");
    println!(
        "  sudo cp {}/*.1 /usr/share/man/man1/",
        output_dir.display()
    );

    Ok(())
}

fn render_man_page(cmd: Command, output_dir: &Path) -> Result<()> {
    let man_path = output_dir.join(format!("{}.1", cmd.get_name()));
    let man_file = fs::File::create(&man_path)
        .with_context(|| format!("Failed to create man page: {}", man_path.display()))?;

    clap_mangen::Man::new(cmd).render(&mut std::io::BufWriter::new(man_file))?;

    println!("✓ Generated: {}", man_path.display());
    Ok(())
}
