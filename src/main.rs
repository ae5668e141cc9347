use anyhow::Result;
use clap::Parser;

use chapter_audit::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
