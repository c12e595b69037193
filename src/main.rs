//! CLI entry point for batch neighbor measurement over label masks

use cellnbr::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> cellnbr::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
