//! CLI entry point for the tile puzzle engine

use clap::Parser;
use tilepuzzle::io::cli::{Cli, CommandRunner, init_logging};

fn main() -> tilepuzzle::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let runner = CommandRunner::new(cli);
    runner.run()
}
