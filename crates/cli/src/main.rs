//! Entry point for the Dockerfile formatter.
//! Argument handling, configuration resolution and the formatting
//! driver live in the library modules.

use dockfmt::args::parse_cli;
use dockfmt::run::run;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    run(cli)
}
