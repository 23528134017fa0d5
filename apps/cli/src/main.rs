//! jobnote CLI — extract job vacancies from saved pages into Markdown notes.
//!
//! Classifies role, level, work mode, salary and tech stack, then renders a
//! note whose filename is derived from company, role and level.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
