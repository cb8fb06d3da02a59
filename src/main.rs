use clap::Parser;
use melogen::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    cli::run(Cli::parse())
}
