use anyhow::Result;
use clap::Parser;
use storybook_migrate::{cli, logging, workflow};

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    logging::init(args.command.verbose());
    match args.command {
        cli::Command::Migrate(args) => workflow::run_migrate(args),
        cli::Command::Projects(args) => workflow::run_projects(args),
    }
}
