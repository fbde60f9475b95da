use clap::Parser;
use eyre::Result;
use hoku_cli::{cmd::Cmd, handler, utils};

mod args;

use args::{Hoku, HokuSubcommand};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    utils::enable_paint();
    let args = Hoku::parse();
    main_args(args)
}

fn main_args(args: Hoku) -> Result<()> {
    match args.cmd {
        HokuSubcommand::Config(cmd) => cmd.run(),
        HokuSubcommand::Remappings(cmd) => cmd.run(),
        HokuSubcommand::Resolve(cmd) => cmd.run(),
        HokuSubcommand::Layouts(cmd) => cmd.run(),
    }
}
