use crate::{cmd::Cmd, opts::ProjectArgs, utils::LoadConfig};
use clap::Parser;

/// CLI arguments for `hoku remappings`.
#[derive(Clone, Debug, Parser)]
pub struct RemappingArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

impl Cmd for RemappingArgs {
    type Output = ();

    fn run(self) -> eyre::Result<Self::Output> {
        let config = self.project.load_config_emit_warnings()?;
        for remapping in config.remappings() {
            println!("{remapping}");
        }
        Ok(())
    }
}
