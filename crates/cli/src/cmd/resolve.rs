use crate::{cmd::Cmd, opts::ProjectArgs, utils::LoadConfig};
use clap::Parser;
use hoku_config::Config;

/// CLI arguments for `hoku resolve`.
#[derive(Clone, Debug, Parser)]
pub struct ResolveArgs {
    /// The import paths to resolve, like `@openzeppelin/contracts/access/Ownable.sol`.
    #[arg(required = true, value_name = "IMPORT")]
    imports: Vec<String>,

    /// Join the resolved paths with the project root and fail if an alias target is missing.
    #[arg(long)]
    check: bool,

    #[command(flatten)]
    project: ProjectArgs,
}

impl ResolveArgs {
    fn resolve(&self, config: &Config, import: &str) -> eyre::Result<String> {
        let resolved = if self.check {
            config.resolve_import(import)?
        } else {
            config.resolve_alias(import)
        };
        Ok(match resolved {
            Some(path) => path.display().to_string(),
            None => format!("{import}: unresolved"),
        })
    }
}

impl Cmd for ResolveArgs {
    type Output = ();

    fn run(self) -> eyre::Result<Self::Output> {
        let config = self.project.load_config_emit_warnings()?;
        for import in &self.imports {
            println!("{}", self.resolve(&config, import)?);
        }
        Ok(())
    }
}
