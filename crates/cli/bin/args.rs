use clap::{Parser, Subcommand};
use hoku_cli::cmd::{
    config::ConfigArgs, layouts::LayoutsArgs, remappings::RemappingArgs, resolve::ResolveArgs,
};

/// Inspect the hoku build config and resolve imports against it.
#[derive(Parser)]
#[command(name = "hoku", version)]
pub struct Hoku {
    #[command(subcommand)]
    pub cmd: HokuSubcommand,
}

#[derive(Subcommand)]
pub enum HokuSubcommand {
    /// Display the current config.
    #[command(visible_alias = "co")]
    Config(ConfigArgs),

    /// Get the import aliases in solc remapping syntax.
    #[command(visible_alias = "re")]
    Remappings(RemappingArgs),

    /// Resolve import paths through the configured aliases.
    Resolve(ResolveArgs),

    /// List the tracked contracts and their storage layout snapshot files.
    #[command(visible_alias = "sl")]
    Layouts(LayoutsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Hoku::command().debug_assert();
    }

    #[test]
    fn parses_project_args() {
        let args = Hoku::parse_from(["hoku", "config", "--json", "--root", "/tmp/project"]);
        assert!(matches!(args.cmd, HokuSubcommand::Config(_)));

        let args = Hoku::parse_from(["hoku", "sl", "--sources-dir", "contracts"]);
        assert!(matches!(args.cmd, HokuSubcommand::Layouts(_)));
    }

    #[test]
    fn resolve_requires_an_import() {
        assert!(Hoku::try_parse_from(["hoku", "resolve"]).is_err());
        assert!(Hoku::try_parse_from(["hoku", "resolve", "@a/Foo.sol", "--check"]).is_ok());
    }
}
