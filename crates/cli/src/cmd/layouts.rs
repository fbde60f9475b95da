use crate::{cmd::Cmd, opts::ProjectArgs, utils::LoadConfig};
use clap::Parser;
use hoku_config::Config;

/// CLI arguments for `hoku layouts`.
#[derive(Clone, Debug, Parser)]
pub struct LayoutsArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

/// One line per tracked contract: its rendered name and snapshot file.
fn render(config: &Config) -> Vec<String> {
    let full_path = config.is_full_path();
    config
        .storage_layout()
        .contracts()
        .iter()
        .map(|contract| {
            format!(
                "{}\t{}",
                contract.display_name(full_path),
                config.storage_layout_file(contract).display()
            )
        })
        .collect()
}

impl Cmd for LayoutsArgs {
    type Output = ();

    fn run(self) -> eyre::Result<Self::Output> {
        let config = self.project.load_config_emit_warnings()?;
        for line in render(&config) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoku_config::{RawCompiler, RawConfig, RawPaths, RawStorageLayout};
    use std::path::Path;

    fn config(full_path: bool) -> Config {
        Config::load(RawConfig {
            compilers: Some(vec![RawCompiler::from("0.8.26")]),
            paths: Some(RawPaths {
                sources_dir: Some("src".into()),
                storage_layouts_dir: Some("layouts".into()),
            }),
            storage_layout: Some(RawStorageLayout {
                contracts: vec!["src/Hoku.sol:Hoku".to_string()],
                full_path,
            }),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn renders_full_path_names() {
        let expected = Path::new(".").join("layouts").join("src_Hoku.sol_Hoku.json");
        assert_eq!(
            render(&config(true)),
            vec![format!("src/Hoku.sol:Hoku\t{}", expected.display())]
        );
    }

    #[test]
    fn renders_short_names() {
        let expected = Path::new(".").join("layouts").join("Hoku.json");
        assert_eq!(render(&config(false)), vec![format!("Hoku\t{}", expected.display())]);
    }
}
