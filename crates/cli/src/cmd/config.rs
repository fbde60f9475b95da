//! config command

use crate::{cmd::Cmd, opts::ProjectArgs, utils::LoadConfig};
use clap::Parser;
use hoku_config::Config;

/// Command to list currently set config values
#[derive(Clone, Debug, Parser)]
pub struct ConfigArgs {
    /// Print the config as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    project: ProjectArgs,
}

impl ConfigArgs {
    fn render(&self, config: &Config) -> eyre::Result<String> {
        let s = if self.json {
            serde_json::to_string_pretty(&config.to_raw())?
        } else {
            config.to_string_pretty()?
        };
        Ok(s)
    }
}

impl Cmd for ConfigArgs {
    type Output = ();

    fn run(self) -> eyre::Result<Self::Output> {
        let config = self.project.load_config_emit_warnings()?;
        println!("{}", self.render(&config)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoku_config::{RawCompiler, RawConfig, RawPaths};

    fn config() -> Config {
        Config::load(RawConfig {
            compilers: Some(vec![RawCompiler::from("0.8.23")]),
            paths: Some(RawPaths {
                sources_dir: Some("src".into()),
                storage_layouts_dir: Some(".storage-layouts".into()),
            }),
            alias: Some([("@a".to_string(), "lib/a".to_string())].into_iter().collect()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn renders_json() {
        let args = ConfigArgs::parse_from(["config", "--json"]);
        let json: serde_json::Value =
            serde_json::from_str(&args.render(&config()).unwrap()).unwrap();
        assert_eq!(json["compilers"][0]["version"], "0.8.23");
        assert_eq!(json["paths"]["sourcesDir"], "src");
        assert_eq!(json["alias"]["@a"], "lib/a");
    }

    #[test]
    fn renders_toml() {
        let args = ConfigArgs::parse_from(["config"]);
        let rendered = args.render(&config()).unwrap();
        let raw: RawConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(Config::load(raw).unwrap(), config());
    }
}
