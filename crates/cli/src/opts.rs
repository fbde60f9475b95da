use clap::{Parser, ValueHint};
use eyre::{Result, WrapErr};
use hoku_config::{
    figment::{
        value::{Dict, Map, Value},
        Metadata, Profile, Provider,
    },
    canonic, find_project_root_path, Config,
};
use std::path::PathBuf;

/// Options locating and overriding the project config.
///
/// CLI arguments take the highest precedence: `ProjectArgs` is a `figment::Provider` that is
/// merged on top of `hoku.toml` and the environment.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Project options")]
pub struct ProjectArgs {
    /// The project's root path.
    ///
    /// By default the closest directory containing a `hoku.toml`, bounded by the Git repository,
    /// or the current working directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Override the contract sources directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub sources_dir: Option<PathBuf>,

    /// Override the storage layout snapshots directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub storage_layouts_dir: Option<PathBuf>,
}

impl ProjectArgs {
    /// Returns the absolute project root, see [`ProjectArgs::root`].
    pub fn project_root(&self) -> Result<PathBuf> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => find_project_root_path(None)?,
        };
        Ok(canonic(root))
    }

    /// Loads the project config with these arguments merged on top.
    pub fn load_config(&self) -> Result<Config> {
        let root = self.project_root()?;
        let figment = Config::figment_with_root(&root).merge(self);
        let config = Config::try_from(figment)
            .wrap_err_with(|| format!("failed to load config at {}", root.display()))?;
        Ok(config.with_root(root))
    }
}

// Make these args a `figment::Provider` so that they can be merged into the `Config`
impl Provider for ProjectArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named("Project Args Provider")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, hoku_config::figment::Error> {
        let mut paths = Dict::new();
        if let Some(dir) = &self.sources_dir {
            paths.insert("sourcesDir".to_string(), Value::serialize(dir)?);
        }
        if let Some(dir) = &self.storage_layouts_dir {
            paths.insert("storageLayoutsDir".to_string(), Value::serialize(dir)?);
        }

        let mut dict = Dict::new();
        if !paths.is_empty() {
            dict.insert("paths".to_string(), paths.into());
        }
        Ok(Map::from([(Profile::Default, dict)]))
    }
}
