//! # hoku-config
//!
//! Build configuration for the hoku contracts: compiler versions, source and storage layout
//! directories, tracked contracts and import aliases.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

use figment::{
    providers::{Env, Serialized},
    value::{Dict, Map},
    Figment, Metadata, Profile, Provider,
};
use std::path::{Path, PathBuf};

pub mod alias;
pub use alias::{Alias, AliasMap};

pub mod compiler;
pub use compiler::CompilerSpec;

pub mod error;
pub use error::{ConfigError, ExtractConfigError, LoadConfigError, PathKind, PathNotFoundError};

pub mod raw;
pub use raw::{RawAliases, RawCompiler, RawConfig, RawPaths, RawStorageLayout};

pub mod storage_layout;
pub use storage_layout::{ContractId, StorageLayoutConfig};

pub mod utils;
pub use utils::*;

mod warning;
pub use warning::*;

pub mod providers;
use providers::{ForcedCamelCaseData, TomlFileProvider, WarningsProvider};

// reexport so callers can merge their own providers
pub use figment;

/// The `[paths]` settings.
///
/// Both directories are relative to the config root unless absolute. Their existence is only
/// checked when they are used, see [`Config::ensure_sources_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathsConfig {
    /// root of the contract sources
    pub sources_dir: PathBuf,
    /// where storage layout snapshots are written
    pub storage_layouts_dir: PathBuf,
}

impl PathsConfig {
    fn from_raw(raw: Option<RawPaths>) -> Result<Self, ConfigError> {
        let RawPaths { sources_dir, storage_layouts_dir } = raw.unwrap_or_default();
        let required = |dir: Option<PathBuf>, field: &str| {
            dir.filter(|dir| !dir.as_os_str().is_empty())
                .ok_or_else(|| ConfigError::missing(format!("paths.{field}")))
        };
        Ok(Self {
            sources_dir: required(sources_dir, "sourcesDir")?,
            storage_layouts_dir: required(storage_layouts_dir, "storageLayoutsDir")?,
        })
    }
}

/// Hoku build configuration
///
/// A `Config` is built once, either from a [`RawConfig`] with [`Config::load`] or from the
/// project's `hoku.toml` with [`Config::load_with_root`], and is read-only afterwards. Share it by
/// reference; it is `Send + Sync`.
///
/// # Provider Details
///
/// `Config` is a Figment [`Provider`] named `Hoku Config`. It emits its settings in their raw
/// form to the default profile, so a loaded config can be merged with further providers and
/// extracted again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The directory relative paths are resolved against
    root: PathBuf,
    /// compiler versions, in matching precedence
    compilers: Vec<CompilerSpec>,
    paths: PathsConfig,
    storage_layout: StorageLayoutConfig,
    alias: AliasMap,
    /// Non-fatal issues found while loading
    warnings: Vec<Warning>,
}

impl Config {
    /// File name of config toml file
    pub const FILE_NAME: &'static str = "hoku.toml";

    /// Environment variable that overrides the location of the config file
    pub const CONFIG_ENV_VAR: &'static str = "HOKU_CONFIG";

    /// Prefix of environment variables that override settings, `__` separates nested keys:
    /// `HOKU_PATHS__SOURCES_DIR=contracts`
    pub const ENV_PREFIX: &'static str = "HOKU_";

    /// The section holding import aliases
    pub const ALIAS_SECTION: &'static str = "alias";

    /// All known top-level sections
    pub const SECTIONS: &'static [&'static str] =
        &["compilers", "paths", "storageLayout", Self::ALIAS_SECTION];

    /// Validates `raw` into a `Config`.
    ///
    /// This performs no I/O: directories named by the config are not required to exist.
    /// Settings are checked in the order compilers, paths, storage layout, aliases and the first
    /// failure is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hoku_config::{Config, RawConfig};
    ///
    /// let raw: RawConfig = toml::from_str(
    ///     r#"
    ///     compilers = ["0.8.23"]
    ///     [paths]
    ///     sourcesDir = "src"
    ///     storageLayoutsDir = ".storage-layouts"
    ///     "#,
    /// )
    /// .unwrap();
    /// let config = Config::load(raw).unwrap();
    /// assert_eq!(config.compiler_versions(), vec!["0.8.23"]);
    /// ```
    pub fn load(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig { compilers, paths, storage_layout, alias, warnings: mut raw_warnings } = raw;

        let compilers = CompilerSpec::from_raw(compilers)?;
        let paths = PathsConfig::from_raw(paths)?;
        let storage_layout =
            StorageLayoutConfig::from_raw(storage_layout.unwrap_or_default(), &mut raw_warnings)?;
        let alias = AliasMap::from_raw(alias.unwrap_or_default())?;

        debug!(
            compilers = compilers.len(),
            contracts = storage_layout.contracts().len(),
            aliases = alias.len(),
            warnings = raw_warnings.len(),
            "loaded config"
        );

        Ok(Self {
            root: PathBuf::from("."),
            compilers,
            paths,
            storage_layout,
            alias,
            warnings: raw_warnings,
        })
    }

    /// Loads the config of the project at `root`.
    ///
    /// See [`figment_with_root`](Self::figment_with_root) for the sources that are merged.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
        let root = utils::canonic(root.as_ref());
        Ok(Self::try_from(Self::figment_with_root(&root))?.with_root(root))
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use figment::providers::{Format, Toml};
    /// use hoku_config::Config;
    ///
    /// // Use hoku's default `Figment`, but allow values from `other.toml`
    /// // to supersede its values.
    /// let figment = Config::figment_with_root(".").merge(Toml::file("other.toml"));
    ///
    /// let config = Config::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, LoadConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        let figment = Figment::from(provider);
        let raw = figment.extract::<RawConfig>().map_err(ExtractConfigError::new)?;
        Ok(Self::load(raw)?)
    }

    /// Returns the [Figment] for the project at `root`.
    ///
    /// Sources are merged from lowest to highest precedence:
    ///
    /// 1. `root/hoku.toml`, or the file named by `HOKU_CONFIG`, which must exist if set
    /// 2. `HOKU_` prefixed environment variables
    ///
    /// A relative `root` is made absolute first, so only `root` itself is searched for the file.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let root = utils::canonic(root.as_ref());
        let toml =
            TomlFileProvider::new(Some(Self::CONFIG_ENV_VAR), root.join(Self::FILE_NAME)).cached();
        let env = ForcedCamelCaseData(
            Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "LOG"]).split("__"),
        );

        let figment = Figment::new();
        let warnings = WarningsProvider::for_figment(&toml, &figment);
        let figment = figment.merge(warnings);
        figment.merge(ForcedCamelCaseData(toml)).merge(env)
    }

    /// Sets the directory relative paths are resolved against.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Returns the settings in their raw form.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            compilers: Some(self.compilers.iter().map(CompilerSpec::to_raw).collect()),
            paths: Some(RawPaths {
                sources_dir: Some(self.paths.sources_dir.clone()),
                storage_layouts_dir: Some(self.paths.storage_layouts_dir.clone()),
            }),
            storage_layout: Some(self.storage_layout.to_raw()),
            alias: (!self.alias.is_empty()).then(|| self.alias.to_raw()),
            warnings: Vec::new(),
        }
    }

    /// Serialize the config as a String of TOML.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.to_raw())
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configured compilers, in matching precedence.
    pub fn compilers(&self) -> &[CompilerSpec] {
        &self.compilers
    }

    /// The configured compiler versions as strings, in matching precedence.
    pub fn compiler_versions(&self) -> Vec<String> {
        self.compilers.iter().map(ToString::to_string).collect()
    }

    /// The `[paths]` settings.
    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// The sources directory, as declared.
    pub fn sources_dir(&self) -> &Path {
        &self.paths.sources_dir
    }

    /// The storage layouts directory, as declared.
    pub fn storage_layouts_dir(&self) -> &Path {
        &self.paths.storage_layouts_dir
    }

    /// The `storageLayout` settings.
    pub fn storage_layout(&self) -> &StorageLayoutConfig {
        &self.storage_layout
    }

    /// The identifiers of all tracked contracts, in declaration order and without duplicates.
    pub fn tracked_contracts(&self) -> impl Iterator<Item = &str> + '_ {
        self.storage_layout.contracts().iter().map(ContractId::as_str)
    }

    /// Whether the storage layout of `contract` is tracked.
    pub fn is_tracked(&self, contract: &str) -> bool {
        self.storage_layout.contains(contract)
    }

    /// Whether contract identifiers are rendered with their full path.
    pub fn is_full_path(&self) -> bool {
        self.storage_layout.full_path()
    }

    /// All import aliases.
    pub fn aliases(&self) -> &AliasMap {
        &self.alias
    }

    /// Rewrites `import` with the alias with the longest matching prefix.
    ///
    /// Returns `None` if no alias matches. The result is not joined with the root, see
    /// [`resolve_import`](Self::resolve_import) for that.
    pub fn resolve_alias(&self, import: &str) -> Option<PathBuf> {
        self.alias.resolve(import)
    }

    /// All aliases in solc remapping syntax, `<prefix>=<target>`, sorted by prefix.
    pub fn remappings(&self) -> Vec<String> {
        self.alias.iter().map(ToString::to_string).collect()
    }

    /// Non-fatal issues found while loading.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The sources directory joined with the root.
    pub fn sources_path(&self) -> PathBuf {
        self.root.join(&self.paths.sources_dir)
    }

    /// The storage layouts directory joined with the root.
    pub fn storage_layouts_path(&self) -> PathBuf {
        self.root.join(&self.paths.storage_layouts_dir)
    }

    /// The snapshot file of `contract`'s storage layout, named after its rendered identifier.
    pub fn storage_layout_file(&self, contract: &ContractId) -> PathBuf {
        self.storage_layouts_path().join(contract.snapshot_file_name(self.is_full_path()))
    }

    /// Returns the canonical sources directory, if it exists.
    pub fn ensure_sources_dir(&self) -> Result<PathBuf, PathNotFoundError> {
        existing_dir(self.sources_path(), PathKind::Sources)
    }

    /// Returns the canonical storage layouts directory, if it exists.
    pub fn ensure_storage_layouts_dir(&self) -> Result<PathBuf, PathNotFoundError> {
        existing_dir(self.storage_layouts_path(), PathKind::StorageLayouts)
    }

    /// Resolves `import` through the aliases and joins the result with the root.
    ///
    /// Returns `Ok(None)` if no alias matches, and an error if the matching alias' target
    /// directory does not exist.
    pub fn resolve_import(&self, import: &str) -> Result<Option<PathBuf>, PathNotFoundError> {
        let Some(alias) = self.alias.find(import) else { return Ok(None) };
        existing_dir(self.root.join(&alias.target), PathKind::AliasTarget)?;
        Ok(Some(self.root.join(alias.apply(import))))
    }
}

fn existing_dir(path: PathBuf, kind: PathKind) -> Result<PathBuf, PathNotFoundError> {
    if path.is_dir() {
        Ok(utils::canonic(path))
    } else {
        Err(PathNotFoundError { kind, path })
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Hoku Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self.to_raw()).data()
    }
}
