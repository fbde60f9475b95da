//! The raw, unvalidated shape of a hoku config.
//!
//! Every setting is optional here so that [`Config::load`](crate::Config::load) can report
//! exactly which one is missing instead of failing inside the deserializer.

use crate::Warning;
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, path::PathBuf};

/// A config as it is read from `hoku.toml` or any other serde source.
///
/// ```toml
/// [[compilers]]
/// version = "0.8.23"
///
/// [paths]
/// sourcesDir = "src"
/// storageLayoutsDir = ".storage-layouts"
///
/// [storageLayout]
/// contracts = ["src/Hoku.sol:Hoku"]
/// fullPath = true
///
/// [alias]
/// "@openzeppelin/contracts" = "lib/openzeppelin-contracts/contracts"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// compiler versions, in matching precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compilers: Option<Vec<RawCompiler>>,
    /// source and output directories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<RawPaths>,
    /// contracts whose storage layout is tracked
    #[serde(default, alias = "storage_layout", skip_serializing_if = "Option::is_none")]
    pub storage_layout: Option<RawStorageLayout>,
    /// import prefix rewrites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<RawAliases>,
    /// Warnings gathered by the providers the raw config was read from
    #[serde(rename = "__warnings", default, skip_serializing)]
    pub warnings: Vec<Warning>,
}

/// A single compiler entry, either `{ version = "0.8.23" }` or just `"0.8.23"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCompiler {
    /// The bare version string
    Version(String),
    /// A compiler table
    Spec {
        /// the version string
        #[serde(default)]
        version: Option<String>,
    },
}

impl RawCompiler {
    /// Returns the declared version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Version(version) => Some(version),
            Self::Spec { version } => version.as_deref(),
        }
    }
}

impl<T: AsRef<str>> From<T> for RawCompiler {
    fn from(version: T) -> Self {
        Self::Spec { version: Some(version.as_ref().to_string()) }
    }
}

/// The `[paths]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaths {
    /// root of the contract sources, like `src`
    #[serde(default, alias = "sources_dir", skip_serializing_if = "Option::is_none")]
    pub sources_dir: Option<PathBuf>,
    /// where storage layout snapshots are written
    #[serde(default, alias = "storage_layouts_dir", skip_serializing_if = "Option::is_none")]
    pub storage_layouts_dir: Option<PathBuf>,
}

/// The `[storageLayout]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStorageLayout {
    /// contract identifiers, `<filePath>:<ContractName>`
    #[serde(default)]
    pub contracts: Vec<String>,
    /// whether identifiers are rendered with their full path
    #[serde(default, alias = "full_path")]
    pub full_path: bool,
}

/// The `[alias]` section.
///
/// Entries are kept in declaration order and duplicate keys are preserved, so that they can be
/// rejected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawAliases {
    /// `{ "<prefix>" = "<dir>" }`
    Table(Vec<(String, String)>),
    /// `["<prefix>=<dir>", ...]`, in solc remapping syntax
    Remappings(Vec<String>),
}

impl Default for RawAliases {
    fn default() -> Self {
        Self::Table(Vec::new())
    }
}

impl FromIterator<(String, String)> for RawAliases {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::Table(iter.into_iter().collect())
    }
}

impl Serialize for RawAliases {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Table(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (prefix, target) in entries {
                    map.serialize_entry(prefix, target)?;
                }
                map.end()
            }
            Self::Remappings(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(entry)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RawAliases {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AliasesVisitor;

        impl<'de> Visitor<'de> for AliasesVisitor {
            type Value = RawAliases;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of import prefixes or a list of `prefix=dir` remappings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
                while let Some(entry) = map.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(RawAliases::Table(entries))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or_default());
                while let Some(entry) = seq.next_element::<String>()? {
                    entries.push(entry);
                }
                Ok(RawAliases::Remappings(entries))
            }
        }

        deserializer.deserialize_any(AliasesVisitor)
    }
}
