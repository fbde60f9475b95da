//! Import prefix aliases.
//!
//! An alias rewrites the start of an import specifier to a directory, the same way a solc
//! remapping does, and renders as one (`<prefix>=<target>`).

use crate::{error::ConfigError, raw::RawAliases};
use std::{fmt, path::PathBuf};

/// A single `prefix => target` rewrite.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alias {
    /// The normalized import prefix
    pub prefix: String,
    /// The directory the prefix is replaced with, as declared
    pub target: String,
}

impl Alias {
    /// Parses a solc remapping like `@openzeppelin/=lib/openzeppelin-contracts/`.
    ///
    /// Returns `None` if there is no `=` or the prefix is empty.
    pub fn parse_remapping(s: &str) -> Option<Self> {
        let (prefix, target) = s.split_once('=')?;
        let prefix = normalize_prefix(prefix);
        if prefix.is_empty() {
            return None;
        }
        Some(Self { prefix, target: target.trim().to_string() })
    }

    /// Returns true if `import` starts with this alias' prefix.
    pub fn matches(&self, import: &str) -> bool {
        import.starts_with(&self.prefix)
    }

    /// Replaces the prefix of `import` with the target, keeping the remainder unchanged.
    ///
    /// The caller must make sure the alias [matches](Self::matches) the import.
    pub fn apply(&self, import: &str) -> PathBuf {
        let remainder = &import[self.prefix.len()..];
        PathBuf::from(format!("{}{remainder}", self.target))
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.target)
    }
}

/// All aliases of a config, sorted by prefix, with unique prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasMap {
    aliases: Vec<Alias>,
}

impl AliasMap {
    pub(crate) const FIELD: &'static str = "alias";

    /// Validates the raw `[alias]` section.
    pub fn from_raw(raw: RawAliases) -> Result<Self, ConfigError> {
        let mut aliases = Vec::new();
        match raw {
            RawAliases::Table(entries) => {
                for (prefix, target) in entries {
                    let field = format!("{}.{prefix:?}", Self::FIELD);
                    let prefix = normalize_prefix(&prefix);
                    if prefix.is_empty() || target.trim().is_empty() {
                        return Err(ConfigError::missing(field));
                    }
                    aliases.push((field, Alias { prefix, target }));
                }
            }
            RawAliases::Remappings(entries) => {
                for (idx, entry) in entries.iter().enumerate() {
                    let field = format!("{}[{idx}]", Self::FIELD);
                    let alias = Alias::parse_remapping(entry)
                        .filter(|alias| !alias.target.is_empty())
                        .ok_or_else(|| ConfigError::missing(field.clone()))?;
                    aliases.push((field, alias));
                }
            }
        }
        Self::try_from_iter(aliases)
    }

    fn try_from_iter(
        entries: impl IntoIterator<Item = (String, Alias)>,
    ) -> Result<Self, ConfigError> {
        let mut aliases: Vec<Alias> = Vec::new();
        for (field, alias) in entries {
            match aliases.binary_search_by(|existing| existing.prefix.cmp(&alias.prefix)) {
                Ok(_) => return Err(ConfigError::DuplicateAlias { field, prefix: alias.prefix }),
                Err(pos) => aliases.insert(pos, alias),
            }
        }
        Ok(Self { aliases })
    }

    /// Returns the alias with the longest prefix that `import` starts with.
    ///
    /// If one prefix is a prefix of another, the longer one is more specific and wins.
    pub fn find(&self, import: &str) -> Option<&Alias> {
        self.aliases
            .iter()
            .filter(|alias| alias.matches(import))
            .max_by_key(|alias| alias.prefix.len())
    }

    /// Rewrites `import` with the best matching alias, see [`Self::find`].
    ///
    /// Returns `None` if no alias matches, in which case the import is resolved the default way.
    pub fn resolve(&self, import: &str) -> Option<PathBuf> {
        let alias = self.find(import)?;
        let resolved = alias.apply(import);
        trace!(import, alias = %alias, resolved = %resolved.display(), "resolved import alias");
        Some(resolved)
    }

    /// Returns the target declared for exactly this prefix.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        let prefix = normalize_prefix(prefix);
        self.aliases
            .binary_search_by(|alias| alias.prefix.as_str().cmp(&prefix))
            .ok()
            .map(|idx| self.aliases[idx].target.as_str())
    }

    /// Iterates over all aliases, sorted by prefix.
    pub fn iter(&self) -> std::slice::Iter<'_, Alias> {
        self.aliases.iter()
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether there are no aliases.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub(crate) fn to_raw(&self) -> RawAliases {
        self.iter().map(|alias| (alias.prefix.clone(), alias.target.clone())).collect()
    }
}

impl<'a> IntoIterator for &'a AliasMap {
    type Item = &'a Alias;
    type IntoIter = std::slice::Iter<'a, Alias>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Prefixes are compared after trimming surrounding whitespace and using `/` as separator.
fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().replace('\\', "/")
}
