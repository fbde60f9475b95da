//! error handling

use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt, path::PathBuf};

/// The message prefixed to a failed extraction of the config from the figment
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract hoku config:";

/// Represents a failed validation of a raw config in [`Config::load`](crate::Config::load).
///
/// Every variant carries the path of the offending setting, like `paths.sourcesDir`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent or empty.
    #[error("missing or empty setting `{field}`")]
    MissingField {
        /// path of the setting
        field: String,
    },
    /// A compiler version is not a well-formed semantic version.
    #[error("invalid compiler version `{version}` for setting `{field}`: {reason}")]
    InvalidVersion {
        /// path of the setting
        field: String,
        /// the rejected version string
        version: String,
        /// why the version was rejected
        reason: String,
    },
    /// Two alias prefixes are identical after normalization.
    #[error("duplicate alias `{prefix}` for setting `{field}`")]
    DuplicateAlias {
        /// path of the setting
        field: String,
        /// the normalized prefix
        prefix: String,
    },
}

impl ConfigError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// Returns the path of the setting that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } |
            Self::InvalidVersion { field, .. } |
            Self::DuplicateAlias { field, .. } => field,
        }
    }
}

/// Represents a failed attempt to extract a [`RawConfig`](crate::RawConfig) from a `Figment`
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    /// error thrown when extracting the config
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique_errors = Vec::with_capacity(self.error.count());
        let mut unique = HashSet::with_capacity(self.error.count());
        for err in self.error.clone().into_iter() {
            let err = if err
                .metadata
                .as_ref()
                .map(|meta| meta.name.contains(Toml::NAME))
                .unwrap_or_default()
            {
                SourceError::Toml(err)
            } else {
                SourceError::Other(err)
            };

            if unique.insert(err.to_string()) {
                unique_errors.push(err);
            }
        }
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in unique_errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// An error thrown by one of the sources the config is read from
#[derive(Clone, Debug, PartialEq)]
enum SourceError {
    /// An error thrown during toml parsing
    Toml(figment::Error),
    /// Any other error, e.g. from environment variables
    Other(figment::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_err = |err: &figment::Error, f: &mut fmt::Formatter<'_>| {
            write!(f, "{err}")?;
            if !err.path.is_empty() {
                // the path will contain the setting like `["paths", "sourcesDir"]`
                write!(f, " for setting `{}`", err.path.join("."))?;
            }
            Ok(())
        };

        match self {
            Self::Toml(err) => {
                f.write_str("hoku.toml error: ")?;
                fmt_err(err, f)
            }
            Self::Other(err) => {
                f.write_str("hoku config error: ")?;
                fmt_err(err, f)
            }
        }
    }
}

/// Any error that can occur while loading a config from its sources.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LoadConfigError {
    /// The sources could not be read or parsed.
    #[error(transparent)]
    Extract(#[from] ExtractConfigError),
    /// The raw config was read but is invalid.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// The kind of directory a [`PathNotFoundError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    /// `paths.sourcesDir`
    Sources,
    /// `paths.storageLayoutsDir`
    StorageLayouts,
    /// the target directory of an alias
    AliasTarget,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sources => "sources directory",
            Self::StorageLayouts => "storage layouts directory",
            Self::AliasTarget => "alias target directory",
        })
    }
}

/// Reported by consumers when a directory named by the config does not exist at first use.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{}` does not exist", path.display())]
pub struct PathNotFoundError {
    /// what the path was configured as
    pub kind: PathKind,
    /// the path that was looked up, joined with the project root
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_field() {
        let err = ConfigError::missing("paths.sourcesDir");
        assert_eq!(err.field(), "paths.sourcesDir");
        assert_eq!(err.to_string(), "missing or empty setting `paths.sourcesDir`");

        let err = ConfigError::DuplicateAlias {
            field: "alias".to_string(),
            prefix: "@a".to_string(),
        };
        assert_eq!(err.field(), "alias");
    }

    #[test]
    fn path_not_found_display() {
        let err = PathNotFoundError { kind: PathKind::Sources, path: PathBuf::from("./src") };
        assert_eq!(err.to_string(), "sources directory `./src` does not exist");
    }
}
