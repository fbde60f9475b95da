//! Compiler version requirements.

use crate::{error::ConfigError, raw::RawCompiler};
use semver::Version;
use std::fmt;

/// A compiler version the project is built with.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompilerSpec {
    /// The exact compiler version, like `0.8.23`
    pub version: Version,
}

impl CompilerSpec {
    pub(crate) const FIELD: &'static str = "compilers";

    /// Validates the raw compiler list, keeping its order.
    ///
    /// The list must not be empty and every version must be a well-formed semantic version.
    pub fn from_raw(raw: Option<Vec<RawCompiler>>) -> Result<Vec<Self>, ConfigError> {
        let raw = raw.filter(|compilers| !compilers.is_empty());
        let Some(raw) = raw else { return Err(ConfigError::missing(Self::FIELD)) };

        raw.iter()
            .enumerate()
            .map(|(idx, compiler)| {
                let field = format!("{}[{idx}].version", Self::FIELD);
                let version = compiler
                    .version()
                    .filter(|version| !version.trim().is_empty())
                    .ok_or_else(|| ConfigError::missing(field.clone()))?;
                Version::parse(version)
                    .map(|version| Self { version })
                    .map_err(|err| ConfigError::InvalidVersion {
                        field,
                        version: version.to_string(),
                        reason: err.to_string(),
                    })
            })
            .collect()
    }

    pub(crate) fn to_raw(&self) -> RawCompiler {
        RawCompiler::Spec { version: Some(self.version.to_string()) }
    }
}

impl fmt::Display for CompilerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.version, f)
    }
}
