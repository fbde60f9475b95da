use serde::{Deserialize, Serialize};
use std::fmt;

/// Warnings emitted during loading of the configuration
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Warning {
    /// An unknown top-level section was encountered
    UnknownSection {
        /// The unknown key
        unknown_section: String,
        /// The source where the key was found
        source: Option<String>,
    },
    /// A tracked contract was listed more than once
    DuplicateContract {
        /// The repeated contract identifier
        contract: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection { unknown_section, source } => {
                let source = source.as_ref().map(|src| format!(" in {src}")).unwrap_or_default();
                f.write_fmt(format_args!(
                    "Unknown section [{unknown_section}] found{source}. It will be ignored."
                ))
            }
            Self::DuplicateContract { contract } => f.write_fmt(format_args!(
                "Contract `{contract}` is listed more than once in `storageLayout.contracts`; duplicates are ignored."
            )),
        }
    }
}

impl std::error::Error for Warning {}
