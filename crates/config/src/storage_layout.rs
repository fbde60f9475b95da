//! Contracts whose storage layout is captured and diffed across builds.

use crate::{error::ConfigError, raw::RawStorageLayout, warning::Warning};
use std::{borrow::Cow, fmt, str::FromStr};

/// Identifies a contract as `<filePath>:<ContractName>`, or just `<ContractName>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractId {
    id: String,
    /// byte offset of the `:` separating path and name, if any
    separator: Option<usize>,
}

impl ContractId {
    /// The identifier as declared.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// The source file path, like `src/Hoku.sol`.
    pub fn path(&self) -> Option<&str> {
        self.separator.map(|idx| &self.id[..idx])
    }

    /// The contract name, like `Hoku`.
    pub fn name(&self) -> &str {
        match self.separator {
            Some(idx) => &self.id[idx + 1..],
            None => &self.id,
        }
    }

    /// Renders the identifier with its full path if `full_path` is set, or the bare name
    /// otherwise.
    pub fn display_name(&self, full_path: bool) -> &str {
        if full_path {
            self.as_str()
        } else {
            self.name()
        }
    }

    /// The file name of this contract's layout snapshot, like `src_Hoku.sol_Hoku.json`.
    pub fn snapshot_file_name(&self, full_path: bool) -> String {
        let name = self.display_name(full_path);
        let name: Cow<'_, str> = if name.contains(['/', '\\', ':']) {
            name.replace(['/', '\\', ':'], "_").into()
        } else {
            name.into()
        };
        format!("{name}.json")
    }
}

impl FromStr for ContractId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        // windows paths may contain a drive separator, the name is always after the last one
        let separator = id.rfind(':');
        let name = separator.map_or(id, |idx| &id[idx + 1..]);
        if name.is_empty() {
            return Err(format!("missing contract name in `{s}`"));
        }
        Ok(Self { id: id.to_string(), separator })
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// The `storageLayout` settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageLayoutConfig {
    contracts: Vec<ContractId>,
    full_path: bool,
}

impl StorageLayoutConfig {
    pub(crate) const FIELD: &'static str = "storageLayout.contracts";

    /// Validates the raw section.
    ///
    /// Repeated contracts are dropped, keeping the first occurrence, and reported as warnings.
    pub fn from_raw(
        raw: RawStorageLayout,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self, ConfigError> {
        let RawStorageLayout { contracts: raw_contracts, full_path } = raw;
        let mut contracts: Vec<ContractId> = Vec::with_capacity(raw_contracts.len());
        for (idx, contract) in raw_contracts.iter().enumerate() {
            let contract: ContractId = contract
                .parse()
                .map_err(|_| ConfigError::missing(format!("{}[{idx}]", Self::FIELD)))?;
            if contracts.contains(&contract) {
                warnings.push(Warning::DuplicateContract { contract: contract.id });
                continue;
            }
            contracts.push(contract);
        }
        Ok(Self { contracts, full_path })
    }

    /// The tracked contracts, in declaration order.
    pub fn contracts(&self) -> &[ContractId] {
        &self.contracts
    }

    /// Whether identifiers are rendered with their full file path.
    pub fn full_path(&self) -> bool {
        self.full_path
    }

    /// Whether `id` is tracked.
    pub fn contains(&self, id: &str) -> bool {
        self.contracts.iter().any(|contract| contract.as_str() == id.trim())
    }

    pub(crate) fn to_raw(&self) -> RawStorageLayout {
        RawStorageLayout {
            contracts: self.contracts.iter().map(ToString::to_string).collect(),
            full_path: self.full_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn parse_contract_id() {
        let id: ContractId = "src/Hoku.sol:Hoku".parse().unwrap();
        assert_eq!(id.path(), Some("src/Hoku.sol"));
        assert_eq!(id.name(), "Hoku");
        assert_eq!(id.display_name(true), "src/Hoku.sol:Hoku");
        assert_eq!(id.display_name(false), "Hoku");
        assert_eq!(id.snapshot_file_name(true), "src_Hoku.sol_Hoku.json");
        assert_eq!(id.snapshot_file_name(false), "Hoku.json");

        let id: ContractId = "Hoku".parse().unwrap();
        assert_eq!(id.path(), None);
        assert_eq!(id.display_name(true), "Hoku");

        let id: ContractId = r"C:\repo\src\Hoku.sol:Hoku".parse().unwrap();
        assert_eq!(id.path(), Some(r"C:\repo\src\Hoku.sol"));
        assert_eq!(id.name(), "Hoku");

        assert!("".parse::<ContractId>().is_err());
        assert!("src/Hoku.sol:".parse::<ContractId>().is_err());
    }

    #[test]
    fn collapses_duplicates_with_warning() {
        let mut warnings = vec![];
        let raw = RawStorageLayout {
            contracts: vec![
                "src/Hoku.sol:Hoku".to_string(),
                "src/Credit.sol:Credit".to_string(),
                "src/Hoku.sol:Hoku".to_string(),
            ],
            full_path: true,
        };
        let layout = StorageLayoutConfig::from_raw(raw, &mut warnings).unwrap();
        let contracts: Vec<_> = layout.contracts().iter().map(ContractId::as_str).collect();
        assert_eq!(contracts, vec!["src/Hoku.sol:Hoku", "src/Credit.sol:Credit"]);
        assert_eq!(
            warnings,
            vec![Warning::DuplicateContract { contract: "src/Hoku.sol:Hoku".to_string() }]
        );
        assert!(layout.contains("src/Credit.sol:Credit"));
        assert!(!layout.contains("Credit"));
    }

    #[test]
    fn rejects_empty_identifier() {
        let raw = RawStorageLayout { contracts: vec!["A".into(), " ".into()], full_path: false };
        let err = StorageLayoutConfig::from_raw(raw, &mut vec![]).unwrap_err();
        assert_eq!(err, ConfigError::missing("storageLayout.contracts[1]"));
    }
}
