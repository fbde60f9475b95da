use crate::Config;
use figment::{
    providers::{Env, Format, Toml},
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use inflector::Inflector;
use std::path::{Path, PathBuf};

/// A convenience provider to retrieve a toml file.
/// This will return an error if the env var is set but the file does not exist
pub(crate) struct TomlFileProvider {
    pub env_var: Option<&'static str>,
    pub default: PathBuf,
    pub cache: Option<Result<Map<Profile, Dict>, Error>>,
}

impl TomlFileProvider {
    pub(crate) fn new(env_var: Option<&'static str>, default: impl Into<PathBuf>) -> Self {
        Self { env_var, default: default.into(), cache: None }
    }

    fn env_val(&self) -> Option<String> {
        self.env_var.and_then(Env::var)
    }

    fn file(&self) -> PathBuf {
        self.env_val().map(PathBuf::from).unwrap_or_else(|| self.default.clone())
    }

    fn is_missing(&self) -> bool {
        if let Some(file) = self.env_val() {
            let path = Path::new(&file);
            if !path.exists() {
                return true;
            }
        }
        false
    }

    pub(crate) fn cached(mut self) -> Self {
        self.cache = Some(self.read());
        self
    }

    fn read(&self) -> Result<Map<Profile, Dict>, Error> {
        use serde::de::Error as _;
        if let Some(file) = self.env_val() {
            let path = Path::new(&file);
            if !path.exists() {
                return Err(Error::custom(format!(
                    "Config file `{}` set in env var `{}` does not exist",
                    file,
                    self.env_var.unwrap_or_default()
                )));
            }
            trace!(path = %path.display(), "reading config file from env var");
            Toml::file(file)
        } else {
            trace!(path = %self.default.display(), "reading config file");
            Toml::file(&self.default)
        }
        .data()
    }
}

impl Provider for TomlFileProvider {
    fn metadata(&self) -> Metadata {
        if self.is_missing() {
            Metadata::named("TOML file provider")
        } else {
            Toml::file(self.file()).metadata()
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        if let Some(cache) = self.cache.as_ref() {
            cache.clone()
        } else {
            self.read()
        }
    }
}

/// A Provider that ensures all setting keys are camel case, so that `sources_dir` and
/// `HOKU_PATHS__SOURCES_DIR` land on `sourcesDir`.
///
/// Keys of the alias section are import prefixes and are left untouched.
pub(crate) struct ForcedCamelCaseData<P>(pub(crate) P);

impl<P: Provider> Provider for ForcedCamelCaseData<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut map = Map::new();
        for (profile, dict) in self.0.data()? {
            map.insert(profile, camel_case_keys(dict));
        }
        Ok(map)
    }
}

fn camel_case_keys(dict: Dict) -> Dict {
    dict.into_iter()
        .map(|(key, value)| {
            let key = key.to_camel_case();
            let value = match value {
                Value::Dict(tag, inner) if key != Config::ALIAS_SECTION => {
                    Value::Dict(tag, camel_case_keys(inner))
                }
                value => value,
            };
            (key, value)
        })
        .collect()
}
