use std::path::{Path, PathBuf};

use crate::realtime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub collection: String,
    pub auth: Option<String>,
    pub title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`database_url` is not set (use sohbet.toml or SOHBET_DATABASE_URL)")]
    MissingDatabaseUrl,

    #[error("invalid database url '{url}': {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },

    #[error("invalid collection path '{path}': {reason}")]
    InvalidCollection { path: String, reason: &'static str },
}

impl Config {
    pub const DEFAULT_COLLECTION: &'static str = "messages";
    pub const DEFAULT_TITLE: &'static str = "Chat App";

    /// Reads `path` if it exists, then applies `SOHBET_*` overrides from the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = match std::fs::read_to_string(path) {
            Ok(data) => Some(data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file");
                None
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        #[derive(Default, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Loaded {
            database_url: Option<String>,
            collection: Option<String>,
            auth: Option<String>,
            title: Option<String>,
        }

        let loaded = match file {
            Some(data) => toml::from_str::<Loaded>(data)?,
            None => Loaded::default(),
        };

        let env = |key: &str| env(key).filter(|s| !s.trim().is_empty());

        let database_url = env("SOHBET_DATABASE_URL")
            .or(loaded.database_url)
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let collection = env("SOHBET_COLLECTION")
            .or(loaded.collection)
            .unwrap_or_else(|| Self::DEFAULT_COLLECTION.to_string());
        let auth = env("SOHBET_AUTH")
            .or(loaded.auth)
            .filter(|s| !s.trim().is_empty());
        let title = env("SOHBET_TITLE")
            .or(loaded.title)
            .unwrap_or_else(|| Self::DEFAULT_TITLE.to_string());

        let this = Self {
            database_url: database_url.trim().to_string(),
            collection: collection.trim().trim_matches('/').to_string(),
            auth,
            title,
        };

        Validator::database_url(&this.database_url)?;
        Validator::collection(&this.collection)?;
        Ok(this)
    }

    pub fn connection(&self) -> realtime::Config {
        realtime::Config {
            database_url: self.database_url.clone(),
            auth: self.auth.clone(),
        }
    }
}

struct Validator;

impl Validator {
    fn database_url(input: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidDatabaseUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = url::Url::parse(input).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("the scheme must be http or https"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed"));
        }
        Ok(())
    }

    fn collection(input: &str) -> Result<(), ConfigError> {
        const FORBIDDEN: [char; 5] = ['.', '$', '#', '[', ']'];

        let invalid = |reason| ConfigError::InvalidCollection {
            path: input.to_string(),
            reason,
        };

        if input.is_empty() {
            return Err(invalid("the path is empty"));
        }

        for segment in input.split('/') {
            if segment.is_empty() {
                return Err(invalid("the path has an empty segment"));
            }
            if segment.contains(&FORBIDDEN[..]) {
                return Err(invalid("segments cannot contain '.', '$', '#', '[' or ']'"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
