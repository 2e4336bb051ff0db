//! Configuration management

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Result, UcliError};

/// File names tried in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
    "configuration.yaml",
    "configuration.yml",
    "configuration.json",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Base URL every endpoint is appended to
    #[serde(default, deserialize_with = "scalar_string")]
    pub url: Option<String>,

    /// Path to a file holding a bearer token
    #[serde(default, deserialize_with = "scalar_string")]
    pub token: Option<String>,

    /// Basic auth user
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: Option<String>,

    /// Basic auth password
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: Option<String>,

    /// Extra headers sent with every request
    #[serde(default, deserialize_with = "scalar_map")]
    pub headers: Option<BTreeMap<String, String>>,
}

/// Credentials resolved from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Bearer(String),
    Basic { username: String, password: String },
}

impl Config {
    /// Load configuration from `path`, or from the first default file
    /// found in the working directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::find_default(Path::new("."))?,
        };

        let contents = fs::read_to_string(&path).map_err(|source| UcliError::ConfigRead {
            path: path.clone(),
            source,
        })?;

        let config = Self::parse(&contents, &path)?;
        debug!("Configuration loaded from file: {}", path.display());

        Ok(config)
    }

    /// Locate the default configuration file inside `dir`
    pub fn find_default(dir: &Path) -> Result<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| UcliError::ConfigNotFound {
                searched: DEFAULT_CONFIG_FILES.iter().map(|s| s.to_string()).collect(),
            })
    }

    /// Parse configuration text; `.json` files are JSON, everything else YAML
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let parsed = if is_json {
            serde_json::from_str(contents).map_err(|e| e.to_string())
        } else if contents.trim().is_empty() {
            Ok(Self::default())
        } else {
            serde_yaml::from_str(contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| UcliError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Build the full request URL for an endpoint
    pub fn request_url(&self, endpoint: &str) -> Result<Url> {
        let base = non_empty(&self.url).ok_or(UcliError::MissingUrl)?;
        let url = format!("{}{}", base, endpoint);

        Url::parse(&url).map_err(|source| UcliError::InvalidUrl { url, source })
    }

    /// Resolve credentials: a bearer token file wins over basic auth.
    ///
    /// The token file is read on every call; an unreadable file is an error
    /// rather than a silent fallback to unauthenticated requests.
    pub fn authorization(&self) -> Result<Option<Authorization>> {
        if let Some(path) = non_empty(&self.token) {
            let raw = fs::read_to_string(path).map_err(|source| UcliError::TokenFile {
                path: PathBuf::from(path),
                source,
            })?;
            debug!("Set Bearer Token in Authorization header");
            return Ok(Some(Authorization::Bearer(raw.trim().to_string())));
        }

        match (non_empty(&self.username), non_empty(&self.password)) {
            (Some(username), Some(password)) => {
                debug!("Set Basic Auth with username: {}", username);
                Ok(Some(Authorization::Basic {
                    username: username.to_string(),
                    password: password.to_string(),
                }))
            }
            _ => Ok(None),
        }
    }

    /// Insert the configured headers, replacing any header of the same name
    pub fn apply_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        let Some(ref extra) = self.headers else {
            return Ok(());
        };

        for (name, value) in extra {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| UcliError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| UcliError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        debug!("Set additional headers from configuration: {:?}", extra);
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// YAML scalars (numbers, booleans) as their string form
fn scalar_to_string(value: serde_yaml::Value) -> Option<Option<String>> {
    match value {
        serde_yaml::Value::Null => Some(None),
        serde_yaml::Value::String(s) => Some(Some(s)),
        serde_yaml::Value::Number(n) => Some(Some(n.to_string())),
        serde_yaml::Value::Bool(b) => Some(Some(b.to_string())),
        _ => None,
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| de::Error::custom("expected a string"))
}

fn scalar_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_yaml::Value>> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    raw.into_iter()
        .map(|(name, value)| match scalar_to_string(value) {
            Some(value) => Ok((name, value.unwrap_or_default())),
            None => Err(de::Error::custom(format!(
                "header `{}` must be a string",
                name
            ))),
        })
        .collect::<std::result::Result<BTreeMap<String, String>, D::Error>>()
        .map(Some)
}
