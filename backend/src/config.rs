use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_STUB_DELAY_MS: u64 = 1500;
pub const DEFAULT_CLASSIFY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid inference endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("Remote classifier selected but INFERENCE_URL is not set")]
    MissingEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    Stub,
    Remote,
}

impl FromStr for ClassifierKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(ClassifierKind::Stub),
            "remote" => Ok(ClassifierKind::Remote),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    pub stub_delay_ms: u64,
    pub inference_url: Option<String>,
    pub inference_timeout_secs: u64,
    pub classify_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::Stub,
            stub_delay_ms: DEFAULT_STUB_DELAY_MS,
            inference_url: None,
            inference_timeout_secs: DEFAULT_INFERENCE_TIMEOUT_SECS,
            classify_timeout_secs: DEFAULT_CLASSIFY_TIMEOUT_SECS,
        }
    }
}

impl ClassifierConfig {
    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_secs(self.classify_timeout_secs)
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn inference_endpoint(&self) -> Result<Url, ConfigError> {
        let endpoint = self
            .inference_url
            .as_deref()
            .ok_or(ConfigError::MissingEndpoint)?;
        Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub classifier: ClassifierConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            frontend_dir: default_frontend_dir(),
            max_upload_bytes: shared::validation::MAX_IMAGE_BYTES,
            classifier: ClassifierConfig::default(),
        }
    }
}

fn default_frontend_dir() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        PathBuf::from(format!("{}/../frontend/dist", manifest_dir))
    } else {
        PathBuf::from("/usr/src/app/frontend/dist")
    }
}

fn parse_override<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

impl AppConfig {
    /// Defaults, then the YAML file named by `APP_CONFIG`, then environment
    /// variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("APP_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = parse_override("PORT", port)?;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = parse_override("MAX_UPLOAD_BYTES", limit)?;
        }
        if let Some(kind) = lookup("CLASSIFIER") {
            self.classifier.kind = parse_override("CLASSIFIER", kind)?;
        }
        if let Some(delay) = lookup("STUB_DELAY_MS") {
            self.classifier.stub_delay_ms = parse_override("STUB_DELAY_MS", delay)?;
        }
        if let Some(url) = lookup("INFERENCE_URL") {
            self.classifier.inference_url = Some(url);
        }
        if let Some(secs) = lookup("INFERENCE_TIMEOUT_SECS") {
            self.classifier.inference_timeout_secs = parse_override("INFERENCE_TIMEOUT_SECS", secs)?;
        }
        if let Some(secs) = lookup("CLASSIFY_TIMEOUT_SECS") {
            self.classifier.classify_timeout_secs = parse_override("CLASSIFY_TIMEOUT_SECS", secs)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.kind == ClassifierKind::Remote {
            self.classifier.inference_endpoint()?;
        }
        if self.classifier.classify_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CLASSIFY_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
