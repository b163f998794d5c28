use super::types::{Config, ConfigError};
use crate::core::tasks::types::Identifier;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks4", "socks5"];

impl Config {
    /// Default location: `~/.collector-check/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(home.join(".collector-check").join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`; a missing file yields the default configuration
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the default configuration unless a file already exists
    pub fn init() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        Self::init_at(&path)?;
        Ok(path)
    }

    /// Returns whether a new file was written
    pub fn init_at(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }

    /// Validate proxy URL, region codes and forced task identifiers
    pub fn check(&self) -> Result<(), ConfigError> {
        if let Some(proxy) = self.proxy_url.as_deref().filter(|p| !p.trim().is_empty()) {
            let url = Url::parse(proxy.trim())
                .map_err(|e| ConfigError::Invalid(format!("proxy_url {:?}: {}", proxy, e)))?;
            if !PROXY_SCHEMES.contains(&url.scheme()) {
                return Err(ConfigError::Invalid(format!(
                    "proxy_url scheme '{}' is not one of {}",
                    url.scheme(),
                    PROXY_SCHEMES.join(", ")
                )));
            }
        }

        let region_code = Regex::new(r"^[a-z]{2}[0-9]{2}$")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        for region in &self.regions {
            if !region_code.is_match(&region.trim().to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "region {:?} is not a region code like \"eu01\"",
                    region
                )));
            }
        }

        self.forced_identifiers()?;
        Ok(())
    }

    pub fn forced_identifiers(&self) -> Result<Vec<Identifier>, ConfigError> {
        self.forced_tasks
            .iter()
            .map(|task| {
                task.parse::<Identifier>()
                    .map_err(|e| ConfigError::Invalid(format!("forced_tasks: {}", e)))
            })
            .collect()
    }

    /// Split forced tasks into parsed identifiers and the entries that failed
    ///
    /// Used for a run, where a bad entry is reported and skipped instead of
    /// aborting every check.
    pub fn partition_forced_tasks(&self) -> (Vec<Identifier>, Vec<ConfigError>) {
        let mut identifiers = Vec::new();
        let mut rejected = Vec::new();
        for task in &self.forced_tasks {
            match task.parse::<Identifier>() {
                Ok(id) => identifiers.push(id),
                Err(e) => rejected.push(ConfigError::Invalid(format!("forced_tasks: {}", e))),
            }
        }
        (identifiers, rejected)
    }
}
