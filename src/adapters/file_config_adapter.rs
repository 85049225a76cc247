//! INI file configuration adapter.

use crate::domain::error::MortgageError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MortgageError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| MortgageError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, MortgageError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| MortgageError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get_optional_int(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.get_optional_double(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.get_optional_bool(section, key).unwrap_or(default)
    }

    fn get_optional_double(&self, section: &str, key: &str) -> Option<f64> {
        self.config.getfloat(section, key).ok().flatten()
    }

    fn get_optional_int(&self, section: &str, key: &str) -> Option<i64> {
        self.config.getint(section, key).ok().flatten()
    }

    fn get_optional_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
    }
}
