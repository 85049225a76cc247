//! Configuration access port.

/// Read-only access to sectioned `key = value` settings.
///
/// Typed getters fall back to `default` when the key is missing or does not
/// parse; use the `get_optional_*` getters when a value that does not
/// parse must be told apart from a missing one.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    fn get_optional_double(&self, section: &str, key: &str) -> Option<f64> {
        self.get_string(section, key)
            .and_then(|v| v.trim().parse::<f64>().ok())
    }

    fn get_optional_int(&self, section: &str, key: &str) -> Option<i64> {
        self.get_string(section, key)
            .and_then(|v| v.trim().parse::<i64>().ok())
    }

    fn get_optional_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.get_string(section, key)
            .and_then(|v| v.trim().to_ascii_lowercase().parse::<bool>().ok())
    }

    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_string(section, key)
            .is_some_and(|v| !v.trim().is_empty())
    }
}
