use std::time::Duration;

use crate::ApiError;

pub const DEFAULT_API_URL: &str = "https://greedible-backend.vercel.app";
pub const DEFAULT_STAFF_API_URL: &str = "https://greedible-backend-staff.vercel.app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which of the two backends an endpoint lives on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Orders, analytics, schedules, staff administration, restock history.
    Main,
    /// Login, profile, ingredient and recipe writes, suppliers.
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub staff_api_base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            staff_api_base_url: DEFAULT_STAFF_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Point both backends at the same server (handy for a local or mock
    /// backend).
    pub fn single(base_url: impl Into<String>) -> Self {
        let base = trim(base_url.into());
        Self {
            api_base_url: base.clone(),
            staff_api_base_url: base,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `GREEDIBLE_API_URL`, `GREEDIBLE_STAFF_API_URL` and
    /// `GREEDIBLE_HTTP_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("GREEDIBLE_API_URL")) {
            config.api_base_url = validate_url("GREEDIBLE_API_URL", url)?;
        }
        if let Some(url) = non_empty(lookup("GREEDIBLE_STAFF_API_URL")) {
            config.staff_api_base_url = validate_url("GREEDIBLE_STAFF_API_URL", url)?;
        }
        if let Some(raw) = non_empty(lookup("GREEDIBLE_HTTP_TIMEOUT_SECS")) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!(
                    "GREEDIBLE_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(
                    "GREEDIBLE_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn base_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Main => &self.api_base_url,
            Backend::Staff => &self.staff_api_base_url,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trim(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn validate_url(key: &str, url: String) -> Result<String, ApiError> {
    let url = trim(url);
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ApiError::Config(format!(
            "{key} must be an http(s) URL, got '{url}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url(Backend::Staff), DEFAULT_STAFF_API_URL);
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GREEDIBLE_API_URL", "http://localhost:4000/"),
            ("GREEDIBLE_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.staff_api_base_url, DEFAULT_STAFF_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = ClientConfig::from_lookup(lookup(&[("GREEDIBLE_HTTP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[("GREEDIBLE_API_URL", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
