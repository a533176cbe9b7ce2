use serde::Deserialize;

/// Client configuration. Read once at startup and handed to the API client.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Port of the API on the page's host, used when `base_url` is unset.
    pub port: u16,
    /// Absolute origin of the API, e.g. `https://api.puls.ci`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    pub reference_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reference_ttl_secs: 300,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImportConfig {
    pub max_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { max_rows: 5000 }
    }
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api/v1"

[cache]
reference_ttl_secs = 300

[import]
max_rows = 5000
"#;

/// localStorage key holding a TOML override, handy against a staging API.
const OVERRIDE_KEY: &str = "puls_config";

impl ClientConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Origin + prefix, without trailing slash.
    ///
    /// `page_origin` is `(protocol, hostname)` of the current page and is
    /// only used when no `base_url` is configured.
    pub fn api_root(&self, page_origin: (&str, &str)) -> String {
        let origin = match self.api.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => format!("{}//{}:{}", page_origin.0, page_origin.1, self.api.port),
        };
        let prefix = self.api.prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            origin
        } else if prefix.starts_with('/') {
            format!("{}{}", origin, prefix)
        } else {
            format!("{}/{}", origin, prefix)
        }
    }
}

/// Load the configuration.
///
/// Search order:
/// 1. TOML override in localStorage
/// 2. Embedded default config
pub fn load_config() -> ClientConfig {
    let override_text = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(OVERRIDE_KEY).ok().flatten());

    if let Some(text) = override_text {
        match ClientConfig::from_toml(&text) {
            Ok(config) => {
                log::info!("Using configuration override from localStorage");
                return config;
            }
            Err(e) => log::warn!("Ignoring invalid configuration override: {}", e),
        }
    }

    log::info!("Using default embedded configuration");
    default_config()
}

/// Configuration provided at the application root.
pub fn use_config() -> ClientConfig {
    leptos::prelude::use_context::<ClientConfig>().unwrap_or_else(default_config)
}

pub fn default_config() -> ClientConfig {
    // DEFAULT_CONFIG is covered by test_default_config_loads
    ClientConfig::from_toml(DEFAULT_CONFIG).unwrap_or_else(|_| ClientConfig {
        api: ApiConfig {
            port: 3000,
            base_url: None,
            prefix: default_prefix(),
        },
        cache: CacheConfig::default(),
        import: ImportConfig::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<ClientConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.prefix, "/api/v1");
        assert_eq!(config.cache.reference_ttl_secs, 300);
        assert_eq!(config.import.max_rows, 5000);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = ClientConfig::from_toml("[api]\nport = 8080\n").unwrap();
        assert_eq!(config.api.prefix, "/api/v1");
        assert_eq!(config.import, ImportConfig::default());
    }

    #[test]
    fn api_root_prefers_base_url() {
        let mut config = default_config();
        assert_eq!(
            config.api_root(("http:", "localhost")),
            "http://localhost:3000/api/v1"
        );

        config.api.base_url = Some("https://api.puls.ci/".into());
        config.api.prefix = "v2/".into();
        assert_eq!(config.api_root(("http:", "localhost")), "https://api.puls.ci/v2");
    }
}
