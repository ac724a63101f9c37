use serde::Deserialize;

/// Deployment environment, selects log format and CORS defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Service configuration read from environment variables.
///
/// Field names map to upper-case variables (`DATABASE_URL`, `PORT`, ...).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, rename = "environment")]
    pub env: Environment,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Comma separated list of origins
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let config: ApiConfig =
            envy::from_iter(vars(&[("DATABASE_URL", "postgres://localhost/vocab")])).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/vocab");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.db_max_connections, 10);
        assert!(config.parsed_allowed_origins().is_empty());
    }

    #[test]
    fn test_config_overrides() {
        let config: ApiConfig = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://db/vocab"),
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("DB_MAX_CONNECTIONS", "25"),
            (
                "ALLOWED_ORIGINS",
                "https://vocab.example.com, http://localhost:5173,",
            ),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.env.is_production());
        assert_eq!(config.db_max_connections, 25);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["https://vocab.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        assert!(envy::from_iter::<_, ApiConfig>(vars(&[("PORT", "8080")])).is_err());
    }
}
