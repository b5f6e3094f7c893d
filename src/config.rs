//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Path prefix every item route is mounted under.
pub const API_V1_STR: &str = "/api/v1";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Service ===
    /// Human-readable service name, used as the OpenAPI title.
    pub project_name: String,

    // === MongoDB ===
    /// Connection string (`mongodb://` or `mongodb+srv://`).
    pub mongodb_url: String,

    /// Database holding the items collection.
    pub mongodb_database: String,

    /// Collection items are stored in.
    pub mongodb_collection: String,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration from an explicit set of key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.project_name.trim().is_empty() {
            return Err("PROJECT_NAME is required".to_string());
        }

        if self.mongodb_url.is_empty() {
            return Err("MONGODB_URL is required".to_string());
        }

        if !self.mongodb_url.starts_with("mongodb://")
            && !self.mongodb_url.starts_with("mongodb+srv://")
        {
            return Err("MONGODB_URL must start with mongodb:// or mongodb+srv://".to_string());
        }

        if self.mongodb_database.is_empty() {
            return Err("MONGODB_DATABASE is required".to_string());
        }

        if self.mongodb_collection.is_empty() {
            return Err("MONGODB_COLLECTION is required".to_string());
        }

        Ok(())
    }

    /// Connection string with any password replaced, safe to log.
    pub fn redacted_mongodb_url(&self) -> String {
        let Some((scheme, rest)) = self.mongodb_url.split_once("://") else {
            return self.mongodb_url.clone();
        };
        match rest.rsplit_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:****@{host}")
            }
            None => self.mongodb_url.clone(),
        }
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

    fn valid_config() -> Config {
        Config {
            project_name: "items".to_string(),
            mongodb_url: "mongodb://localhost:27017".to_string(),
            mongodb_database: "shop".to_string(),
            mongodb_collection: "items".to_string(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_port(), 8080);
        assert_eq!(default_log_level(), "warn");
    }

    #[test]
    fn loads_required_values_and_applies_defaults() {
        let config = Config::from_vars(vars(&[
            ("PROJECT_NAME", "items"),
            ("MONGODB_URL", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "shop"),
            ("MONGODB_COLLECTION", "items"),
        ]))
        .unwrap();

        assert_eq!(config.project_name, "items");
        assert_eq!(config.mongodb_collection, "items");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_required_value_fails_to_load() {
        let result = Config::from_vars(vars(&[
            ("PROJECT_NAME", "items"),
            ("MONGODB_URL", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "shop"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_empty_project_name() {
        let config = Config {
            project_name: "  ".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_mongodb_url() {
        let config = Config {
            mongodb_url: "postgres://localhost".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn redacts_password_in_url() {
        let config = Config {
            mongodb_url: "mongodb://admin:secret@db:27017/?authSource=admin".to_string(),
            ..valid_config()
        };

        assert_eq!(
            config.redacted_mongodb_url(),
            "mongodb://admin:****@db:27017/?authSource=admin"
        );
        assert_eq!(
            valid_config().redacted_mongodb_url(),
            "mongodb://localhost:27017"
        );
    }
}
