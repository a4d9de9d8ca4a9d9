use dotenv::dotenv;
use std::env;

use crate::utils::AppError;

const DEFAULT_DB_NAME: &str = "doctor_booking";
const DEFAULT_MEDIA_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Media host settings; uploads are refused while these are missing
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
    pub mongo_db: String,
    pub jwt_secret: String,
    pub client_url: String,
    pub media: MediaConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Configuration(format!("{} must be set", key)))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Configuration(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => 5000,
        };

        let mongo_url = required("MONGO_URL")?;
        let mongo_db = lookup("MONGO_DB")
            .filter(|v| !v.is_empty())
            .or_else(|| database_name_from_uri(&mongo_url))
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongo_url,
            mongo_db,
            jwt_secret: required("JWT_SECRET_KEY")?,
            client_url: lookup("CLIENT_URL").unwrap_or_else(|| "http://localhost:5173".to_string()),
            media: MediaConfig {
                cloud_name: lookup("CLOUDINARY_CLOUD_NAME").filter(|v| !v.is_empty()),
                upload_preset: lookup("CLOUDINARY_UPLOAD_PRESET").filter(|v| !v.is_empty()),
                api_base: lookup("CLOUDINARY_API_BASE")
                    .unwrap_or_else(|| DEFAULT_MEDIA_API_BASE.to_string()),
            },
        })
    }
}

/// `mongodb://host:27017/clinic?retryWrites=true` -> `clinic`
fn database_name_from_uri(uri: &str) -> Option<String> {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    let (_, path) = without_scheme.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("JWT_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.mongo_db, "doctor_booking");
        assert_eq!(config.media.api_base, "https://api.cloudinary.com/v1_1");
        assert!(config.media.cloud_name.is_none());
    }

    #[test]
    fn test_database_name_from_uri() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb+srv://u:p@cluster0.example.net/clinic?retryWrites=true"),
            ("JWT_SECRET_KEY", "secret"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.mongo_db, "clinic");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_secret_fails() {
        let result =
            Config::from_lookup(lookup_from(&[("MONGO_URL", "mongodb://localhost:27017")]));
        assert!(
            matches!(result, Err(AppError::Configuration(msg)) if msg.contains("JWT_SECRET_KEY"))
        );
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("JWT_SECRET_KEY", "secret"),
            ("PORT", "http"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
