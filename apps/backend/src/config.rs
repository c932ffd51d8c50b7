//! Runtime configuration from environment variables.

use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
/// Upload limit for `/convert`; DOCX files with images exceed axum's 2 MiB default.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Read settings from the environment.
    ///
    /// Env vars (all optional):
    /// - HOST: bind address
    /// - PORT: listening port
    /// - MAX_UPLOAD_BYTES: request body limit for uploads
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_or_default("PORT", std::env::var("PORT").ok(), DEFAULT_PORT),
            max_upload_bytes: parse_or_default(
                "MAX_UPLOAD_BYTES",
                std::env::var("MAX_UPLOAD_BYTES").ok(),
                DEFAULT_MAX_UPLOAD_BYTES,
            ),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_valid_value() {
        assert_eq!(parse_or_default("PORT", Some(" 8080 ".to_string()), 3000u16), 8080);
    }

    #[test]
    fn test_parse_missing_value() {
        assert_eq!(parse_or_default("PORT", None, 3000u16), 3000);
    }

    #[test]
    fn test_parse_invalid_value_falls_back() {
        assert_eq!(parse_or_default("PORT", Some("abc".to_string()), 3000u16), 3000);
        assert_eq!(parse_or_default("PORT", Some("70000".to_string()), 3000u16), 3000);
    }
}
