use anyhow::{Context, Result};

pub const DEFAULT_AUTH_URL: &str = "https://auth.emsicloud.com/connect/token";
pub const DEFAULT_EXTRACT_URL: &str = "https://emsiservices.com/skills/versions/latest/extract";
pub const DEFAULT_SCOPE: &str = "emsi_open";

/// Application configuration loaded from environment variables.
/// Startup fails if the skills API credentials are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub skills_client_id: String,
    pub skills_client_secret: String,
    pub skills_scope: String,
    pub skills_auth_url: String,
    pub skills_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            skills_client_id: require_env("SKILLS_CLIENT_ID")?,
            skills_client_secret: require_env("SKILLS_CLIENT_SECRET")?,
            skills_scope: env_or("SKILLS_SCOPE", DEFAULT_SCOPE),
            skills_auth_url: env_or("SKILLS_AUTH_URL", DEFAULT_AUTH_URL),
            skills_api_url: env_or("SKILLS_API_URL", DEFAULT_EXTRACT_URL),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_reports_variable_name() {
        let err = require_env("SKILLMATCH_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("SKILLMATCH_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_env_or_falls_back_to_default() {
        assert_eq!(env_or("SKILLMATCH_TEST_ANOTHER_UNSET_VAR", "emsi_open"), "emsi_open");
    }

    #[test]
    fn test_default_endpoints_point_at_emsi() {
        assert!(DEFAULT_AUTH_URL.ends_with("/connect/token"));
        assert!(DEFAULT_EXTRACT_URL.ends_with("/skills/versions/latest/extract"));
    }
}
