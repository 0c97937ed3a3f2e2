use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup aborts if the store URL or key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            supabase_url: normalize_base_url(&require_env("SUPABASE_URL")?),
            supabase_anon_key: require_env("SUPABASE_ANON_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://demo.supabase.co/"),
            "https://demo.supabase.co"
        );
        assert_eq!(
            normalize_base_url(" https://demo.supabase.co// "),
            "https://demo.supabase.co"
        );
    }

    #[test]
    fn test_require_env_missing_is_error() {
        let err = require_env("WEB_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("WEB_TEST_SURELY_UNSET_VARIABLE"));
    }
}
