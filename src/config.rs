use anyhow::Context;

/// Identity reported when the environment does not name the serving host.
pub const UNKNOWN_HOST: &str = "unknown";

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-process store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Serving-instance identity, sent back in the `X-Pod-host` header.
    pub pod_host: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            pod_host: pod_host_from(std::env::var("HOSTNAME").ok()),
        })
    }
}

/// Falls back to [`UNKNOWN_HOST`] for a missing, blank, or non-header-safe name.
pub fn pod_host_from(raw: Option<String>) -> String {
    raw.map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty() && axum::http::HeaderValue::from_str(h).is_ok())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pod_host_uses_hostname_when_present() {
        assert_eq!(pod_host_from(Some("rooms-7f9c".into())), "rooms-7f9c");
    }

    #[test]
    fn pod_host_defaults_to_unknown() {
        assert_eq!(pod_host_from(None), UNKNOWN_HOST);
        assert_eq!(pod_host_from(Some("   ".into())), UNKNOWN_HOST);
    }

    #[test]
    fn pod_host_rejects_values_that_cannot_be_headers() {
        assert_eq!(pod_host_from(Some("bad\nhost".into())), UNKNOWN_HOST);
    }
}
