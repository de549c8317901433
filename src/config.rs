use std::env;

/// Settings for the booking API server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Empty disables bearer-token checks.
    pub api_token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "tutorbook.db".to_string()),
            api_token: env::var("API_TOKEN").unwrap_or_default(),
        }
    }
}

/// Where the widget and session buttons send their requests.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; an empty token means none.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::new(
            lookup("TUTORBOOK_API_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
        );
        match lookup("TUTORBOOK_API_TOKEN") {
            Some(token) if !token.is_empty() => config.with_token(token),
            _ => config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_client_url_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(
            config.url("/student/get_available_times"),
            "http://localhost:3000/student/get_available_times"
        );
        assert!(config.api_token.is_none());
        assert_eq!(config.with_token("t").api_token.as_deref(), Some("t"));
    }

    fn lookup<'a>(vars: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_client_from_lookup() {
        let mut vars = HashMap::new();
        vars.insert("TUTORBOOK_API_URL", "http://booking.test/");
        vars.insert("TUTORBOOK_API_TOKEN", "");
        let config = ClientConfig::from_lookup(lookup(&vars));
        assert_eq!(config.base_url, "http://booking.test");
        assert!(config.api_token.is_none());

        vars.insert("TUTORBOOK_API_TOKEN", "abc");
        assert_eq!(
            ClientConfig::from_lookup(lookup(&vars)).api_token.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_client_defaults_without_vars() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.api_token.is_none());
    }
}
