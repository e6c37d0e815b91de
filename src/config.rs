use std::env;

use crate::domain::aggregation::NightWindow;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub supabase_url: String,
    pub jwt_secret: Option<String>,
    pub cors_origin: String,
    pub bind_addr: String,
    pub debug_key: String,
    pub night_window: NightWindow,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| "SUPABASE_URL must be set".to_string())?;
        let supabase_url = normalize_project_url(&supabase_url)?;

        // Legacy projects sign access tokens with a shared HS256 secret
        let jwt_secret = env::var("SUPABASE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let debug_key = env::var("DEBUG_KEY").unwrap_or_default();

        let night_window = NightWindow::new(
            parse_hour("NIGHT_WINDOW_START_HOUR", 20)?,
            parse_hour("NIGHT_WINDOW_END_HOUR", 7)?,
        );

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            supabase_url,
            jwt_secret,
            cors_origin,
            bind_addr,
            debug_key,
            night_window,
            run_migrations,
        })
    }

    /// Issuer claim the identity service puts in its access tokens
    pub fn token_issuer(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/auth/v1/.well-known/jwks.json", self.supabase_url)
    }
}

fn normalize_project_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(format!("SUPABASE_URL must be an http(s) URL, got '{}'", raw));
    }
    Ok(trimmed.to_string())
}

fn parse_hour(key: &str, default: u32) -> Result<u32, String> {
    match env::var(key) {
        Ok(value) => {
            let hour: u32 = value
                .trim()
                .parse()
                .map_err(|_| format!("{} must be an hour between 0 and 23", key))?;
            if hour > 23 {
                return Err(format!("{} must be an hour between 0 and 23", key));
            }
            Ok(hour)
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_project_url() {
        assert_eq!(
            normalize_project_url("https://abc.supabase.co/").unwrap(),
            "https://abc.supabase.co"
        );
        assert!(normalize_project_url("abc.supabase.co").is_err());
    }

    #[test]
    fn test_derived_urls() {
        let config = AppConfig {
            database_url: String::new(),
            supabase_url: "https://abc.supabase.co".to_string(),
            jwt_secret: None,
            cors_origin: String::new(),
            bind_addr: String::new(),
            debug_key: String::new(),
            night_window: NightWindow::default(),
            run_migrations: false,
        };

        assert_eq!(config.token_issuer(), "https://abc.supabase.co/auth/v1");
        assert_eq!(
            config.jwks_url(),
            "https://abc.supabase.co/auth/v1/.well-known/jwks.json"
        );
    }
}
