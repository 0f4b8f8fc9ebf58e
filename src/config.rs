use crate::auth::AuthError;
use std::env;

pub const DEFAULT_SITE_URL: &str = "http://127.0.0.1:3000";

/// Connection settings for the hosted Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    /// Public origin of this app, used to build the OAuth callback.
    pub site_url: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, AuthError> {
        let url = required_var("SUPABASE_URL")?;
        let key = required_var("SUPABASE_KEY")?;
        let site_url = env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
            site_url: site_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.site_url)
    }

    /// Cookies are only marked secure when the site itself is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }
}

fn required_var(name: &str) -> Result<String, AuthError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AuthError::MissingEnvironmentVar(name.to_string()))
}
