use std::fmt;
use std::str::FromStr;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

pub const AUTH_COOKIE_NAME: &str = "lineup_auth";
pub const PKCE_COOKIE_NAME: &str = "lineup_pkce";
pub const REFRESH_COOKIE_NAME: &str = "lineup_refresh";

/// OAuth providers enabled on the Supabase project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Apple => "Apple",
        }
    }

    /// Server route that starts the redirect flow for this provider.
    pub fn sign_in_path(&self) -> String {
        format!("/auth/{}", self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "apple" => Ok(OAuthProvider::Apple),
            other => Err(AuthError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingEnvironmentVar(String),
    UnsupportedProvider(String),
    TokenExchange(String),
    ProviderRequest(String),
    CookieError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingEnvironmentVar(var) => write!(f, "Missing environment variable: {}", var),
            AuthError::UnsupportedProvider(p) => write!(f, "Unsupported sign-in provider: {}", p),
            AuthError::TokenExchange(e) => write!(f, "Failed to exchange auth code: {}", e),
            AuthError::ProviderRequest(e) => write!(f, "Identity provider request failed: {}", e),
            AuthError::CookieError(e) => write!(f, "Cookie error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

pub fn to_server_error(e: AuthError) -> ServerFnError {
    ServerFnError::ServerError(e.to_string())
}
