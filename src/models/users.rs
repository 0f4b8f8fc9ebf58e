use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub provider: Option<String>,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// Name used on a coach request when the profile carries none.
    pub fn request_name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Coach")
            .to_string()
    }
}

/// Everything the page needs to know about the caller, resolved in one step.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SessionView {
    pub user: Option<SessionUser>,
    pub is_admin: bool,
    pub pending_request: bool,
}

impl SessionView {
    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[cfg(feature = "ssr")]
mod gotrue {
    use super::SessionUser;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    pub struct AppMetadata {
        pub provider: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct UserMetadata {
        pub full_name: Option<String>,
        pub name: Option<String>,
        pub avatar_url: Option<String>,
        pub picture: Option<String>,
    }

    /// User object returned by GoTrue's `/user` and `/token` endpoints.
    #[derive(Debug, Deserialize)]
    pub struct GoTrueUser {
        pub id: String,
        pub email: Option<String>,
        #[serde(default)]
        pub app_metadata: AppMetadata,
        #[serde(default)]
        pub user_metadata: UserMetadata,
    }

    impl From<GoTrueUser> for SessionUser {
        fn from(user: GoTrueUser) -> Self {
            let meta = user.user_metadata;
            SessionUser {
                id: user.id,
                email: user.email.filter(|email| !email.is_empty()),
                display_name: meta.full_name.or(meta.name),
                provider: user.app_metadata.provider,
                avatar_url: meta.avatar_url.or(meta.picture),
            }
        }
    }
}

#[cfg(feature = "ssr")]
pub use gotrue::GoTrueUser;
