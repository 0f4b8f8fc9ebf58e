pub mod pkce {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use sha2::{Digest, Sha256};
    use uuid::Uuid;

    /// 64 unreserved characters, inside the 43..=128 range PKCE allows.
    pub fn generate_verifier() -> String {
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }

    /// S256 code challenge for a verifier.
    pub fn challenge(verifier: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
    }
}

pub mod gotrue {
    use http::header::AUTHORIZATION;
    use log::{info, warn};
    use serde::{Deserialize, Serialize};

    use crate::auth::types::{AuthError, OAuthProvider};
    use crate::config::SupabaseConfig;
    use crate::models::users::{GoTrueUser, SessionUser};

    #[derive(Debug, Deserialize)]
    pub struct TokenResponse {
        pub access_token: String,
        pub expires_in: i64,
        pub refresh_token: Option<String>,
        pub user: Option<GoTrueUser>,
    }

    #[derive(Serialize)]
    struct PkceGrant<'a> {
        auth_code: &'a str,
        code_verifier: &'a str,
    }

    #[derive(Serialize)]
    struct RefreshGrant<'a> {
        refresh_token: &'a str,
    }

    /// Minimal client for Supabase's GoTrue endpoints.
    #[derive(Clone)]
    pub struct GoTrueClient {
        http: reqwest::Client,
        config: SupabaseConfig,
    }

    impl GoTrueClient {
        pub fn new(config: SupabaseConfig) -> Self {
            Self {
                http: reqwest::Client::new(),
                config,
            }
        }

        pub fn config(&self) -> &SupabaseConfig {
            &self.config
        }

        pub fn authorize_url(&self, provider: OAuthProvider, code_challenge: &str) -> String {
            format!(
                "{}/authorize?provider={}&redirect_to={}&code_challenge={}&code_challenge_method=s256",
                self.config.auth_url(),
                provider.as_str(),
                urlencoding::encode(&self.config.callback_url()),
                urlencoding::encode(code_challenge),
            )
        }

        pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenResponse, AuthError> {
            self.token_grant(
                "pkce",
                &PkceGrant {
                    auth_code: code,
                    code_verifier: verifier,
                },
            )
            .await
        }

        /// Trades a refresh token for a fresh access token.
        pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
            self.token_grant("refresh_token", &RefreshGrant { refresh_token }).await
        }

        async fn token_grant<T: Serialize>(&self, grant_type: &str, grant: &T) -> Result<TokenResponse, AuthError> {
            let response = self
                .http
                .post(format!("{}/token?grant_type={}", self.config.auth_url(), grant_type))
                .header("apikey", &self.config.key)
                .json(grant)
                .send()
                .await
                .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(AuthError::TokenExchange(format!("{}: {}", status, body)));
            }

            response
                .json::<TokenResponse>()
                .await
                .map_err(|e| AuthError::TokenExchange(e.to_string()))
        }

        /// `Ok(None)` when the token is expired or rejected.
        pub async fn get_user(&self, access_token: &str) -> Result<Option<SessionUser>, AuthError> {
            let response = self
                .http
                .get(format!("{}/user", self.config.auth_url()))
                .header("apikey", &self.config.key)
                .header(AUTHORIZATION.as_str(), format!("Bearer {}", access_token))
                .send()
                .await
                .map_err(|e| AuthError::ProviderRequest(e.to_string()))?;

            match response.status().as_u16() {
                401 | 403 => {
                    info!("session token rejected by identity provider");
                    Ok(None)
                }
                status if !(200..300).contains(&status) => Err(AuthError::ProviderRequest(format!(
                    "user lookup returned {}",
                    status
                ))),
                _ => {
                    let user = response
                        .json::<GoTrueUser>()
                        .await
                        .map_err(|e| AuthError::ProviderRequest(e.to_string()))?;
                    Ok(Some(user.into()))
                }
            }
        }

        pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
            let response = self
                .http
                .post(format!("{}/logout", self.config.auth_url()))
                .header("apikey", &self.config.key)
                .header(AUTHORIZATION.as_str(), format!("Bearer {}", access_token))
                .send()
                .await
                .map_err(|e| AuthError::ProviderRequest(e.to_string()))?;

            let status = response.status().as_u16();
            // an already-expired session is as good as signed out
            if (200..300).contains(&status) || status == 401 {
                Ok(())
            } else {
                warn!("sign out returned {}", status);
                Err(AuthError::ProviderRequest(format!("sign out returned {}", status)))
            }
        }
    }
}

pub mod cookies {
    use axum_extra::extract::cookie::{Cookie, SameSite};
    use cookie::time;

    use super::gotrue::TokenResponse;
    use crate::auth::types::{AUTH_COOKIE_NAME, PKCE_COOKIE_NAME, REFRESH_COOKIE_NAME};

    const PKCE_COOKIE_MINUTES: i64 = 10;
    const REFRESH_COOKIE_DAYS: i64 = 30;

    // Lax, not Strict: the cookies must survive the redirect back from the provider.
    fn base(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .secure(secure)
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn create_auth_cookie(token: &str, expires_in: i64, secure: bool) -> Cookie<'static> {
        let mut cookie = base(AUTH_COOKIE_NAME, token.to_owned(), secure);
        cookie.set_max_age(time::Duration::seconds(expires_in.max(0)));
        cookie
    }

    pub fn create_refresh_cookie(token: &str, secure: bool) -> Cookie<'static> {
        let mut cookie = base(REFRESH_COOKIE_NAME, token.to_owned(), secure);
        cookie.set_max_age(time::Duration::days(REFRESH_COOKIE_DAYS));
        cookie
    }

    /// Auth cookie plus, when GoTrue issued one, the refresh cookie.
    pub fn session_cookies(token: &TokenResponse, secure: bool) -> Vec<Cookie<'static>> {
        let mut cookies = vec![create_auth_cookie(&token.access_token, token.expires_in, secure)];
        if let Some(refresh) = token.refresh_token.as_deref().filter(|r| !r.is_empty()) {
            cookies.push(create_refresh_cookie(refresh, secure));
        }
        cookies
    }

    pub fn create_pkce_cookie(verifier: &str, secure: bool) -> Cookie<'static> {
        let mut cookie = base(PKCE_COOKIE_NAME, verifier.to_owned(), secure);
        cookie.set_max_age(time::Duration::minutes(PKCE_COOKIE_MINUTES));
        cookie
    }

    pub fn expired(name: &'static str) -> Cookie<'static> {
        let mut cookie = base(name, String::new(), false);
        cookie.set_max_age(time::Duration::ZERO);
        cookie
    }
}

pub mod oauth {
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::Redirect;
    use axum_extra::extract::CookieJar;
    use log::{error, info, warn};
    use serde::Deserialize;

    use super::{cookies, pkce};
    use crate::auth::types::{OAuthProvider, AUTH_COOKIE_NAME, PKCE_COOKIE_NAME};
    use crate::state::AppState;

    #[derive(Debug, Deserialize)]
    pub struct CallbackParams {
        pub code: Option<String>,
        pub error: Option<String>,
        pub error_description: Option<String>,
    }

    /// `GET /auth/:provider`: start the redirect flow.
    #[tracing::instrument(skip_all)]
    pub async fn sign_in(
        Path(provider): Path<String>,
        State(state): State<AppState>,
        jar: CookieJar,
    ) -> Result<(CookieJar, Redirect), (StatusCode, String)> {
        let provider: OAuthProvider = provider
            .parse()
            .map_err(|e: crate::auth::AuthError| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let verifier = pkce::generate_verifier();
        let url = state
            .gotrue
            .authorize_url(provider, &pkce::challenge(&verifier));
        let secure = state.gotrue.config().secure_cookies();

        info!("redirecting to {} sign in", provider.label());
        Ok((
            jar.add(cookies::create_pkce_cookie(&verifier, secure)),
            Redirect::to(&url),
        ))
    }

    /// `GET /auth/callback`: exchange the code and store the session cookie.
    #[tracing::instrument(skip_all)]
    pub async fn callback(
        Query(params): Query<CallbackParams>,
        State(state): State<AppState>,
        jar: CookieJar,
    ) -> (CookieJar, Redirect) {
        let jar_without_verifier = jar.clone().add(cookies::expired(PKCE_COOKIE_NAME));

        if let Some(err) = params.error {
            warn!(
                "sign in was not completed: {} {}",
                err,
                params.error_description.unwrap_or_default()
            );
            return (jar_without_verifier, Redirect::to("/"));
        }

        let (Some(code), Some(verifier)) = (
            params.code,
            jar.get(PKCE_COOKIE_NAME).map(|c| c.value().to_string()),
        ) else {
            warn!("callback without code or verifier cookie");
            return (jar_without_verifier, Redirect::to("/"));
        };

        match state.gotrue.exchange_code(&code, &verifier).await {
            Ok(token) => {
                let secure = state.gotrue.config().secure_cookies();
                let email = token
                    .user
                    .as_ref()
                    .and_then(|u| u.email.clone())
                    .unwrap_or_default();
                info!("signed in {}", email);
                let jar = cookies::session_cookies(&token, secure)
                    .into_iter()
                    .fold(jar_without_verifier, |jar, cookie| jar.add(cookie));
                (jar, Redirect::to("/"))
            }
            Err(e) => {
                error!("{}", e);
                (
                    jar_without_verifier.add(cookies::expired(AUTH_COOKIE_NAME)),
                    Redirect::to("/"),
                )
            }
        }
    }
}

pub mod session {
    use axum_extra::extract::cookie::Cookie;
    use axum_extra::extract::CookieJar;
    use http::header::{HeaderValue, SET_COOKIE};
    use leptos::prelude::use_context;
    use leptos_axum::ResponseOptions;
    use log::{error, info, warn};

    use super::cookies;
    use crate::auth::types::{AuthError, AUTH_COOKIE_NAME, REFRESH_COOKIE_NAME};
    use crate::models::{SessionUser, SessionView};
    use crate::roster::error::RosterError;
    use crate::roster::ops;
    use crate::state::AppState;

    fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
        jar.get(name)
            .map(|c| c.value().to_string())
            .filter(|value| !value.is_empty())
    }

    async fn request_cookies() -> Result<CookieJar, AuthError> {
        leptos_axum::extract()
            .await
            .map_err(|e| AuthError::CookieError(e.to_string()))
    }

    /// Access token from the request cookies, if any.
    pub async fn access_token() -> Result<Option<String>, AuthError> {
        Ok(cookie_value(&request_cookies().await?, AUTH_COOKIE_NAME))
    }

    /// Adds a `Set-Cookie` header to the server function response.
    pub fn set_cookie(cookie: Cookie<'static>) -> Result<(), AuthError> {
        let header =
            HeaderValue::from_str(&cookie.to_string()).map_err(|e| AuthError::CookieError(e.to_string()))?;
        if let Some(response) = use_context::<ResponseOptions>() {
            response.append_header(SET_COOKIE, header);
        }
        Ok(())
    }

    /// Swaps the refresh cookie for a new session and writes the new cookies.
    async fn refresh_user(state: &AppState, refresh_token: &str) -> Result<Option<SessionUser>, AuthError> {
        let token = match state.gotrue.refresh_session(refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                warn!("session refresh rejected: {}", e);
                set_cookie(cookies::expired(REFRESH_COOKIE_NAME))?;
                return Ok(None);
            }
        };

        for cookie in cookies::session_cookies(&token, state.gotrue.config().secure_cookies()) {
            set_cookie(cookie)?;
        }
        info!("session refreshed");
        state.gotrue.get_user(&token.access_token).await
    }

    /// Resolves the caller's user, admin flag and pending flag together.
    pub async fn current_session(state: &AppState) -> Result<SessionView, AuthError> {
        let jar = request_cookies().await?;
        let user = match cookie_value(&jar, AUTH_COOKIE_NAME) {
            Some(token) => state.gotrue.get_user(&token).await?,
            None => None,
        };
        let user = match (user, cookie_value(&jar, REFRESH_COOKIE_NAME)) {
            (Some(user), _) => Some(user),
            (None, Some(refresh_token)) => refresh_user(state, &refresh_token).await?,
            (None, None) => None,
        };
        Ok(ops::resolve_session(state.store.as_ref(), user).await)
    }

    pub async fn require_session(state: &AppState) -> Result<SessionView, RosterError> {
        current_session(state).await.map_err(|e| {
            error!("session lookup failed: {}", e);
            RosterError::from(e)
        })
    }
}
