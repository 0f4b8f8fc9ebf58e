use leptos::prelude::*;

use crate::models::SessionView;

/// Current user with the admin and pending-request flags resolved alongside.
#[server(GetSession, "/api")]
pub async fn get_session() -> Result<SessionView, ServerFnError> {
    use super::server::session::current_session;
    use super::types::to_server_error;
    use crate::state::app_state;

    let state = app_state()?;
    current_session(&state).await.map_err(|e| {
        log::error!("failed to resolve session: {}", e);
        to_server_error(e)
    })
}

/// Ends the session with the identity provider. The session cookies are
/// cleared even when the provider call fails.
#[server(Logout, "/api")]
pub async fn logout() -> Result<(), ServerFnError> {
    use super::server::{
        cookies,
        session::{access_token, set_cookie},
    };
    use super::types::{to_server_error, AUTH_COOKIE_NAME, REFRESH_COOKIE_NAME};
    use crate::state::app_state;

    let state = app_state()?;
    let token = access_token().await.map_err(to_server_error)?;

    for name in [AUTH_COOKIE_NAME, REFRESH_COOKIE_NAME] {
        set_cookie(cookies::expired(name)).map_err(to_server_error)?;
    }

    match token {
        Some(token) => state.gotrue.sign_out(&token).await.map_err(|e| {
            log::error!("sign out failed: {}", e);
            to_server_error(e)
        }),
        None => Ok(()),
    }
}
