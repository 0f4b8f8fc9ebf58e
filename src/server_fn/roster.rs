use leptos::prelude::*;

use crate::models::{Coach, CoachRequest, Player};

#[server(GetPlayers, "/api")]
pub async fn get_players() -> Result<Vec<Player>, ServerFnError> {
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    ops::list_players(state.store.as_ref())
        .await
        .map_err(to_server_error)
}

#[server(GetCoaches, "/api")]
pub async fn get_coaches() -> Result<Vec<Coach>, ServerFnError> {
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    ops::list_coaches(state.store.as_ref())
        .await
        .map_err(to_server_error)
}

/// Pending requests carry requester emails, so only coaches may list them.
#[server(GetCoachRequests, "/api")]
pub async fn get_coach_requests() -> Result<Vec<CoachRequest>, ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    ops::ensure_admin(&session).map_err(to_server_error)?;

    ops::list_coach_requests(state.store.as_ref())
        .await
        .map_err(to_server_error)
}

#[server(AddPlayer, "/api")]
pub async fn add_player(name: String) -> Result<Player, ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    ops::ensure_admin(&session).map_err(to_server_error)?;

    ops::add_player(state.store.as_ref(), &name)
        .await
        .map_err(to_server_error)
}

#[server(DeletePlayer, "/api")]
pub async fn delete_player(id: i64) -> Result<(), ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    ops::ensure_admin(&session).map_err(to_server_error)?;

    ops::delete_player(state.store.as_ref(), id)
        .await
        .map_err(to_server_error)
}

#[server(RequestAccess, "/api")]
pub async fn request_access() -> Result<CoachRequest, ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    let user = ops::ensure_signed_in(&session).map_err(to_server_error)?;

    ops::request_access(state.store.as_ref(), user)
        .await
        .map_err(|e| {
            log::error!("coach request failed: {}", e);
            to_server_error(e)
        })
}

#[server(ApproveCoach, "/api")]
pub async fn approve_coach(id: i64) -> Result<Coach, ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    ops::ensure_admin(&session).map_err(to_server_error)?;

    ops::approve_coach(state.store.as_ref(), id)
        .await
        .map_err(|e| {
            log::error!("approving coach request {} failed: {}", id, e);
            to_server_error(e)
        })
}

#[server(DenyCoach, "/api")]
pub async fn deny_coach(id: i64) -> Result<(), ServerFnError> {
    use crate::auth::server::session::require_session;
    use crate::roster::{error::to_server_error, ops};
    use crate::state::app_state;

    let state = app_state()?;
    let session = require_session(&state).await.map_err(to_server_error)?;
    ops::ensure_admin(&session).map_err(to_server_error)?;

    ops::deny_coach(state.store.as_ref(), id)
        .await
        .map_err(to_server_error)
}
