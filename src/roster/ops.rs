use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::RosterError;
use super::store::{Relation, RosterStore};
use crate::models::{
    Coach, CoachRequest, NewCoach, NewCoachRequest, NewPlayer, Player, SessionUser, SessionView,
};

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, RosterError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(RosterError::from))
        .collect()
}

fn decode_row<T: DeserializeOwned>(row: Value) -> Result<T, RosterError> {
    Ok(serde_json::from_value(row)?)
}

fn encode_row<T: Serialize>(row: &T) -> Result<Value, RosterError> {
    Ok(serde_json::to_value(row)?)
}

pub async fn list_players<S: RosterStore + ?Sized>(store: &S) -> Result<Vec<Player>, RosterError> {
    decode_rows(store.query_all(Relation::Players).await?)
}

pub async fn list_coaches<S: RosterStore + ?Sized>(store: &S) -> Result<Vec<Coach>, RosterError> {
    decode_rows(store.query_all(Relation::Coaches).await?)
}

pub async fn list_coach_requests<S: RosterStore + ?Sized>(
    store: &S,
) -> Result<Vec<CoachRequest>, RosterError> {
    decode_rows(store.query_all(Relation::CoachRequests).await?)
}

/// Exactly one coach row with this email makes the user an admin.
/// Lookup failures count as "not admin".
pub async fn is_admin<S: RosterStore + ?Sized>(store: &S, email: &str) -> bool {
    match store.query_one_by_field(Relation::Coaches, "email", email).await {
        Ok(row) => row.is_some(),
        Err(e) => {
            warn!("admin lookup for {} failed: {}", email, e);
            false
        }
    }
}

pub async fn has_pending_request<S: RosterStore + ?Sized>(store: &S, email: &str) -> bool {
    match store.query_by_field(Relation::CoachRequests, "email", email).await {
        Ok(rows) => !rows.is_empty(),
        Err(e) => {
            warn!("pending request lookup for {} failed: {}", email, e);
            false
        }
    }
}

/// Sets the user together with the flags derived from it.
pub async fn resolve_session<S: RosterStore + ?Sized>(
    store: &S,
    user: Option<SessionUser>,
) -> SessionView {
    let Some(user) = user else {
        return SessionView::signed_out();
    };

    let (is_admin, pending_request) = match user.email.as_deref() {
        Some(email) => {
            let admin = is_admin(store, email).await;
            let pending = !admin && has_pending_request(store, email).await;
            (admin, pending)
        }
        None => (false, false),
    };

    SessionView {
        user: Some(user),
        is_admin,
        pending_request,
    }
}

pub fn ensure_signed_in(session: &SessionView) -> Result<&SessionUser, RosterError> {
    session.user.as_ref().ok_or(RosterError::NotSignedIn)
}

pub fn ensure_admin(session: &SessionView) -> Result<&SessionUser, RosterError> {
    let user = ensure_signed_in(session)?;
    if session.is_admin {
        Ok(user)
    } else {
        Err(RosterError::Forbidden)
    }
}

pub async fn add_player<S: RosterStore + ?Sized>(store: &S, name: &str) -> Result<Player, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyName);
    }

    let row = encode_row(&NewPlayer { name: name.to_string() })?;
    let player: Player = decode_row(store.insert(Relation::Players, row).await?)?;
    info!("added player {} ({})", player.name, player.id);
    Ok(player)
}

pub async fn delete_player<S: RosterStore + ?Sized>(store: &S, id: i64) -> Result<(), RosterError> {
    let removed = store
        .delete_by_field(Relation::Players, "id", &id.to_string())
        .await?;
    if removed == 0 {
        return Err(RosterError::NotFound { relation: Relation::Players, id });
    }
    info!("deleted player {}", id);
    Ok(())
}

/// Files a coach request for the user. A request already on file for the
/// same email is returned instead of inserting a second one.
pub async fn request_access<S: RosterStore + ?Sized>(
    store: &S,
    user: &SessionUser,
) -> Result<CoachRequest, RosterError> {
    let email = user.email.as_deref().ok_or(RosterError::MissingEmail)?;

    if store
        .query_one_by_field(Relation::Coaches, "email", email)
        .await?
        .is_some()
    {
        return Err(RosterError::AlreadyCoach);
    }

    if let Some(existing) = store
        .query_by_field(Relation::CoachRequests, "email", email)
        .await?
        .into_iter()
        .next()
    {
        return decode_row(existing);
    }

    let row = encode_row(&NewCoachRequest {
        name: user.request_name(),
        email: email.to_string(),
    })?;
    let request: CoachRequest = decode_row(store.insert(Relation::CoachRequests, row).await?)?;
    info!("coach request {} filed for {}", request.id, request.email);
    Ok(request)
}

/// Promotes a request to a coach and removes the request.
///
/// The coach insert is skipped when a coach with the same email exists, so a
/// retry after a failed delete never produces a duplicate coach.
pub async fn approve_coach<S: RosterStore + ?Sized>(
    store: &S,
    request_id: i64,
) -> Result<Coach, RosterError> {
    let id = request_id.to_string();
    let request: CoachRequest = match store
        .query_one_by_field(Relation::CoachRequests, "id", &id)
        .await?
    {
        Some(row) => decode_row(row)?,
        None => {
            return Err(RosterError::NotFound {
                relation: Relation::CoachRequests,
                id: request_id,
            })
        }
    };

    let coach: Coach = match store
        .query_by_field(Relation::Coaches, "email", &request.email)
        .await?
        .into_iter()
        .next()
    {
        Some(existing) => {
            warn!("{} is already a coach, skipping insert", request.email);
            decode_row(existing)?
        }
        None => {
            let row = encode_row(&NewCoach::from(&request))?;
            decode_row(store.insert(Relation::Coaches, row).await?)?
        }
    };

    store
        .delete_by_field(Relation::CoachRequests, "id", &id)
        .await?;

    info!("approved coach request {} for {}", request_id, coach.email);
    Ok(coach)
}

pub async fn deny_coach<S: RosterStore + ?Sized>(store: &S, request_id: i64) -> Result<(), RosterError> {
    let removed = store
        .delete_by_field(Relation::CoachRequests, "id", &request_id.to_string())
        .await?;
    if removed == 0 {
        warn!("deny: coach request {} was already gone", request_id);
    } else {
        info!("denied coach request {}", request_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::memory::{FailOn, MemoryStore};
    use serde_json::json;

    fn user(email: Option<&str>, name: Option<&str>) -> SessionUser {
        SessionUser {
            id: "user-1".to_string(),
            email: email.map(str::to_string),
            display_name: name.map(str::to_string),
            provider: Some("google".to_string()),
            avatar_url: None,
        }
    }

    async fn seed_request(store: &MemoryStore, name: &str, email: &str) -> i64 {
        let row = store
            .insert(Relation::CoachRequests, json!({ "name": name, "email": email }))
            .await
            .unwrap();
        row["id"].as_i64().unwrap()
    }

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_user_without_coach_row_is_not_admin() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Zed", "email": "zed@x.com" })).await.unwrap();

            let session = resolve_session(&store, Some(user(Some("amy@x.com"), None))).await;

            assert!(session.user.is_some());
            assert!(!session.is_admin);
        }

        #[tokio::test]
        async fn test_user_with_one_coach_row_is_admin() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Amy", "email": "amy@x.com" })).await.unwrap();

            let session = resolve_session(&store, Some(user(Some("amy@x.com"), None))).await;

            assert!(session.is_admin);
            assert!(!session.pending_request);
        }

        #[tokio::test]
        async fn test_duplicate_coach_rows_are_not_admin() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Amy", "email": "amy@x.com" })).await.unwrap();
            store.insert(Relation::Coaches, json!({ "name": "Amy P", "email": "amy@x.com" })).await.unwrap();

            assert!(!is_admin(&store, "amy@x.com").await);
        }

        #[tokio::test]
        async fn test_lookup_failure_is_not_admin() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Amy", "email": "amy@x.com" })).await.unwrap();
            store.fail_next(FailOn::Read, "timeout").await;

            assert!(!is_admin(&store, "amy@x.com").await);
        }

        #[tokio::test]
        async fn test_pending_request_is_derived_from_store() {
            let store = MemoryStore::new();
            seed_request(&store, "Amy", "amy@x.com").await;

            let session = resolve_session(&store, Some(user(Some("amy@x.com"), None))).await;

            assert!(session.pending_request);
            assert!(!session.is_admin);
        }

        #[tokio::test]
        async fn test_no_user_resolves_signed_out() {
            let store = MemoryStore::new();
            assert_eq!(resolve_session(&store, None).await, SessionView::signed_out());
        }

        #[test]
        fn test_admin_gate() {
            let signed_out = SessionView::signed_out();
            assert!(matches!(ensure_admin(&signed_out), Err(RosterError::NotSignedIn)));

            let member = SessionView {
                user: Some(user(Some("amy@x.com"), None)),
                is_admin: false,
                pending_request: false,
            };
            assert!(matches!(ensure_admin(&member), Err(RosterError::Forbidden)));

            let admin = SessionView { is_admin: true, ..member };
            assert!(ensure_admin(&admin).is_ok());
        }
    }

    mod player_tests {
        use super::*;

        #[tokio::test]
        async fn test_add_player_appears_with_new_id() {
            let store = MemoryStore::new();
            add_player(&store, "Sam").await.unwrap();
            let before = list_players(&store).await.unwrap();

            let added = add_player(&store, "Alice").await.unwrap();
            let after = list_players(&store).await.unwrap();

            let named_alice: Vec<_> = after.iter().filter(|p| p.name == "Alice").collect();
            assert_eq!(named_alice.len(), 1);
            assert_eq!(after.len(), before.len() + 1);
            assert!(before.iter().all(|p| p.id != added.id));
        }

        #[tokio::test]
        async fn test_add_player_rejects_blank_name() {
            let store = MemoryStore::new();

            assert!(matches!(add_player(&store, "   ").await, Err(RosterError::EmptyName)));
            assert!(store.rows(Relation::Players).await.is_empty());
        }

        #[tokio::test]
        async fn test_delete_player_removes_only_that_row() {
            let store = MemoryStore::new();
            let keep = add_player(&store, "Sam").await.unwrap();
            let gone = add_player(&store, "Alice").await.unwrap();

            delete_player(&store, gone.id).await.unwrap();
            let players = list_players(&store).await.unwrap();

            assert_eq!(players, vec![keep]);
        }

        #[tokio::test]
        async fn test_delete_missing_player_reports_not_found() {
            let store = MemoryStore::new();
            assert!(matches!(
                delete_player(&store, 42).await,
                Err(RosterError::NotFound { relation: Relation::Players, id: 42 })
            ));
        }

        #[tokio::test]
        async fn test_fetch_is_idempotent() {
            let store = MemoryStore::new();
            for name in ["Alice", "Sam", "Kim"] {
                add_player(&store, name).await.unwrap();
            }

            let first = list_players(&store).await.unwrap();
            let second = list_players(&store).await.unwrap();

            assert_eq!(first, second);
        }

        #[tokio::test]
        async fn test_read_failure_is_reported() {
            let store = MemoryStore::new();
            store.fail_next(FailOn::Read, "permission denied for table players").await;

            let result = list_players(&store).await;
            assert!(matches!(result, Err(RosterError::Backend(m)) if m.contains("permission denied")));
        }
    }

    mod coach_tests {
        use super::*;

        #[tokio::test]
        async fn test_approve_moves_request_to_coaches() {
            let store = MemoryStore::new();
            let request_id = seed_request(&store, "Bob", "bob@x.com").await;

            let coach = approve_coach(&store, request_id).await.unwrap();

            assert_eq!((coach.name.as_str(), coach.email.as_str()), ("Bob", "bob@x.com"));
            let coaches = list_coaches(&store).await.unwrap();
            assert!(coaches.iter().any(|c| c.name == "Bob" && c.email == "bob@x.com"));
            let requests = list_coach_requests(&store).await.unwrap();
            assert!(requests.iter().all(|r| r.id != request_id));
        }

        #[tokio::test]
        async fn test_approve_retry_does_not_duplicate_coach() {
            let store = MemoryStore::new();
            let request_id = seed_request(&store, "Bob", "bob@x.com").await;
            store.fail_next(FailOn::Delete, "network error").await;

            assert!(approve_coach(&store, request_id).await.is_err());
            approve_coach(&store, request_id).await.unwrap();

            assert_eq!(list_coaches(&store).await.unwrap().len(), 1);
            assert!(list_coach_requests(&store).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_approve_unknown_request() {
            let store = MemoryStore::new();
            assert!(matches!(
                approve_coach(&store, 9).await,
                Err(RosterError::NotFound { relation: Relation::CoachRequests, id: 9 })
            ));
            assert!(list_coaches(&store).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_deny_leaves_coaches_unchanged() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Amy", "email": "amy@x.com" })).await.unwrap();
            let request_id = seed_request(&store, "Bob", "bob@x.com").await;
            let coaches_before = list_coaches(&store).await.unwrap();

            deny_coach(&store, request_id).await.unwrap();

            assert!(list_coach_requests(&store).await.unwrap().is_empty());
            assert_eq!(list_coaches(&store).await.unwrap(), coaches_before);
        }
    }

    mod request_tests {
        use super::*;

        #[tokio::test]
        async fn test_request_uses_profile_name_or_fallback() {
            let store = MemoryStore::new();

            let named = request_access(&store, &user(Some("amy@x.com"), Some("Amy Pond"))).await.unwrap();
            let unnamed = request_access(&store, &user(Some("kim@x.com"), None)).await.unwrap();

            assert_eq!(named.name, "Amy Pond");
            assert_eq!(unnamed.name, "Coach");
        }

        #[tokio::test]
        async fn test_repeat_request_returns_existing_row() {
            let store = MemoryStore::new();
            let amy = user(Some("amy@x.com"), Some("Amy"));

            let first = request_access(&store, &amy).await.unwrap();
            let second = request_access(&store, &amy).await.unwrap();

            assert_eq!(first.id, second.id);
            assert_eq!(store.rows(Relation::CoachRequests).await.len(), 1);
        }

        #[tokio::test]
        async fn test_insert_failure_surfaces_backend_message() {
            let store = MemoryStore::new();
            store.fail_next(FailOn::Insert, "new row violates row-level security policy").await;

            let result = request_access(&store, &user(Some("amy@x.com"), None)).await;

            match result {
                Err(e) => assert_eq!(e.to_string(), "new row violates row-level security policy"),
                Ok(_) => panic!("insert failure should propagate"),
            }
        }

        #[tokio::test]
        async fn test_coach_cannot_request_again() {
            let store = MemoryStore::new();
            store.insert(Relation::Coaches, json!({ "name": "Amy", "email": "amy@x.com" })).await.unwrap();

            let result = request_access(&store, &user(Some("amy@x.com"), None)).await;
            assert!(matches!(result, Err(RosterError::AlreadyCoach)));
        }

        #[tokio::test]
        async fn test_user_without_email_cannot_request() {
            let store = MemoryStore::new();

            let result = request_access(&store, &user(None, Some("Anon"))).await;

            assert!(matches!(result, Err(RosterError::MissingEmail)));
            assert!(store.rows(Relation::CoachRequests).await.is_empty());
        }
    }
}
