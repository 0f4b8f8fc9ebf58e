use leptos::{prelude::*, task::spawn_local};

use crate::auth::context::{provide_auth_context, AuthContext};
use crate::auth::{SignInButtons, SignOutButton};
use crate::components::roster_lists::{AccessRequest, CoachList, PendingRequests, PlayerList};
use crate::components::user_avatar::UserAvatar;
use crate::models::{SessionUser, SessionView};
use crate::roster::{RosterEvent, RosterState};
use crate::server_fn::roster as api;

/// Raw message of a server function error, without the transport prefix.
pub fn error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

fn prompt_player_name() -> Option<String> {
    window()
        .prompt_with_message("Player name:")
        .ok()
        .flatten()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn alert(message: &str) {
    if window().alert_with_message(message).is_err() {
        log::warn!("could not show alert: {}", message);
    }
}

/// Owns the page state and runs one handler per user action.
#[derive(Clone, Copy)]
pub struct LineupController {
    pub state: RwSignal<RosterState>,
}

impl LineupController {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(RosterState::default()),
        }
    }

    /// Applies `event` unless the view was torn down while a call was in flight.
    pub fn dispatch(self, event: RosterEvent) {
        if self.state.try_update(move |state| state.apply(event)).is_none() {
            log::debug!("lineup view is gone, dropping update");
        }
    }

    fn report(self, action: &str, error: ServerFnError) {
        let message = error_message(&error);
        log::error!("{} failed: {}", action, message);
        self.dispatch(RosterEvent::Failed(format!("Could not {}: {}", action, message)));
    }

    async fn load_players(self) {
        match api::get_players().await {
            Ok(players) => self.dispatch(RosterEvent::PlayersLoaded(players)),
            Err(e) => self.report("load players", e),
        }
    }

    async fn load_coaches(self) {
        match api::get_coaches().await {
            Ok(coaches) => self.dispatch(RosterEvent::CoachesLoaded(coaches)),
            Err(e) => self.report("load coaches", e),
        }
    }

    async fn load_coach_requests(self) {
        match api::get_coach_requests().await {
            Ok(requests) => self.dispatch(RosterEvent::CoachRequestsLoaded(requests)),
            Err(e) => self.report("load coach requests", e),
        }
    }

    pub fn session_resolved(self, session: SessionView) {
        let is_admin = session.is_admin;
        self.dispatch(RosterEvent::SessionResolved(session));
        spawn_local(async move {
            self.load_players().await;
            self.load_coaches().await;
            if is_admin {
                self.load_coach_requests().await;
            }
        });
    }

    pub fn signed_out(self, failure: Option<String>) {
        self.dispatch(RosterEvent::SignedOut);
        if let Some(message) = failure {
            self.dispatch(RosterEvent::Failed(format!("Sign out did not complete: {}", message)));
        }
    }

    pub fn dismiss_notice(self) {
        self.dispatch(RosterEvent::NoticeDismissed);
    }

    pub fn add_player(self) {
        let Some(name) = prompt_player_name() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = api::add_player(name).await {
                self.report("add player", e);
            }
            self.load_players().await;
        });
    }

    pub fn delete_player(self, id: i64) {
        spawn_local(async move {
            if let Err(e) = api::delete_player(id).await {
                self.report("delete player", e);
            }
            self.load_players().await;
        });
    }

    pub fn request_access(self) {
        if !self.state.with_untracked(RosterState::is_signed_in) {
            alert("Sign in first");
            return;
        }
        spawn_local(async move {
            match api::request_access().await {
                Ok(_) => self.dispatch(RosterEvent::AccessRequested),
                Err(e) => {
                    let message = error_message(&e);
                    log::error!("request access failed: {}", message);
                    alert(&message);
                }
            }
        });
    }

    pub fn approve_coach(self, id: i64) {
        if self.state.with_untracked(|state| state.find_request(id).is_none()) {
            return;
        }
        spawn_local(async move {
            if let Err(e) = api::approve_coach(id).await {
                self.report("approve coach", e);
            }
            self.load_coaches().await;
            self.load_coach_requests().await;
        });
    }

    pub fn deny_coach(self, id: i64) {
        spawn_local(async move {
            if let Err(e) = api::deny_coach(id).await {
                self.report("deny coach", e);
            }
            self.load_coach_requests().await;
        });
    }
}

impl Default for LineupController {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn TeamLineup() -> impl IntoView {
    let auth = use_context::<AuthContext>().unwrap_or_else(provide_auth_context);
    let controller = LineupController::new();

    Effect::new(move |_| {
        if let Some(result) = auth.session.get() {
            match result {
                Ok(session) => controller.session_resolved(session),
                Err(e) => controller.report("check your session", e),
            }
        }
    });

    let user = Memo::new(move |_| controller.state.with(|state| state.user.clone()));

    view! {
        <div class="max-w-2xl mx-auto p-8">
            <h1 class="text-3xl text-seafoam-600 dark:text-mint-400 font-bold mb-6">
                "Team Lineup Manager"
            </h1>
            <Notice controller=controller />
            {move || match user.get() {
                None => view! { <SignInButtons /> }.into_any(),
                Some(user) => {
                    view! {
                        <SignedInHeader user=user controller=controller />
                        <PlayerList controller=controller />
                        <CoachList controller=controller />
                        <AccessRequest controller=controller />
                        <PendingRequests controller=controller />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn SignedInHeader(user: SessionUser, controller: LineupController) -> impl IntoView {
    let email = user.email.clone().unwrap_or_else(|| "unknown email".to_string());

    view! {
        <div class="flex items-center justify-between">
            <div class="flex items-center space-x-3">
                <UserAvatar user=user />
                <p class="text-gray-700 dark:text-gray-200">"Signed in as: " {email}</p>
            </div>
            <SignOutButton on_signed_out=Callback::new(move |failure: Option<String>| {
                controller.signed_out(failure)
            }) />
        </div>
    }
}

#[component]
fn Notice(controller: LineupController) -> impl IntoView {
    move || {
        controller
            .state
            .with(|state| state.notice.clone())
            .map(|message| {
                view! {
                    <div class="mb-4 flex justify-between items-start p-3 rounded-md bg-salmon-100 text-salmon-800 border border-salmon-400">
                        <span>{message}</span>
                        <button
                            class="ml-4 text-sm underline"
                            on:click=move |_| controller.dismiss_notice()
                        >
                            "Dismiss"
                        </button>
                    </div>
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_drops_transport_prefix() {
        let error = ServerFnError::ServerError("Sign in first".to_string());

        assert!(error.to_string().len() > "Sign in first".len());
        assert_eq!(error_message(&error), "Sign in first");
    }

    #[test]
    fn test_sign_out_callback_clears_user_and_reports_failure() {
        Owner::new().with(|| {
            let controller = LineupController::new();
            controller.dispatch(RosterEvent::SessionResolved(SessionView {
                user: Some(SessionUser {
                    id: "u-amy".to_string(),
                    email: Some("amy@x.com".to_string()),
                    display_name: None,
                    provider: None,
                    avatar_url: None,
                }),
                is_admin: true,
                pending_request: false,
            }));
            let on_signed_out = Callback::new(move |failure: Option<String>| controller.signed_out(failure));

            on_signed_out.run(Some("provider unavailable".to_string()));

            let state = controller.state.get_untracked();
            assert!(!state.is_signed_in());
            assert!(!state.is_admin);
            assert_eq!(
                state.notice.as_deref(),
                Some("Sign out did not complete: provider unavailable")
            );
        });
    }
}
