use leptos::prelude::*;

use crate::components::lineup::LineupController;
use crate::roster::RosterState;

const SECTION_CLASS: &str = "mt-8";
const HEADING_CLASS: &str = "text-xl font-bold text-gray-800 dark:text-gray-200 mb-2";
const BUTTON_CLASS: &str = "px-3 py-1 text-sm bg-seafoam-500 text-white rounded hover:bg-seafoam-400 transition-colors";
const DANGER_BUTTON_CLASS: &str = "px-2 py-0.5 text-xs bg-salmon-600 text-white rounded hover:bg-salmon-500 transition-colors";

#[component]
pub fn PlayerList(controller: LineupController) -> impl IntoView {
    let is_admin = Memo::new(move |_| controller.state.with(|state| state.is_admin));

    view! {
        <section class=SECTION_CLASS>
            <h2 class=HEADING_CLASS>"Players"</h2>
            <ul class="space-y-1">
                <For
                    each=move || controller.state.with(|state| state.players.clone())
                    key=|player| player.id
                    children=move |player| {
                        let id = player.id;
                        view! {
                            <li class="text-gray-700 dark:text-gray-300">
                                {player.name} " "
                                <Show when=move || is_admin.get()>
                                    <button
                                        class=DANGER_BUTTON_CLASS
                                        on:click=move |_| controller.delete_player(id)
                                    >
                                        "Delete"
                                    </button>
                                </Show>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || is_admin.get()>
                <button class=format!("mt-2 {}", BUTTON_CLASS) on:click=move |_| controller.add_player()>
                    "Add Player"
                </button>
            </Show>
        </section>
    }
}

#[component]
pub fn CoachList(controller: LineupController) -> impl IntoView {
    view! {
        <section class=SECTION_CLASS>
            <h2 class=HEADING_CLASS>"Coaches"</h2>
            <ul class="space-y-1">
                <For
                    each=move || controller.state.with(|state| state.coaches.clone())
                    key=|coach| coach.id
                    children=move |coach| {
                        view! {
                            <li class="text-gray-700 dark:text-gray-300">
                                {coach.name} " (" {coach.email} ")"
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}

/// Request button for signed-in non-admins, or the waiting message once sent.
#[component]
pub fn AccessRequest(controller: LineupController) -> impl IntoView {
    move || {
        let (can_request, pending) = controller
            .state
            .with(|state| (state.can_request_access(), state.pending_request));

        if can_request {
            view! {
                <div class=SECTION_CLASS>
                    <button class=BUTTON_CLASS on:click=move |_| controller.request_access()>
                        "Request Admin Access"
                    </button>
                </div>
            }
                .into_any()
        } else if pending {
            view! {
                <p class="mt-8 text-teal-600 dark:text-aqua-400">
                    "Access request sent, waiting approval"
                </p>
            }
                .into_any()
        } else {
            view! { <div></div> }.into_any()
        }
    }
}

#[component]
pub fn PendingRequests(controller: LineupController) -> impl IntoView {
    view! {
        <Show when=move || controller.state.with(RosterState::shows_pending_requests)>
            <section class=SECTION_CLASS>
                <h2 class=HEADING_CLASS>"Pending Coach Requests"</h2>
                <ul class="space-y-1">
                    <For
                        each=move || controller.state.with(|state| state.coach_requests.clone())
                        key=|request| request.id
                        children=move |request| {
                            let id = request.id;
                            view! {
                                <li class="text-gray-700 dark:text-gray-300 space-x-2">
                                    <span>{request.name} " (" {request.email} ")"</span>
                                    <button class=BUTTON_CLASS on:click=move |_| controller.approve_coach(id)>
                                        "Approve"
                                    </button>
                                    <button
                                        class=DANGER_BUTTON_CLASS
                                        on:click=move |_| controller.deny_coach(id)
                                    >
                                        "Deny"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </Show>
    }
}
