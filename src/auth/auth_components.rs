use leptos::prelude::*;

use crate::auth::{context::AuthContext, Logout, OAuthProvider};
use crate::components::lineup::error_message;

#[component]
pub fn SignInButtons() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <a
                href=OAuthProvider::Google.sign_in_path()
                target="_self"
                class="w-full flex items-center justify-center px-4 py-2
                bg-seafoam-400 dark:bg-teal-700 border border-gray-300 dark:border-teal-600
                rounded-md shadow-sm text-gray-700 dark:text-gray-200
                hover:bg-seafoam-600 dark:hover:bg-teal-600 transition-colors"
            >
                <svg class="w-5 h-5 mr-2" viewBox="0 0 24 24">
                    <path
                        fill="#4285F4"
                        d="M22.56 12.25c0-.78-.07-1.53-.2-2.25H12v4.26h5.92c-.26 1.37-1.04 2.53-2.21 3.31v2.77h3.57c2.08-1.92 3.28-4.74 3.28-8.09z"
                    ></path>
                    <path
                        fill="#34A853"
                        d="M12 23c2.97 0 5.46-.98 7.28-2.66l-3.57-2.77c-.98.66-2.23 1.06-3.71 1.06-2.86 0-5.29-1.93-6.16-4.53H2.18v2.84C3.99 20.53 7.7 23 12 23z"
                    ></path>
                    <path
                        fill="#FBBC05"
                        d="M5.84 14.09c-.22-.66-.35-1.36-.35-2.09s.13-1.43.35-2.09V7.07H2.18C1.43 8.55 1 10.22 1 12s.43 3.45 1.18 4.93l2.85-2.22.81-.62z"
                    ></path>
                    <path
                        fill="#EA4335"
                        d="M12 5.38c1.62 0 3.06.56 4.21 1.64l3.15-3.15C17.45 2.09 14.97 1 12 1 7.7 1 3.99 3.47 2.18 7.07l3.66 2.84c.87-2.6 3.3-4.53 6.16-4.53z"
                    ></path>
                </svg>
                "Sign in with Google"
            </a>

            <a
                href=OAuthProvider::Apple.sign_in_path()
                target="_self"
                class="w-full flex items-center justify-center px-4 py-2
                bg-gray-900 border border-gray-700 rounded-md shadow-sm text-white
                hover:bg-gray-700 transition-colors"
            >
                <svg class="w-5 h-5 mr-2 fill-white" viewBox="0 0 24 24">
                    <path d="M16.37 12.78c-.02-2.3 1.88-3.4 1.96-3.46-1.07-1.56-2.73-1.78-3.32-1.8-1.41-.14-2.76.83-3.47.83-.72 0-1.82-.81-2.99-.79-1.54.02-2.96.9-3.75 2.27-1.6 2.78-.41 6.89 1.15 9.14.76 1.1 1.67 2.34 2.86 2.29 1.15-.05 1.58-.74 2.97-.74 1.38 0 1.77.74 2.98.72 1.23-.02 2.01-1.12 2.77-2.22.87-1.28 1.23-2.51 1.25-2.58-.03-.01-2.39-.92-2.41-3.66zM14.1 6.03c.63-.77 1.06-1.83.94-2.9-.91.04-2.02.61-2.67 1.37-.58.68-1.1 1.77-.96 2.81 1.02.08 2.06-.52 2.69-1.28z"></path>
                </svg>
                "Sign in with Apple"
            </a>
        </div>
    }.into_any()
}

/// Signs out and then runs `on_signed_out`, whether or not the provider call succeeded.
#[component]
pub fn SignOutButton(#[prop(into)] on_signed_out: Callback<Option<String>>) -> impl IntoView {
    let logout_action = ServerAction::<Logout>::new();
    let auth = use_context::<AuthContext>();

    Effect::new(move |_| {
        if let Some(result) = logout_action.value().get() {
            let failure = result.err().map(|e| {
                let message = error_message(&e);
                log::error!("sign out failed: {}", message);
                message
            });
            on_signed_out.run(failure);
            if let Some(auth) = auth {
                auth.refresh_auth();
            }
        }
    });

    view! {
        <button
            on:click=move |_| {
                logout_action.dispatch(Logout {});
            }

            class="px-3 py-1 text-sm bg-salmon-600 hover:bg-salmon-700 text-gray-600 dark:text-gray-400 rounded-md transition-colors"
        >
            "Sign out"
        </button>
    }.into_any()
}
