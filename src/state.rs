use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::extract::FromRef;
        use leptos::prelude::*;
        use std::sync::Arc;

        use crate::auth::server::gotrue::GoTrueClient;
        use crate::config::SupabaseConfig;
        use crate::supabase::SupabaseStore;

        #[derive(FromRef, Clone)]
        pub struct AppState {
            pub leptos_options: LeptosOptions,
            pub store: Arc<SupabaseStore>,
            pub gotrue: GoTrueClient,
        }

        impl AppState {
            pub fn new(leptos_options: LeptosOptions, config: SupabaseConfig) -> Self {
                Self {
                    leptos_options,
                    store: Arc::new(SupabaseStore::new(&config)),
                    gotrue: GoTrueClient::new(config),
                }
            }
        }

        /// App state provided to server functions by the `/api` handler.
        pub fn app_state() -> Result<AppState, ServerFnError> {
            use_context::<AppState>()
                .ok_or_else(|| ServerFnError::ServerError("app state missing from context".to_string()))
        }
    }
}
