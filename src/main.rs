use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::{
            body::Body as AxumBody,
            extract::State,
            http::Request,
            response::IntoResponse,
            routing::get,
            Router,
        };
        use dotenv::dotenv;
        use env_logger::Env;
        use leptos::prelude::*;
        use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
        use lineup::app::*;
        use lineup::auth::server::oauth;
        use lineup::config::SupabaseConfig;
        use lineup::state::AppState;
        use tower_http::trace::TraceLayer;

        async fn server_fn_handler(
            State(app_state): State<AppState>,
            request: Request<AxumBody>,
        ) -> impl IntoResponse {
            handle_server_fns_with_context(
                move || {
                    provide_context(app_state.clone());
                },
                request,
            )
            .await
        }

        async fn leptos_routes_handler(
            State(app_state): State<AppState>,
            request: Request<AxumBody>,
        ) -> impl IntoResponse {
            let leptos_options = app_state.leptos_options.clone();
            let handler = leptos_axum::render_app_to_stream_with_context(
                move || {
                    provide_context(app_state.clone());
                },
                move || shell(leptos_options.clone()),
            );
            handler(request).await.into_response()
        }

        #[tokio::main]
        async fn main() -> Result<(), Box<dyn std::error::Error>> {
            dotenv().ok();
            env_logger::init_from_env(Env::default().default_filter_or("info"));

            let conf = get_configuration(None)?;
            let leptos_options = conf.leptos_options;
            let addr = leptos_options.site_addr;
            let routes = generate_route_list(App);

            let supabase = SupabaseConfig::from_env()?;
            log::info!("using Supabase project at {}", supabase.url);
            let app_state = AppState::new(leptos_options, supabase);

            let app = Router::new()
                .route(
                    "/api/*fn_name",
                    get(server_fn_handler).post(server_fn_handler),
                )
                .route("/auth/callback", get(oauth::callback))
                .route("/auth/:provider", get(oauth::sign_in))
                .leptos_routes_with_handler(routes, get(leptos_routes_handler))
                .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
                .layer(TraceLayer::new_for_http())
                .with_state(app_state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            log::info!("listening on http://{}", &addr);
            axum::serve(listener, app.into_make_service()).await?;
            Ok(())
        }
    } else {
        pub fn main() {
            // no client-side main function
            // see lib.rs for hydration function instead
        }
    }
}
