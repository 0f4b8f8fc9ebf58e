pub mod app;
pub mod auth;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error_template;
pub mod models;
pub mod roster;
pub mod server_fn;
pub mod state;
#[cfg(feature = "ssr")]
pub mod supabase;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
