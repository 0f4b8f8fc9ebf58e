mod types;
mod api;
pub mod auth_components;
pub mod context;
#[cfg(feature = "ssr")]
pub mod server;

pub use auth_components::*;
pub use types::*;
pub use api::*;
