pub mod state;

#[cfg(feature = "ssr")]
pub mod error;
#[cfg(all(test, feature = "ssr"))]
mod memory;
#[cfg(feature = "ssr")]
pub mod ops;
#[cfg(feature = "ssr")]
pub mod store;

pub use state::{RosterEvent, RosterState};
