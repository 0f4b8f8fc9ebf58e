use leptos::prelude::*;

use super::api::get_session;
use crate::models::SessionView;

/// Auth-state subscription for the page.
///
/// The session resource resolves once after mount and again after every
/// [`AuthContext::refresh_auth`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: Resource<Result<SessionView, ServerFnError>>,
    version: RwSignal<usize>,
}

impl AuthContext {
    pub fn new() -> Self {
        let version = RwSignal::new(0usize);
        let session = Resource::new(move || version.get(), |_| get_session());
        Self { session, version }
    }

    pub fn refresh_auth(&self) {
        self.version.update(|v| *v += 1);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_auth_context() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);
    auth
}
