/// Page-lifetime login state. One `Session` handle is created by the root
/// component, provided through context, and shared by every feature; it is
/// also the single dispatch point for the error taxonomy (403 expires the
/// session, everything else is logged and abandoned).
use leptos::logging::error;
use leptos::{create_rw_signal, window, RwSignal, SignalGet, SignalSet, SignalUpdate};

use crate::api::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub username: String,
    pub is_logged_in: bool,
    pub last_login_time: String,
}

#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(SessionState::default()),
        }
    }

    pub fn log_in(&self, username: String, last_login_time: String) {
        self.state.set(SessionState {
            username,
            is_logged_in: true,
            last_login_time,
        });
    }

    pub fn log_out(&self) {
        self.state.update(|state| {
            state.username.clear();
            state.is_logged_in = false;
        });
    }

    /// Uniform 403 policy: the session is invalid, so drop the login state
    /// and reload the page from scratch.
    pub fn expire(&self) {
        self.log_out();
        force_reload();
    }

    /// Applies the error taxonomy for an abandoned operation: 403 expires
    /// the session, any other failure is logged and local state is left
    /// untouched. No retry either way.
    pub fn handle_failure(&self, context: &str, err: ApiError) {
        match err {
            ApiError::Forbidden => {
                error!("{context}: unauthorized access");
                self.expire();
            }
            other => error!("{context}: {other}"),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.get().is_logged_in
    }

    pub fn username(&self) -> String {
        self.state.get().username
    }

    pub fn last_login_time(&self) -> String {
        self.state.get().last_login_time
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn force_reload() {
    if let Err(err) = window().location().reload() {
        error!("page reload failed: {err:?}");
    }
}
