//! Current-user state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the share dialog to tell "me" apart from other chat members.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{User, UserId};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }
}
