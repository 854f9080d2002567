//! Per-session login gate.
//!
//! Each browser session is governed by one [`SessionGate`]. The gate starts
//! logged out and moves to logged in after a successful credential check. There is no
//! way back: a session stays logged in until the process restarts.
//!
//! Credentials are compared as plain strings, with no hashing and no limit
//! on attempts.

use std::collections::HashMap;

use crate::{
    config::Settings,
    error::{DashboardError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    /// Compares the submitted credentials with the configured pair.
    ///
    /// Returns `true` and moves to [`SessionState::LoggedIn`] on a match. A
    /// mismatch leaves the state untouched, so a logged-in session stays
    /// logged in. Unset configured credentials never match.
    pub fn attempt_login(&mut self, username: &str, password: &str, settings: &Settings) -> bool {
        let matches = settings.app_username.as_deref() == Some(username)
            && settings.app_password.as_deref() == Some(password);

        if matches {
            self.state = SessionState::LoggedIn;
        }
        matches
    }

    pub fn login(&mut self, username: &str, password: &str, settings: &Settings) -> Result<()> {
        if self.attempt_login(username, password, settings) {
            Ok(())
        } else {
            Err(DashboardError::InvalidCredentials)
        }
    }

    /// Whether gated content may be shown to this session.
    pub fn allows(&self, settings: &Settings) -> bool {
        !settings.login_required || self.is_logged_in()
    }
}

/// Logged-in sessions keyed by session id.
///
/// Only a successful login adds an entry. Any id that is not stored is
/// logged out, so requests that never log in leave the store untouched and
/// it stays bounded by the number of logins.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionGate>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: &str) -> SessionState {
        self.sessions
            .get(id)
            .map(SessionGate::state)
            .unwrap_or_default()
    }

    /// Whether gated content may be shown to session `id`.
    pub fn allows(&self, id: &str, settings: &Settings) -> bool {
        match self.sessions.get(id) {
            Some(gate) => gate.allows(settings),
            None => SessionGate::new().allows(settings),
        }
    }

    /// Checks the credentials for session `id` and stores the session once
    /// they match.
    pub fn login(
        &mut self,
        id: &str,
        username: &str,
        password: &str,
        settings: &Settings,
    ) -> Result<()> {
        let mut gate = self.sessions.get(id).cloned().unwrap_or_default();
        gate.login(username, password, settings)?;
        self.sessions.insert(id.to_string(), gate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
