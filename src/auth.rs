//! Authentication boundary and sign-in form rules.
//!
//! Session handling belongs to the hosted auth service; this crate only
//! needs to know who the current user is, if anyone.

use crate::error::{Error, Result};
use crate::model::User;
use serde::{Deserialize, Serialize};

/// Where users land after signing in.
pub const DEFAULT_NEXT_PATH: &str = "/dashboard";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Yields the user behind the current request.
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, or `None` when there is no active session.
    fn current_user(&self) -> Option<User>;
}

/// Auth provider with a fixed identity.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<User>,
}

impl StaticAuth {
    /// Every request is made by `user`.
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// No request is authenticated.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}

/// Login form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trim both fields and require them to be present.
    pub fn validate(&self) -> Result<Credentials> {
        let email = self.email.trim();
        let password = self.password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation("Email and password are required.".into()));
        }
        Ok(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Registration form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Trim every field and apply the sign-up rules in order.
    pub fn validate(&self) -> Result<Registration> {
        let registration = Registration {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
            confirm_password: self.confirm_password.trim().to_string(),
        };

        if registration.email.is_empty()
            || registration.password.is_empty()
            || registration.confirm_password.is_empty()
        {
            return Err(Error::Validation("Email and password are required.".into()));
        }
        if registration.password != registration.confirm_password {
            return Err(Error::Validation("Passwords do not match.".into()));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(
                "Password must be at least 6 characters.".into(),
            ));
        }
        Ok(registration)
    }
}

/// Keep post-login redirects on this site.
///
/// Only absolute paths are allowed; protocol-relative `//host` paths and
/// anything else fall back to [`DEFAULT_NEXT_PATH`].
pub fn sanitize_next_path(path: &str) -> &str {
    if path.starts_with('/') && !path.starts_with("//") {
        path
    } else {
        DEFAULT_NEXT_PATH
    }
}
