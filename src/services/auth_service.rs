//! Credential validation for the gateway authorizer.

use crate::config::AuthConfig;

/// AuthService checks a supplied credential pair against the configured
/// username and accepted password set. It holds no mutable state and is
/// cheap to clone into handler state.
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// True iff the username matches exactly and the password is a member of
    /// the accepted set.
    pub fn validate_credentials(&self, username: &str, password: &str) -> bool {
        if username != self.config.username {
            return false;
        }

        self.config.passwords.iter().any(|p| p == password)
    }
}
