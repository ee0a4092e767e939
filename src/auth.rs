//! Demo-grade admin credential check.
//!
//! The admin surface is gated by a single configured username/password pair.
//! This is a placeholder for a real authentication system and is documented
//! as such; there are no sessions, tokens, or users beyond the one pair.

use crate::config::AdminSettings;
use crate::error::{Result, TingliError};

/// Check a login attempt against the configured admin credentials.
pub fn check_credentials(settings: &AdminSettings, username: &str, password: &str) -> bool {
    username == settings.username && password == settings.password
}

/// Require valid admin credentials, erroring otherwise.
pub fn require_admin(settings: &AdminSettings, username: &str, password: &str) -> Result<()> {
    if check_credentials(settings, username, password) {
        Ok(())
    } else {
        Err(TingliError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials() {
        let settings = AdminSettings::default();

        assert!(check_credentials(&settings, "admin", "admin1234!"));
        assert!(!check_credentials(&settings, "admin", "wrong"));
        assert!(!check_credentials(&settings, "someone", "admin1234!"));
    }

    #[test]
    fn test_require_admin() {
        let settings = AdminSettings::default();

        assert!(require_admin(&settings, "admin", "admin1234!").is_ok());
        assert!(matches!(
            require_admin(&settings, "admin", ""),
            Err(TingliError::InvalidCredentials)
        ));
    }
}
