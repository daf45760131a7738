//! Local validation of login and registration input.
//!
//! Bad credentials are caught here and never sent to the backend. Rules are
//! checked in a fixed priority order and validation short-circuits at the
//! first failure, so the user sees exactly one message per attempt.

use thiserror::Error;

/// Minimum length for usernames and passwords.
pub const MIN_CREDENTIAL_LENGTH: usize = 6;

/// A credential rule violation. The display text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Username is a required field")]
    UsernameRequired,
    #[error("Username must be at least {MIN_CREDENTIAL_LENGTH} characters")]
    UsernameTooShort,
    #[error("Password is a required field")]
    PasswordRequired,
    #[error("Password must be at least {MIN_CREDENTIAL_LENGTH} characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Validate login input: both fields must be present.
///
/// # Errors
///
/// Returns the first violated rule, checking username before password.
pub fn validate_login(username: &str, password: &str) -> Result<(), CredentialError> {
    if username.is_empty() {
        return Err(CredentialError::UsernameRequired);
    }
    if password.is_empty() {
        return Err(CredentialError::PasswordRequired);
    }
    Ok(())
}

/// Validate registration input.
///
/// # Errors
///
/// Returns the first violated rule, in priority order: username empty,
/// username length, password empty, password length, password mismatch.
pub fn validate_registration(
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CredentialError> {
    if username.is_empty() {
        return Err(CredentialError::UsernameRequired);
    }
    if username.len() < MIN_CREDENTIAL_LENGTH {
        return Err(CredentialError::UsernameTooShort);
    }
    if password.is_empty() {
        return Err(CredentialError::PasswordRequired);
    }
    if password.len() < MIN_CREDENTIAL_LENGTH {
        return Err(CredentialError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(CredentialError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_username_first() {
        // Both fields empty: the username rule wins.
        assert_eq!(
            validate_login("", ""),
            Err(CredentialError::UsernameRequired)
        );
        assert_eq!(
            validate_login("crio-user", ""),
            Err(CredentialError::PasswordRequired)
        );
        assert_eq!(validate_login("crio-user", "hunter2!"), Ok(()));
    }

    #[test]
    fn test_login_skips_length_rules() {
        // Login only checks presence; short values go to the backend.
        assert_eq!(validate_login("ab", "cd"), Ok(()));
    }

    #[test]
    fn test_registration_priority_order() {
        assert_eq!(
            validate_registration("", "", ""),
            Err(CredentialError::UsernameRequired)
        );
        assert_eq!(
            validate_registration("abc", "", ""),
            Err(CredentialError::UsernameTooShort)
        );
        assert_eq!(
            validate_registration("crio-user", "", ""),
            Err(CredentialError::PasswordRequired)
        );
        assert_eq!(
            validate_registration("crio-user", "abc", "abc"),
            Err(CredentialError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("crio-user", "hunter2!", "hunter3!"),
            Err(CredentialError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("crio-user", "hunter2!", "hunter2!"),
            Ok(())
        );
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            CredentialError::UsernameRequired.to_string(),
            "Username is a required field"
        );
        assert_eq!(
            CredentialError::UsernameTooShort.to_string(),
            "Username must be at least 6 characters"
        );
        assert_eq!(
            CredentialError::PasswordRequired.to_string(),
            "Password is a required field"
        );
        assert_eq!(
            CredentialError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            CredentialError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
