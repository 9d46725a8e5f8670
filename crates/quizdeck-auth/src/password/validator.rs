//! Password policy enforcement for new passwords.

use quizdeck_core::error::AppError;

/// Minimum accepted password length.
const MIN_LENGTH: usize = 8;

/// Validates password strength for signups and password changes.
#[derive(Debug, Clone, Default)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a password against the policy.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_LENGTH} characters long"
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reasonable_password() {
        assert!(PasswordValidator::new().validate("sturdy-pass-1").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(PasswordValidator::new().validate("abc1").is_err());
    }

    #[test]
    fn test_rejects_password_without_digit() {
        assert!(PasswordValidator::new().validate("no-digits-here").is_err());
    }
}
