//! Client-side input validation.
//!
//! Failures here never reach the network; the messages match what the
//! forms display verbatim.

use crate::error::ClientError;

/// Minimum accepted password length, matching the backend's rule.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn task_title(title: &str) -> Result<(), ClientError> {
    if title.trim().is_empty() {
        return Err(ClientError::Validation(
            "Task title cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

pub fn registration(name: &str, email: &str, password: &str) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation("Name cannot be empty.".to_string()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::Validation(
            "Invalid email address.".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(
            "Password must be at least 8 characters.".to_string(),
        ));
    }
    Ok(())
}

/// `current` is the name on the cached profile, if one is loaded.
pub fn user_name(name: &str, current: Option<&str>) -> Result<(), ClientError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation("Name cannot be empty.".to_string()));
    }
    if current == Some(trimmed) {
        return Err(ClientError::Validation("Name is the same.".to_string()));
    }
    Ok(())
}

pub fn password_change(current: &str, new: &str, confirmation: &str) -> Result<(), ClientError> {
    if current.is_empty() || new.is_empty() || confirmation.is_empty() {
        return Err(ClientError::Validation(
            "All password fields are required.".to_string(),
        ));
    }
    if new != confirmation {
        return Err(ClientError::Validation(
            "New passwords do not match.".to_string(),
        ));
    }
    if new.len() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(
            "New password must be at least 8 characters.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ClientError>) -> String {
        match result {
            Err(ClientError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_title_rejected() {
        assert_eq!(message(task_title("   ")), "Task title cannot be empty.");
        assert!(task_title("water the plants").is_ok());
    }

    #[test]
    fn test_registration_rules() {
        assert_eq!(
            message(registration("", "a@b.test", "longenough")),
            "Name cannot be empty."
        );
        assert_eq!(
            message(registration("Ana", "not-an-email", "longenough")),
            "Invalid email address."
        );
        assert_eq!(
            message(registration("Ana", "a@b.test", "short")),
            "Password must be at least 8 characters."
        );
        assert!(registration("Ana", "a@b.test", "longenough").is_ok());
    }

    #[test]
    fn test_unchanged_name_rejected() {
        assert_eq!(message(user_name("Ana", Some("Ana"))), "Name is the same.");
        assert!(user_name("Ana", Some("Bea")).is_ok());
        assert!(user_name("  Ana  ", None).is_ok());
    }

    #[test]
    fn test_password_change_rules() {
        assert_eq!(
            message(password_change("", "newpassword", "newpassword")),
            "All password fields are required."
        );
        assert_eq!(
            message(password_change("oldpassword", "newpassword", "different")),
            "New passwords do not match."
        );
        assert_eq!(
            message(password_change("oldpassword", "short", "short")),
            "New password must be at least 8 characters."
        );
        assert!(password_change("oldpassword", "newpassword", "newpassword").is_ok());
    }
}
