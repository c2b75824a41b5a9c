/// Resource ownership checks
///
/// Mutating a user record or deleting a task is reserved for the owner:
/// the user whose email matches the resource's owning user reference
/// (the user's own email, or the task author's email). The guard runs at
/// the top of the handler, after authentication and the not-found check.

use super::middleware::AuthUser;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Authenticated caller does not own the resource
    #[error("Not the owner of this resource")]
    NotOwner,
}

/// Requires that the authenticated caller owns the resource
///
/// # Errors
///
/// Returns `AuthzError::NotOwner` when the caller's email differs from
/// the owner's email.
pub fn require_owner(auth: &AuthUser, owner_email: &str) -> Result<(), AuthzError> {
    if auth.email == owner_email {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_allowed() {
        let auth = AuthUser::new("owner@example.com");
        assert!(require_owner(&auth, "owner@example.com").is_ok());
    }

    #[test]
    fn test_non_owner_denied() {
        let auth = AuthUser::new("intruder@example.com");
        assert!(matches!(
            require_owner(&auth, "owner@example.com"),
            Err(AuthzError::NotOwner)
        ));
    }
}
