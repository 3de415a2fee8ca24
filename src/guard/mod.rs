//! Resource access guard.
//!
//! Every update, delete, and explicit password check runs through the same
//! sequence: load the resource, verify the supplied secret against what is
//! stored, then let the caller act on the authorized row. The lookup and the
//! subsequent mutation are two independent statements; nothing serializes
//! concurrent writers between them, and the last write wins.

use crate::errors::AppError;
use crate::secret::{self, SecretScheme};

/// A resource that can be unlocked with a caller-supplied secret.
pub trait Secured {
    /// The stored secret (bcrypt hash or plain value, per scheme).
    fn stored_secret(&self) -> &str;
    /// The comparison scheme for this resource kind.
    fn scheme(&self) -> SecretScheme;
}

/// Outcome of an authorization check.
#[derive(Debug)]
pub enum Access<T> {
    /// Secret matched; carries the loaded resource.
    Authorized(T),
    /// No resource with the given id.
    NotFound,
    /// Resource exists but the secret did not match.
    Forbidden,
}

impl<T> Access<T> {
    /// Map the outcome into the error taxonomy, yielding the resource on
    /// success. Mismatches become 403; the verify-password endpoint maps
    /// them to 401 at its own call site instead.
    pub fn require(self) -> Result<T, AppError> {
        match self {
            Access::Authorized(resource) => Ok(resource),
            Access::NotFound => Err(AppError::not_found()),
            Access::Forbidden => Err(AppError::wrong_password()),
        }
    }
}

/// Check a supplied secret against a loaded resource.
///
/// `loaded` is the result of the id lookup; `None` means the resource does
/// not exist.
pub fn authorize<T: Secured>(
    loaded: Option<T>,
    supplied: &str,
) -> Result<Access<T>, AppError> {
    let Some(resource) = loaded else {
        return Ok(Access::NotFound);
    };

    if secret::verify(resource.scheme(), supplied, resource.stored_secret())? {
        Ok(Access::Authorized(resource))
    } else {
        Ok(Access::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::hash_secret;

    struct Locker {
        stored: String,
        scheme: SecretScheme,
    }

    impl Secured for Locker {
        fn stored_secret(&self) -> &str {
            &self.stored
        }
        fn scheme(&self) -> SecretScheme {
            self.scheme
        }
    }

    #[test]
    fn test_authorize_missing_resource() {
        let access = authorize::<Locker>(None, "anything").unwrap();
        assert!(matches!(access, Access::NotFound));
        assert!(matches!(
            Access::<Locker>::NotFound.require(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_authorize_hashed_match() {
        let locker = Locker {
            stored: hash_secret("secret1", 4).unwrap(),
            scheme: SecretScheme::Hashed,
        };
        let access = authorize(Some(locker), "secret1").unwrap();
        assert!(matches!(access, Access::Authorized(_)));
    }

    #[test]
    fn test_authorize_hashed_mismatch() {
        let locker = Locker {
            stored: hash_secret("secret1", 4).unwrap(),
            scheme: SecretScheme::Hashed,
        };
        let access = authorize(Some(locker), "wrong").unwrap();
        assert!(matches!(access, Access::Forbidden));
        assert!(matches!(access.require(), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_authorize_plain_scheme() {
        let locker = Locker {
            stored: "plain-pw".to_string(),
            scheme: SecretScheme::Plain,
        };
        let access = authorize(Some(locker), "plain-pw").unwrap();
        let unlocked = access.require().unwrap();
        assert_eq!(unlocked.stored, "plain-pw");
    }
}
