//! REST API module.
//!
//! Contains all route handlers following the frontend contract.

mod comments;
mod groups;
mod images;
mod memories;

pub use comments::*;
pub use groups::*;
pub use images::*;
pub use memories::*;

use crate::errors::AppError;

/// Response type for all handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Unwrap a required request field, mapping absence (or a blank value) to a
/// validation failure. The value is returned as sent, untrimmed.
pub fn require(field: &Option<String>) -> Result<&str, AppError> {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::bad_request()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present() {
        let field = Some("value".to_string());
        assert_eq!(require(&field).unwrap(), "value");
    }

    #[test]
    fn test_require_keeps_surrounding_whitespace() {
        let field = Some(" padded ".to_string());
        assert_eq!(require(&field).unwrap(), " padded ");
    }

    #[test]
    fn test_require_missing_or_blank() {
        assert!(require(&None).is_err());
        assert!(require(&Some(String::new())).is_err());
        assert!(require(&Some("  ".to_string())).is_err());
    }
}
