//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable error codes
//! - Store messages reach callers verbatim
//! - Error conversions work correctly
//! - Error matching allows hosts to handle specific cases

use newbill::prelude::*;
use std::error::Error;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_store_error_codes() {
        assert_eq!(
            StoreError::remote("Erreur 500").error_code(),
            "STORE_REMOTE_ERROR"
        );
        assert_eq!(
            StoreError::NotFound {
                key: "1234".to_string()
            }
            .error_code(),
            "BILL_NOT_FOUND"
        );
        assert_eq!(
            StoreError::Unavailable {
                message: "connection refused".to_string()
            }
            .error_code(),
            "STORE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_session_error_codes() {
        assert_eq!(
            SessionError::Malformed {
                message: "test".to_string()
            }
            .error_code(),
            "SESSION_MALFORMED"
        );
        assert_eq!(
            SessionError::NotAnEmployee {
                user_type: "Admin".to_string()
            }
            .error_code(),
            "SESSION_FORBIDDEN"
        );
    }

    #[test]
    fn test_form_error_delegates_codes() {
        let err: FormError = StoreError::remote("Erreur 404").into();
        assert_eq!(err.error_code(), "STORE_REMOTE_ERROR");

        let err: FormError = ValidationError::FieldError {
            field: "amount".to_string(),
            message: "requis".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: FormError = ConfigError::IoError {
            message: "denied".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

// =============================================================================
// Message Tests
// =============================================================================

mod message_tests {
    use super::*;

    #[test]
    fn test_remote_messages_are_verbatim() {
        for message in ["Erreur 404", "Erreur 500", "Bill locked"] {
            let err: FormError = StoreError::remote(message).into();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_unknown_field_names_the_test_id() {
        let err = "icon-eye".parse::<FieldId>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert!(err.to_string().contains("icon-eye"));
    }

    #[test]
    fn test_session_from_invalid_json() {
        let err = Session::from_json("not json").unwrap_err();
        assert!(matches!(err, SessionError::Malformed { .. }));
        assert!(err.to_string().starts_with("Invalid session value"));
    }

    #[test]
    fn test_session_with_unknown_type() {
        let err = Session::from_json(r#"{"type":"Guest","email":"a@a"}"#).unwrap_err();
        assert!(matches!(err, SessionError::Malformed { .. }));
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_form_error_exposes_source() {
        let err: FormError = SessionError::NotAnEmployee {
            user_type: "Admin".to_string(),
        }
        .into();
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Session of type 'Admin' cannot submit bills");
    }

    #[test]
    fn test_unknown_field_has_no_source() {
        let err = FormError::UnknownField {
            test_id: "x".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_form_error_into_anyhow() {
        fn open() -> anyhow::Result<()> {
            Session::admin("admin@test.tld").require_employee()?;
            Ok(())
        }

        let err = open().unwrap_err();
        assert!(err.downcast_ref::<SessionError>().is_some());
    }
}

// =============================================================================
// Matching Tests
// =============================================================================

mod matching_tests {
    use super::*;

    fn describe(err: &FormError) -> &'static str {
        match err {
            FormError::Store(StoreError::NotFound { .. }) => "missing bill",
            FormError::Store(StoreError::Unavailable { .. }) => "offline",
            FormError::Store(StoreError::Remote(_)) => "server said no",
            FormError::Session(_) => "sign in again",
            _ => "other",
        }
    }

    #[test]
    fn test_hosts_can_match_on_categories() {
        assert_eq!(
            describe(
                &StoreError::NotFound {
                    key: "k".to_string()
                }
                .into()
            ),
            "missing bill"
        );
        assert_eq!(describe(&StoreError::remote("Erreur 500").into()), "server said no");
        assert_eq!(
            describe(
                &SessionError::Malformed {
                    message: "m".to_string()
                }
                .into()
            ),
            "sign in again"
        );
    }
}
