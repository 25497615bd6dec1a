use tinylink::errors::{Result, TinyLinkError};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = TinyLinkError::validation("Destination link cannot be empty");

        assert!(matches!(error, TinyLinkError::Validation(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Destination link cannot be empty"));
    }

    #[test]
    fn test_not_found_error() {
        let error = TinyLinkError::not_found("URL not found");

        assert!(matches!(error, TinyLinkError::NotFound(_)));
        assert!(error.to_string().contains("URL not found"));
    }

    #[test]
    fn test_server_error_keeps_message_verbatim() {
        let error = TinyLinkError::server("Short code already exists");
        assert_eq!(error.message(), "Short code already exists");
    }

    #[test]
    fn test_unreachable_error() {
        let error = TinyLinkError::unreachable("Server not reachable");
        assert!(matches!(error, TinyLinkError::Unreachable(_)));
        assert!(error.is_user_visible());
    }

    #[test]
    fn test_storage_error_is_not_user_visible() {
        let error = TinyLinkError::storage("quota exceeded");
        assert!(!error.is_user_visible());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let error: TinyLinkError = json_error.into();

        assert!(matches!(error, TinyLinkError::Serialization(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn parse(doc: &str) -> Result<Vec<u8>> {
            Ok(serde_json::from_str(doc)?)
        }
        assert!(parse("[1,2]").is_ok());
        assert!(parse("nope").is_err());
    }
}

#[cfg(test)]
mod error_format_tests {
    use super::*;

    #[test]
    fn test_format_simple_and_colored() {
        let error = TinyLinkError::in_flight("abc123");
        assert!(error.format_simple().contains("abc123"));
        assert!(error.format_colored().contains("abc123"));
    }

    #[test]
    fn test_implements_std_error() {
        let error = TinyLinkError::clipboard("no display");
        let dyn_error: &dyn Error = &error;
        assert!(dyn_error.source().is_none());
    }
}
