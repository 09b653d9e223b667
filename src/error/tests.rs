//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod ffl_error_tests {
    use super::*;

    #[test]
    fn test_rate_limit_error_is_retryable() {
        let error = FflError::RateLimitExceeded {
            retry_after: Some(Duration::from_secs(3)),
        };

        assert!(error.is_rate_limited());
        assert_eq!(error.retry_after(), Some(Duration::from_secs(3)));
        assert_eq!(error.to_string(), "rate limit exceeded (retry after 3s)");
    }

    #[test]
    fn test_rate_limit_error_without_hint() {
        let error = FflError::RateLimitExceeded { retry_after: None };

        assert!(error.is_rate_limited());
        assert_eq!(error.retry_after(), None);
        assert_eq!(error.to_string(), "rate limit exceeded");
    }

    #[test]
    fn test_upstream_http_error_is_not_retryable() {
        let error = FflError::UpstreamHttp {
            status: 503,
            url: "https://api.example.test/v1/players/nfl".to_string(),
        };

        assert!(!error.is_rate_limited());
        assert_eq!(error.retry_after(), None);
        assert!(error.to_string().contains("503"));
        assert!(error.to_string().contains("/v1/players/nfl"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = FflError::from(json_error);

        match error {
            FflError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FflError::from(io_error);

        match error {
            FflError::Io(message) => assert!(message.contains("File not found")),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let db_error = rusqlite::Error::InvalidColumnType(
            0,
            "test_column".to_string(),
            rusqlite::types::Type::Null,
        );
        let error = FflError::from(db_error);

        match error {
            FflError::Storage(_) => (),
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let anyhow_error = anyhow::anyhow!("Test anyhow error message");
        let error = FflError::from(anyhow_error);

        match error {
            FflError::Storage(message) => {
                assert!(message.contains("Test anyhow error message"));
            }
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        let error = FflError::from(header_error);

        match error {
            FflError::Http(_) => (),
            _ => panic!("Expected Http error variant"),
        }
    }

    #[test]
    fn test_player_data_unavailable_message() {
        let error = FflError::PlayerDataUnavailable {
            sport: "nfl".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("player data unavailable"));
        assert!(error_string.contains("nfl"));
    }

    #[test]
    fn test_missing_config_error() {
        let error = FflError::MissingConfig {
            env_var: "FFL_SLEEPER_LEAGUE_ID".to_string(),
        };

        assert!(error.to_string().contains("FFL_SLEEPER_LEAGUE_ID"));
    }

    #[test]
    fn test_errors_clone_equal() {
        let error = FflError::UpstreamHttp {
            status: 404,
            url: "u".to_string(),
        };
        assert_eq!(error.clone(), error);
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(FflError::InvalidScoringClass {
                value: "ppr2".to_string(),
            })
        }

        match test_function().unwrap_err() {
            FflError::InvalidScoringClass { value } => assert_eq!(value, "ppr2"),
            _ => panic!("Expected InvalidScoringClass error"),
        }
    }
}
