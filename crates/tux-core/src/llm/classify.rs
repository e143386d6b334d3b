//! Heuristic classification of upstream failures.
//!
//! Upstream errors arrive as free-form text (and, over HTTP, a status code).
//! The resilience layer only needs to know which of three buckets an error
//! falls into, so classification is a small set of substring checks.

use tux_types::error::ErrorKind;

/// Substrings that mark a failure as rate limiting / quota exhaustion.
const RATE_LIMIT_MARKERS: &[&str] = &["rate limit", "quota"];

/// Substrings that mark the requested model as unusable.
const MODEL_UNAVAILABLE_MARKERS: &[&str] = &[
    "model_not_found",
    "model_decommissioned",
    "does not exist",
    "has been decommissioned",
];

/// Classify an error from its text alone.
///
/// Case-insensitive: text containing "rate limit" or "quota" is
/// `RateLimited`, everything else is `TransientFailure`. Text-only errors are
/// never treated as configuration problems.
pub fn classify(error_text: &str) -> ErrorKind {
    let lower = error_text.to_lowercase();
    if RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m)) {
        ErrorKind::RateLimited
    } else {
        ErrorKind::TransientFailure
    }
}

/// Classify an HTTP error response.
///
/// 429 or rate-limit text is `RateLimited`. 404 or a body naming an unknown
/// or decommissioned model is `ConfigurationError`. Anything else, including
/// 401 and 5xx, is `TransientFailure`.
pub fn classify_status(status: u16, body: &str) -> ErrorKind {
    if status == 429 || classify(body) == ErrorKind::RateLimited {
        return ErrorKind::RateLimited;
    }
    if status == 404 || is_model_unavailable(body) {
        return ErrorKind::ConfigurationError;
    }
    ErrorKind::TransientFailure
}

fn is_model_unavailable(body: &str) -> bool {
    let lower = body.to_lowercase();
    MODEL_UNAVAILABLE_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_text() {
        assert_eq!(classify("Rate limit reached for model"), ErrorKind::RateLimited);
        assert_eq!(classify("RATE LIMIT"), ErrorKind::RateLimited);
    }

    #[test]
    fn test_quota_text() {
        assert_eq!(classify("You exceeded your current quota"), ErrorKind::RateLimited);
        assert_eq!(classify("Quota exhausted"), ErrorKind::RateLimited);
    }

    #[test]
    fn test_other_text_is_transient() {
        assert_eq!(classify("connection reset by peer"), ErrorKind::TransientFailure);
        assert_eq!(classify(""), ErrorKind::TransientFailure);
        assert_eq!(classify("model not found"), ErrorKind::TransientFailure);
    }

    #[test]
    fn test_status_429() {
        assert_eq!(classify_status(429, ""), ErrorKind::RateLimited);
    }

    #[test]
    fn test_status_with_rate_limit_body() {
        let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
        assert_eq!(classify_status(400, body), ErrorKind::RateLimited);
    }

    #[test]
    fn test_status_404_is_configuration() {
        assert_eq!(classify_status(404, "not found"), ErrorKind::ConfigurationError);
    }

    #[test]
    fn test_decommissioned_model_is_configuration() {
        let body = r#"{"error":{"message":"The model `old` has been decommissioned","code":"model_decommissioned"}}"#;
        assert_eq!(classify_status(400, body), ErrorKind::ConfigurationError);
    }

    #[test]
    fn test_server_errors_are_transient() {
        assert_eq!(classify_status(500, "internal"), ErrorKind::TransientFailure);
        assert_eq!(classify_status(503, "overloaded"), ErrorKind::TransientFailure);
        assert_eq!(classify_status(401, "invalid api key"), ErrorKind::TransientFailure);
    }
}
