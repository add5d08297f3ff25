//! HTTP status classification.

use serde::{Deserialize, Serialize};

/// Outcome class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Success,
    Authentication,
    BadRequest,
    Outdated,
    Failed,
}

/// Map a status code to its class. Total over every `u16`.
///
/// The ranges are the metadata service's conventions, not plain HTTP ones:
/// 401-500 all mean the key was rejected, 501-599 mean the request was
/// malformed, and 600 signals that this client is too old for the API.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401..=500 => StatusClass::Authentication,
        501..=599 => StatusClass::BadRequest,
        600 => StatusClass::Outdated,
        _ => StatusClass::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_boundaries() {
        assert_eq!(classify_status(199), StatusClass::Failed);
        assert_eq!(classify_status(200), StatusClass::Success);
        assert_eq!(classify_status(299), StatusClass::Success);
        assert_eq!(classify_status(300), StatusClass::Failed);
        assert_eq!(classify_status(400), StatusClass::Failed);
        assert_eq!(classify_status(401), StatusClass::Authentication);
        assert_eq!(classify_status(500), StatusClass::Authentication);
        assert_eq!(classify_status(501), StatusClass::BadRequest);
        assert_eq!(classify_status(599), StatusClass::BadRequest);
        assert_eq!(classify_status(600), StatusClass::Outdated);
        assert_eq!(classify_status(601), StatusClass::Failed);
    }

    #[test]
    fn test_every_code_maps_to_exactly_one_class() {
        for status in (100..=599).chain(std::iter::once(600)) {
            let class = classify_status(status);
            let expected = if (200..=299).contains(&status) {
                StatusClass::Success
            } else if (401..=500).contains(&status) {
                StatusClass::Authentication
            } else if (501..=599).contains(&status) {
                StatusClass::BadRequest
            } else if status == 600 {
                StatusClass::Outdated
            } else {
                StatusClass::Failed
            };
            assert_eq!(class, expected, "status {}", status);
            // Deterministic
            assert_eq!(classify_status(status), class);
        }
    }
}
