//! Request id generation.

use uuid::Uuid;

/// Generates a new request id.
///
/// UUID v7 includes timestamp information, so ids sort in issue order
/// when they show up in logs.
#[must_use]
pub fn generate_request_id() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_version() {
        let id = generate_request_id();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_request_id_uniqueness() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();
        assert_ne!(id1, id2);
    }
}
