// src/services.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MESSAGE_DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%z";
// always rendered in UTC
pub const LOCATION_DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Outside services the aggregation calls into.
pub trait Collaborators {
    fn generate_id(&self) -> String;

    fn now(&self) -> DateTime<Utc>;

    fn format_timestamp(&self, value: &DateTime<Utc>, pattern: &str) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCollaborators;

impl Collaborators for SystemCollaborators {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn format_timestamp(&self, value: &DateTime<Utc>, pattern: &str) -> String {
        value.format(pattern).to_string()
    }
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_wire_patterns() {
        let value = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 5).unwrap();

        assert_eq!(
            SystemCollaborators.format_timestamp(&value, MESSAGE_DATE_PATTERN),
            "2024-03-01T08:30:05+0000"
        );
        assert_eq!(
            SystemCollaborators.format_timestamp(&value, LOCATION_DATE_PATTERN),
            "2024-03-01T08:30:05Z"
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(SystemCollaborators.generate_id(), SystemCollaborators.generate_id());
    }
}
