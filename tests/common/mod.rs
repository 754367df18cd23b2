use std::cell::Cell;

use chrono::{DateTime, TimeZone, Utc};
use orderin_transformer::{
    aggregator::Aggregator,
    row::OrderInRow,
    services::{Collaborators, SystemCollaborators},
};
use serde_json::Value;

pub struct TestCollaborators {
    pub now: DateTime<Utc>,
    next_id: Cell<u32>,
}

impl Default for TestCollaborators {
    fn default() -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2024, 5, 6, 9, 30, 0).unwrap(),
            next_id: Cell::new(0),
        }
    }
}

impl Collaborators for TestCollaborators {
    fn generate_id(&self) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("generated-{id}")
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn format_timestamp(&self, value: &DateTime<Utc>, pattern: &str) -> String {
        SystemCollaborators.format_timestamp(value, pattern)
    }
}

pub fn aggregator() -> Aggregator<TestCollaborators> {
    Aggregator::new(TestCollaborators::default())
}

/// Builds a row from source column names, the way rows land in the source collection.
pub fn row(columns: Value) -> OrderInRow {
    serde_json::from_value(columns).expect("test row must decode")
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("document must serialize")
}
