use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub body: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}
