// src/models/query.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A query is Open until a mentor accepts it. It never reopens; whether the
/// help actually happened is tracked on the session, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Open,
    InProgress,
}

/// Who the asker would prefer as mentor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentorPreference {
    #[default]
    Any,
    Senior,
    SameYear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePreference {
    #[default]
    Either,
    Online,
    Offline,
}

/// A posted request for academic help.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub id: Uuid,
    pub asker_id: Uuid,

    pub title: String,
    pub description: String,

    /// Subject tags, at least one.
    pub subjects: Vec<String>,

    pub mentor_pref: MentorPreference,
    pub mode_pref: ModePreference,

    /// Free-text time preference ("weekday evenings", "before exams"...).
    pub time_pref: String,

    pub status: QueryStatus,
    pub created_at: DateTime<Utc>,
}

impl Query {
    pub fn is_open(&self) -> bool {
        self.status == QueryStatus::Open
    }
}

/// DTO for posting a query.
#[derive(Debug, Deserialize, Validate)]
pub struct PostQueryRequest {
    #[validate(length(min = 1, max = 120, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Description must not be empty."))]
    pub description: String,
    #[validate(length(min = 1, message = "At least one subject tag is required."))]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub mentor_pref: MentorPreference,
    #[serde(default)]
    pub mode_pref: ModePreference,
    #[serde(default)]
    pub time_pref: Option<String>,
}
