// src/models/session.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{OFFLINE_MEETING_PLACEHOLDER, ONLINE_MEETING_PLACEHOLDER, SESSION_LEAD_MINUTES},
    error::{LedgerError, Result},
    models::query::{ModePreference, Query},
};

/// Sessions start Confirmed (there is no pending/negotiation state) and
/// settle exactly once into Completed or NoShow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Confirmed,
    Completed,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Online,
    Offline,
}

/// A scheduled mentoring meeting, 1:1 with the query that spawned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub query_id: Uuid,
    pub mentor_id: Uuid,

    /// Always the query's asker.
    pub mentee_id: Uuid,

    pub scheduled_at: DateTime<Utc>,
    pub mode: SessionMode,
    pub location_or_link: String,

    pub status: SessionStatus,

    /// Each rating slot is written at most once, after completion.
    pub rating_for_mentor: Option<u8>,
    pub rating_for_mentee: Option<u8>,

    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Builds the session a mentor's acceptance creates: scheduled one hour
    /// out, mode copied from the query's preference (Online unless the
    /// asker explicitly wanted Offline).
    ///
    /// Constructing a session where the mentor is the asker is impossible.
    pub fn schedule(query: &Query, mentor_id: Uuid, now: DateTime<Utc>) -> Result<Self> {
        if mentor_id == query.asker_id {
            return Err(LedgerError::SelfAccept);
        }

        let mode = match query.mode_pref {
            ModePreference::Offline => SessionMode::Offline,
            ModePreference::Online | ModePreference::Either => SessionMode::Online,
        };
        let location_or_link = match mode {
            SessionMode::Online => ONLINE_MEETING_PLACEHOLDER,
            SessionMode::Offline => OFFLINE_MEETING_PLACEHOLDER,
        }
        .to_string();

        Ok(Self {
            id: Uuid::new_v4(),
            query_id: query.id,
            mentor_id,
            mentee_id: query.asker_id,
            scheduled_at: now + Duration::minutes(SESSION_LEAD_MINUTES),
            mode,
            location_or_link,
            status: SessionStatus::Confirmed,
            rating_for_mentor: None,
            rating_for_mentee: None,
            created_at: now,
        })
    }

    /// Completed and NoShow are terminal.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, SessionStatus::Completed | SessionStatus::NoShow)
    }
}
