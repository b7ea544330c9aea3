// src/ops/sessions.rs

use uuid::Uuid;

use crate::{
    error::{LedgerError, Result},
    ledger::Ledger,
    models::session::{Session, SessionStatus},
    ops::stats,
};

/// Records whether the session happened. Either participant may call this.
///
/// A settled session stays settled: re-marking with the same outcome is a
/// no-op, re-marking with the other outcome is rejected. Flipping between
/// completed and no-show would silently mint or destroy mentor XP.
pub fn mark_outcome(ledger: &mut Ledger, session_id: Uuid, did_happen: bool) -> Result<Session> {
    let target = if did_happen {
        SessionStatus::Completed
    } else {
        SessionStatus::NoShow
    };

    let current = ledger
        .snapshot()
        .session(session_id)
        .ok_or(LedgerError::NotFound("session", session_id))?;

    if current.is_settled() {
        if current.status == target {
            return Ok(current.clone());
        }
        return Err(LedgerError::SessionSettled(session_id));
    }

    let mut next = ledger.snapshot().clone();
    let session = next
        .session_mut(session_id)
        .ok_or(LedgerError::NotFound("session", session_id))?;
    session.status = target;
    let settled = session.clone();

    ledger.commit(next)?;

    tracing::info!(session = %session_id, status = ?target, "session settled");
    Ok(settled)
}

/// Rates one side of a completed session.
///
/// `rate_mentor = true` writes the mentor's rating and synchronously
/// recomputes the mentor's aggregate statistics in the same commit; mentee
/// ratings are stored but never feed statistics (mentoring earns XP,
/// asking does not). Each slot is written at most once.
pub fn rate_session(
    ledger: &mut Ledger,
    session_id: Uuid,
    rating: u8,
    rate_mentor: bool,
) -> Result<Session> {
    if !(1..=5).contains(&rating) {
        return Err(LedgerError::Validation(format!(
            "Rating must be between 1 and 5, got {rating}."
        )));
    }

    let mut next = ledger.snapshot().clone();
    let session = next
        .session_mut(session_id)
        .ok_or(LedgerError::NotFound("session", session_id))?;

    if session.status != SessionStatus::Completed {
        return Err(LedgerError::SessionNotCompleted(session_id));
    }

    let slot = if rate_mentor {
        &mut session.rating_for_mentor
    } else {
        &mut session.rating_for_mentee
    };
    if slot.is_some() {
        let side = if rate_mentor { "mentor" } else { "mentee" };
        return Err(LedgerError::AlreadyRated(session_id, side));
    }
    *slot = Some(rating);

    let mentor_id = session.mentor_id;
    let rated = session.clone();

    if rate_mentor {
        let mentor_stats = stats::recompute_stats(&next.sessions, mentor_id);
        let mentor = next
            .user_mut(mentor_id)
            .ok_or(LedgerError::NotFound("user", mentor_id))?;
        mentor.xp = mentor_stats.xp;
        mentor.level = mentor_stats.level;
        mentor.rating_avg = mentor_stats.rating_avg;
        mentor.rating_count = mentor_stats.rating_count;
    }

    ledger.commit(next)?;
    Ok(rated)
}

/// All sessions the user participates in, newest first.
pub fn sessions_for_user(ledger: &Ledger, user_id: Uuid) -> Vec<&Session> {
    let mut sessions: Vec<&Session> = ledger
        .snapshot()
        .sessions
        .iter()
        .filter(|s| s.mentor_id == user_id || s.mentee_id == user_id)
        .collect();
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sessions
}
