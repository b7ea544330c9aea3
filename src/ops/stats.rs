// src/ops/stats.rs

use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::XP_PER_RATING_POINT,
    models::session::{Session, SessionStatus},
    store::Snapshot,
};

/// Inclusive XP ranges per level. Level 5 is open-ended.
const LEVEL_TIERS: [(u32, u32); 4] = [(0, 99), (100, 299), (300, 699), (700, 1499)];

/// Aggregate mentoring statistics, always re-derived from the full session
/// collection so they can never drift from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentorStats {
    pub xp: u32,
    pub level: u8,
    pub rating_avg: f64,
    pub rating_count: u32,
    /// Completed sessions mentored, rated or not. Only used for the
    /// leaderboard tie-break.
    pub completed_sessions: u32,
}

/// Maps XP to its level tier (1-5).
pub fn level_for_xp(xp: u32) -> u8 {
    for (i, (min, max)) in LEVEL_TIERS.iter().enumerate() {
        if (*min..=*max).contains(&xp) {
            return (i + 1) as u8;
        }
    }
    5
}

/// Recomputes a user's mentoring statistics with a linear scan over the
/// session collection.
///
/// Only completed sessions where the user mentored count; XP comes from the
/// mentor-side rating alone, ten points per star.
pub fn recompute_stats(sessions: &[Session], user_id: Uuid) -> MentorStats {
    let completed = sessions
        .iter()
        .filter(|s| s.mentor_id == user_id && s.status == SessionStatus::Completed);

    let mut completed_sessions = 0u32;
    let mut rating_sum = 0u32;
    let mut rating_count = 0u32;

    for session in completed {
        completed_sessions += 1;
        if let Some(rating) = session.rating_for_mentor {
            rating_sum += u32::from(rating);
            rating_count += 1;
        }
    }

    let xp = rating_sum * XP_PER_RATING_POINT;
    let rating_avg = if rating_count == 0 {
        0.0
    } else {
        f64::from(rating_sum) / f64::from(rating_count)
    };

    MentorStats {
        xp,
        level: level_for_xp(xp),
        rating_avg,
        rating_count,
        completed_sessions,
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub xp: u32,
    pub level: u8,
    pub rating_avg: f64,
    pub rating_count: u32,
    pub completed_sessions: u32,
}

/// All users ordered by xp desc, then rating average desc, then completed
/// mentor-session count desc, then id asc.
///
/// The id tie-break makes the order total, so equal users always render in
/// the same sequence. The returned iterator is finite and restartable by
/// calling again.
pub fn leaderboard(snapshot: &Snapshot) -> impl Iterator<Item = LeaderboardEntry> + '_ {
    let mut entries: Vec<LeaderboardEntry> = snapshot
        .users
        .iter()
        .map(|user| {
            let stats = recompute_stats(&snapshot.sessions, user.id);
            LeaderboardEntry {
                user_id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                xp: stats.xp,
                level: stats.level,
                rating_avg: stats.rating_avg,
                rating_count: stats.rating_count,
                completed_sessions: stats.completed_sessions,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.xp.cmp(&a.xp)
            .then_with(|| b.rating_avg.total_cmp(&a.rating_avg))
            .then_with(|| b.completed_sessions.cmp(&a.completed_sessions))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries.into_iter()
}
