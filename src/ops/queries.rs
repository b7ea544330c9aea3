// src/ops/queries.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{LedgerError, Result},
    ledger::Ledger,
    models::{
        notification::Notification,
        query::{PostQueryRequest, Query, QueryStatus},
        session::Session,
    },
};

/// Posts a new query for the given asker.
///
/// New queries go to the front of the collection so the feed reads
/// most-recent-first without sorting.
pub fn post_query(ledger: &mut Ledger, asker_id: Uuid, payload: PostQueryRequest) -> Result<Query> {
    if let Err(validation_errors) = payload.validate() {
        return Err(LedgerError::Validation(validation_errors.to_string()));
    }

    if ledger.snapshot().user(asker_id).is_none() {
        return Err(LedgerError::NotFound("user", asker_id));
    }

    let query = Query {
        id: Uuid::new_v4(),
        asker_id,
        title: payload.title,
        description: payload.description,
        subjects: payload.subjects,
        mentor_pref: payload.mentor_pref,
        mode_pref: payload.mode_pref,
        time_pref: payload.time_pref.unwrap_or_default(),
        status: QueryStatus::Open,
        created_at: Utc::now(),
    };

    let mut next = ledger.snapshot().clone();
    next.queries.insert(0, query.clone());
    ledger.commit(next)?;

    tracing::info!(query = %query.id, asker = %asker_id, "query posted");
    Ok(query)
}

/// Accepts an open query as its mentor.
///
/// The one cross-entity transaction in the system: the new session, the
/// query's flip to in-progress and the asker's notification are staged on
/// one candidate snapshot and committed together, so a failure anywhere
/// leaves all four collections exactly as they were.
pub fn accept_query(ledger: &mut Ledger, query_id: Uuid, mentor_id: Uuid) -> Result<Session> {
    let mut next = ledger.snapshot().clone();

    let mentor_name = next
        .user(mentor_id)
        .map(|u| if u.name.is_empty() { u.email.clone() } else { u.name.clone() })
        .ok_or(LedgerError::NotFound("user", mentor_id))?;

    let query_pos = next
        .queries
        .iter()
        .position(|q| q.id == query_id)
        .ok_or(LedgerError::NotFound("query", query_id))?;
    let query = &next.queries[query_pos];

    if mentor_id == query.asker_id {
        return Err(LedgerError::SelfAccept);
    }
    if next.session_for_query(query_id).is_some() {
        return Err(LedgerError::AlreadyMentored(query_id));
    }

    let now = Utc::now();
    let session = Session::schedule(query, mentor_id, now)?;

    let message = format!(
        "{} accepted your query \"{}\". Session scheduled for {}.",
        mentor_name,
        query.title,
        session.scheduled_at.format("%Y-%m-%d %H:%M UTC")
    );
    let asker_id = query.asker_id;

    // Stage all writes, then commit once.
    next.queries[query_pos].status = QueryStatus::InProgress;
    next.sessions.push(session.clone());
    next.notifications
        .push(Notification::new(asker_id, message, now));

    ledger.commit(next)?;

    tracing::info!(
        query = %query_id,
        session = %session.id,
        mentor = %mentor_id,
        "query accepted, session scheduled"
    );
    Ok(session)
}

/// The open-query feed, newest first.
pub fn open_queries(ledger: &Ledger) -> Vec<&Query> {
    ledger
        .snapshot()
        .queries
        .iter()
        .filter(|q| q.is_open())
        .collect()
}
