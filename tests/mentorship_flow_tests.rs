// tests/mentorship_flow_tests.rs

use mentorship_ledger::{
    Config, Ledger, LedgerError,
    models::{
        query::{ModePreference, PostQueryRequest, QueryStatus},
        session::{SessionMode, SessionStatus},
        user::{RegisterRequest, User},
    },
    ops::{accounts, notifications, queries, sessions, stats},
};
use uuid::Uuid;

fn open_ledger() -> Ledger {
    tracing_subscriber::fmt()
        .with_env_filter("error")
        .try_init()
        .ok();

    let path = std::env::temp_dir().join(format!("mentor-test-{}.json", Uuid::new_v4()));
    Ledger::open(Config::with_data_path(path)).expect("Failed to open test ledger.")
}

fn register(ledger: &mut Ledger, email: &str) -> User {
    accounts::register(
        ledger,
        RegisterRequest {
            email: email.to_string(),
            password: "password123".to_string(),
        },
    )
    .unwrap()
}

fn query_request(title: &str) -> PostQueryRequest {
    PostQueryRequest {
        title: title.to_string(),
        description: "Need help before the midterm.".to_string(),
        subjects: vec!["DSA".to_string()],
        mentor_pref: Default::default(),
        mode_pref: Default::default(),
        time_pref: Some("weekday evenings".to_string()),
    }
}

#[test]
fn test_accept_query_full_flow() {
    let mut ledger = open_ledger();

    // 1. Setup mentor A and asker B
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");

    // 2. B posts a query
    let query = queries::post_query(&mut ledger, b.id, query_request("Dijkstra")).unwrap();
    assert_eq!(query.status, QueryStatus::Open);
    assert_eq!(queries::open_queries(&ledger).len(), 1);

    // 3. A accepts it
    let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();
    assert_eq!(session.mentor_id, a.id);
    assert_eq!(session.mentee_id, b.id);
    assert_eq!(session.status, SessionStatus::Confirmed);
    assert_eq!(session.mode, SessionMode::Online);

    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.query(query.id).unwrap().status, QueryStatus::InProgress);
    assert_eq!(snapshot.sessions.len(), 1);
    assert!(queries::open_queries(&ledger).is_empty());

    // 4. Exactly one notification, addressed to B
    assert_eq!(snapshot.notifications.len(), 1);
    let note = &snapshot.notifications[0];
    assert_eq!(note.user_id, b.id);
    assert!(!note.read);
    assert!(note.message.contains("Dijkstra"));
    let note_id = note.id;

    assert_eq!(notifications::unread_count(&ledger, b.id), 1);
    notifications::mark_read(&mut ledger, note_id).unwrap();
    assert_eq!(notifications::unread_count(&ledger, b.id), 0);
    // Marking again is a no-op.
    let note_id = ledger.snapshot().notifications[0].id;
    notifications::mark_read(&mut ledger, note_id).unwrap();
}

#[test]
fn test_accept_query_is_exactly_once() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");
    let c = register(&mut ledger, "c@college.edu");

    let query = queries::post_query(&mut ledger, b.id, query_request("Graphs")).unwrap();
    queries::accept_query(&mut ledger, query.id, a.id).unwrap();

    let result = queries::accept_query(&mut ledger, query.id, c.id);
    assert!(matches!(result, Err(LedgerError::AlreadyMentored(_))));

    // The failed attempt changed nothing.
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.sessions.len(), 1);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.sessions[0].mentor_id, a.id);
}

#[test]
fn test_accept_own_query_fails_without_side_effects() {
    let mut ledger = open_ledger();
    register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");

    let query = queries::post_query(&mut ledger, b.id, query_request("Recursion")).unwrap();
    let result = queries::accept_query(&mut ledger, query.id, b.id);

    assert!(matches!(result, Err(LedgerError::SelfAccept)));
    let snapshot = ledger.snapshot();
    assert!(snapshot.sessions.is_empty());
    assert!(snapshot.notifications.is_empty());
    assert_eq!(snapshot.query(query.id).unwrap().status, QueryStatus::Open);
}

#[test]
fn test_offline_preference_flows_into_session() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");

    let mut request = query_request("Thermodynamics");
    request.mode_pref = ModePreference::Offline;
    let query = queries::post_query(&mut ledger, b.id, request).unwrap();

    let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();
    assert_eq!(session.mode, SessionMode::Offline);
}

#[test]
fn test_outcome_settles_once() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");
    let query = queries::post_query(&mut ledger, b.id, query_request("SQL")).unwrap();
    let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();

    let settled = sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
    assert_eq!(settled.status, SessionStatus::Completed);

    // Same outcome again: idempotent no-op.
    let again = sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
    assert_eq!(again.status, SessionStatus::Completed);

    // Conflicting outcome: rejected, status unchanged.
    let conflict = sessions::mark_outcome(&mut ledger, session.id, false);
    assert!(matches!(conflict, Err(LedgerError::SessionSettled(_))));
    assert_eq!(
        ledger.snapshot().session(session.id).unwrap().status,
        SessionStatus::Completed
    );
}

#[test]
fn test_rating_updates_mentor_stats() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");
    let query = queries::post_query(&mut ledger, b.id, query_request("Compilers")).unwrap();
    let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();

    sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
    sessions::rate_session(&mut ledger, session.id, 5, true).unwrap();

    let mentor = ledger.snapshot().user(a.id).unwrap();
    assert_eq!(mentor.xp, 50);
    assert_eq!(mentor.rating_count, 1);
    assert_eq!(mentor.rating_avg, 5.0);
    assert_eq!(mentor.level, 1);

    // Mentee-side rating is stored but never feeds stats.
    sessions::rate_session(&mut ledger, session.id, 2, false).unwrap();
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.session(session.id).unwrap().rating_for_mentee, Some(2));
    assert_eq!(snapshot.user(b.id).unwrap().xp, 0);
    assert_eq!(snapshot.user(a.id).unwrap().xp, 50);
}

#[test]
fn test_rating_guards() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");
    let query = queries::post_query(&mut ledger, b.id, query_request("Probability")).unwrap();
    let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();

    // Not completed yet
    let early = sessions::rate_session(&mut ledger, session.id, 4, true);
    assert!(matches!(early, Err(LedgerError::SessionNotCompleted(_))));

    // Out-of-range value
    sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
    let zero = sessions::rate_session(&mut ledger, session.id, 0, true);
    assert!(matches!(zero, Err(LedgerError::Validation(_))));
    let six = sessions::rate_session(&mut ledger, session.id, 6, true);
    assert!(matches!(six, Err(LedgerError::Validation(_))));

    // Each slot writes once
    sessions::rate_session(&mut ledger, session.id, 4, true).unwrap();
    let twice = sessions::rate_session(&mut ledger, session.id, 5, true);
    assert!(matches!(twice, Err(LedgerError::AlreadyRated(_, "mentor"))));

    // Unknown session is an explicit failure
    let missing = sessions::rate_session(&mut ledger, Uuid::new_v4(), 4, true);
    assert!(matches!(missing, Err(LedgerError::NotFound("session", _))));

    // No-show sessions take no ratings
    let query2 = queries::post_query(&mut ledger, b.id, query_request("Statistics")).unwrap();
    let session2 = queries::accept_query(&mut ledger, query2.id, a.id).unwrap();
    sessions::mark_outcome(&mut ledger, session2.id, false).unwrap();
    let no_show = sessions::rate_session(&mut ledger, session2.id, 5, true);
    assert!(matches!(no_show, Err(LedgerError::SessionNotCompleted(_))));
}

#[test]
fn test_level_up_across_sessions() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");

    // Three 5-star sessions: 150 XP, level 2.
    for i in 0..3 {
        let query =
            queries::post_query(&mut ledger, b.id, query_request(&format!("Topic {i}"))).unwrap();
        let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();
        sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
        sessions::rate_session(&mut ledger, session.id, 5, true).unwrap();
    }

    let mentor = ledger.snapshot().user(a.id).unwrap();
    assert_eq!(mentor.xp, 150);
    assert_eq!(mentor.level, 2);
    assert_eq!(mentor.rating_count, 3);
    assert_eq!(mentor.rating_avg, 5.0);

    assert_eq!(sessions::sessions_for_user(&ledger, a.id).len(), 3);
}

#[test]
fn test_leaderboard_ordering_and_tie_break() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");
    let c = register(&mut ledger, "c@college.edu");

    // A mentors one 5-star session; C mentors one 3-star session.
    let qa = queries::post_query(&mut ledger, b.id, query_request("Calculus")).unwrap();
    let sa = queries::accept_query(&mut ledger, qa.id, a.id).unwrap();
    sessions::mark_outcome(&mut ledger, sa.id, true).unwrap();
    sessions::rate_session(&mut ledger, sa.id, 5, true).unwrap();

    let qc = queries::post_query(&mut ledger, b.id, query_request("Algebra")).unwrap();
    let sc = queries::accept_query(&mut ledger, qc.id, c.id).unwrap();
    sessions::mark_outcome(&mut ledger, sc.id, true).unwrap();
    sessions::rate_session(&mut ledger, sc.id, 3, true).unwrap();

    let board: Vec<_> = stats::leaderboard(ledger.snapshot()).collect();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].user_id, a.id);
    assert_eq!(board[0].xp, 50);
    assert_eq!(board[1].user_id, c.id);
    assert_eq!(board[1].xp, 30);
    assert_eq!(board[2].user_id, b.id);
    assert_eq!(board[2].xp, 0);

    // The iterator restarts cleanly.
    let again: Vec<_> = stats::leaderboard(ledger.snapshot()).collect();
    assert_eq!(again.len(), 3);
    assert_eq!(again[0].user_id, a.id);
}

#[test]
fn test_leaderboard_ties_sort_by_id() {
    let mut ledger = open_ledger();
    let a = register(&mut ledger, "a@college.edu");
    let b = register(&mut ledger, "b@college.edu");

    // Both users are all-zero: equal xp, avg and session count.
    let board: Vec<_> = stats::leaderboard(ledger.snapshot()).collect();
    let mut expected = [a.id, b.id];
    expected.sort();
    assert_eq!(board[0].user_id, expected[0]);
    assert_eq!(board[1].user_id, expected[1]);
}

#[test]
fn test_full_state_round_trip_through_disk() {
    let path = std::env::temp_dir().join(format!("mentor-test-{}.json", Uuid::new_v4()));

    let (a_id, query_id, session_id) = {
        let mut ledger = Ledger::open(Config::with_data_path(&path)).unwrap();
        let a = register(&mut ledger, "a@college.edu");
        let b = register(&mut ledger, "b@college.edu");
        let query = queries::post_query(&mut ledger, b.id, query_request("Networks")).unwrap();
        let session = queries::accept_query(&mut ledger, query.id, a.id).unwrap();
        sessions::mark_outcome(&mut ledger, session.id, true).unwrap();
        sessions::rate_session(&mut ledger, session.id, 4, true).unwrap();
        (a.id, query.id, session.id)
    };

    let reopened = Ledger::open(Config::with_data_path(&path)).unwrap();
    let snapshot = reopened.snapshot();

    assert_eq!(snapshot.users.len(), 2);
    assert_eq!(snapshot.queries.len(), 1);
    assert_eq!(snapshot.sessions.len(), 1);
    assert_eq!(snapshot.notifications.len(), 1);

    assert_eq!(snapshot.query(query_id).unwrap().status, QueryStatus::InProgress);
    let session = snapshot.session(session_id).unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.rating_for_mentor, Some(4));
    assert_eq!(session.rating_for_mentee, None);

    let mentor = snapshot.user(a_id).unwrap();
    assert_eq!(mentor.xp, 40);
    assert_eq!(mentor.rating_avg, 4.0);
}
