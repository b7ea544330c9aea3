// src/error.rs

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all ledger operations.
///
/// Every failure is terminal for its operation and surfaces synchronously;
/// no operation mutates state before failing.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input (bad email shape, wrong campus domain, rating out of range).
    #[error("validation error: {0}")]
    Validation(String),

    /// An account already exists for this email; the caller should offer login.
    #[error("an account already exists for {0}")]
    DuplicateAccount(String),

    /// Email/password pair matched no account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account exists but was blocked by an administrator.
    #[error("this account has been blocked")]
    AccountBlocked,

    /// Resource lookup failure (user, query, session, notification).
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, Uuid),

    /// A user tried to mentor their own query.
    #[error("cannot accept your own query")]
    SelfAccept,

    /// The query already spawned a session; at most one mentor per query.
    #[error("query {0} already has a mentor")]
    AlreadyMentored(Uuid),

    /// The session outcome was already recorded and cannot be rewritten.
    #[error("session {0} has already been settled")]
    SessionSettled(Uuid),

    /// Ratings are only accepted once a session is marked completed.
    #[error("session {0} is not completed")]
    SessionNotCompleted(Uuid),

    /// Each rating slot on a session is written at most once.
    #[error("session {0} already has a {1} rating")]
    AlreadyRated(Uuid, &'static str),

    /// Persistence failure while writing the snapshot file.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A specialized Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
