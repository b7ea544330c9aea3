// src/ops/accounts.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{LedgerError, Result},
    ledger::Ledger,
    models::user::{RegisterRequest, Role, UpdateProfileRequest, User},
};

/// Registers a new account and signs it in.
///
/// The first account ever created becomes the admin; everyone after is a
/// student. Emails must carry the campus domain suffix.
pub fn register(ledger: &mut Ledger, payload: RegisterRequest) -> Result<User> {
    if let Err(validation_errors) = payload.validate() {
        return Err(LedgerError::Validation(validation_errors.to_string()));
    }

    let domain = &ledger.config().email_domain;
    if !payload.email.ends_with(domain.as_str()) {
        return Err(LedgerError::Validation(format!(
            "Please use your campus email ({domain})."
        )));
    }

    if ledger.snapshot().user_by_email(&payload.email).is_some() {
        return Err(LedgerError::DuplicateAccount(payload.email));
    }

    let role = if ledger.snapshot().users.is_empty() {
        Role::Admin
    } else {
        Role::Student
    };

    let user = User {
        id: Uuid::new_v4(),
        email: payload.email,
        password: payload.password,
        name: String::new(),
        year: None,
        branch: None,
        bio: String::new(),
        strong_subjects: Vec::new(),
        role,
        xp: 0,
        level: 1,
        rating_avg: 0.0,
        rating_count: 0,
        is_blocked: false,
        created_at: Utc::now(),
    };

    let mut next = ledger.snapshot().clone();
    next.users.push(user.clone());
    ledger.commit(next)?;
    ledger.set_active_user(Some(user.id));

    tracing::info!(user = %user.id, role = ?user.role, "account registered");
    Ok(user)
}

/// What the caller needs after a successful login.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    /// True when year or strong subjects are still unset, i.e. the caller
    /// should route to profile completion before the feed.
    pub profile_required: bool,
}

/// Authenticates by exact email/password match and signs the user in.
pub fn authenticate(ledger: &mut Ledger, email: &str, password: &str) -> Result<AuthOutcome> {
    let user = ledger
        .snapshot()
        .user_by_email(email)
        .filter(|u| u.password == password)
        .cloned()
        .ok_or(LedgerError::InvalidCredentials)?;

    if user.is_blocked {
        tracing::warn!(user = %user.id, "blocked account attempted login");
        return Err(LedgerError::AccountBlocked);
    }

    ledger.set_active_user(Some(user.id));
    let profile_required = user.profile_required();
    Ok(AuthOutcome {
        user,
        profile_required,
    })
}

/// Clears the active identity.
pub fn sign_out(ledger: &mut Ledger) {
    ledger.set_active_user(None);
}

/// Merges the provided profile fields into the user.
///
/// Field presence rules ("name, year, at least one subject") are the form
/// layer's job; this layer only keeps the subject list distinct.
pub fn update_profile(
    ledger: &mut Ledger,
    user_id: Uuid,
    payload: UpdateProfileRequest,
) -> Result<User> {
    let mut next = ledger.snapshot().clone();
    let user = next
        .user_mut(user_id)
        .ok_or(LedgerError::NotFound("user", user_id))?;

    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(year) = payload.year {
        user.year = Some(year);
    }
    if let Some(branch) = payload.branch {
        user.branch = Some(branch);
    }
    if let Some(bio) = payload.bio {
        user.bio = bio;
    }
    if let Some(subjects) = payload.strong_subjects {
        user.strong_subjects = dedup_subjects(subjects);
    }

    let updated = user.clone();
    ledger.commit(next)?;
    Ok(updated)
}

/// Toggles the moderation flag on an account.
///
/// Admin-only by contract; the role check sits with the caller. Blocking
/// does not touch sessions that are already scheduled.
pub fn set_blocked(ledger: &mut Ledger, user_id: Uuid, blocked: bool) -> Result<User> {
    let mut next = ledger.snapshot().clone();
    let user = next
        .user_mut(user_id)
        .ok_or(LedgerError::NotFound("user", user_id))?;
    user.is_blocked = blocked;

    let updated = user.clone();
    ledger.commit(next)?;

    tracing::info!(user = %user_id, blocked, "moderation flag updated");
    Ok(updated)
}

/// Keeps first occurrences, drops later duplicates.
fn dedup_subjects(subjects: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(subjects.len());
    for subject in subjects {
        if !seen.contains(&subject) {
            seen.push(subject);
        }
    }
    seen
}
