// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User role. The first account ever registered becomes the admin;
/// every later account is a student. Roles never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

/// Year of study, unset until the profile is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearOfStudy {
    First,
    Second,
    Third,
    Fourth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    ComputerScience,
    InformationTechnology,
    Electronics,
    Electrical,
    Mechanical,
    Civil,
    Other,
}

/// A registered participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Unique campus email.
    pub email: String,

    /// Stored as entered. Credentials are not a security boundary here;
    /// the password is ledger state and must round-trip with the snapshot.
    pub password: String,

    pub name: String,
    pub year: Option<YearOfStudy>,
    pub branch: Option<Branch>,
    pub bio: String,

    /// Distinct subjects this user can mentor; non-empty once the profile
    /// is completed.
    pub strong_subjects: Vec<String>,

    pub role: Role,

    /// Derived from completed, rated mentoring sessions. Never written
    /// directly; always recomputed from the session collection.
    pub xp: u32,
    pub level: u8,
    pub rating_avg: f64,
    pub rating_count: u32,

    /// Blocked users cannot authenticate. Scheduled sessions are unaffected.
    pub is_blocked: bool,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the caller should route this user to profile completion.
    pub fn profile_required(&self) -> bool {
        self.year.is_none() || self.strong_subjects.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// DTO for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email address is not well-formed."))]
    pub email: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for profile completion/editing. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub year: Option<YearOfStudy>,
    pub branch: Option<Branch>,
    pub bio: Option<String>,
    pub strong_subjects: Option<Vec<String>>,
}
