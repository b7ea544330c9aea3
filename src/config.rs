// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// XP minted per rating point a mentor receives (a 5-star session = 50 XP).
pub const XP_PER_RATING_POINT: u32 = 10;

/// How far ahead of acceptance a session is scheduled, in minutes.
pub const SESSION_LEAD_MINUTES: i64 = 60;

/// Placeholder meeting locations until real scheduling exists.
pub const ONLINE_MEETING_PLACEHOLDER: &str = "Virtual meeting room (link shared in chat)";
pub const OFFLINE_MEETING_PLACEHOLDER: &str = "Campus library, group study room";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the serialized ledger snapshot lives on disk.
    pub data_path: PathBuf,

    /// Required suffix for account emails, e.g. "@college.edu".
    pub email_domain: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_path = env::var("MENTOR_DATA_PATH")
            .unwrap_or_else(|_| "data/mentorship.json".to_string())
            .into();

        let email_domain =
            env::var("CAMPUS_EMAIL_DOMAIN").unwrap_or_else(|_| "@college.edu".to_string());

        Self {
            data_path,
            email_domain,
        }
    }

    /// Config pointing at a specific data file, campus domain left at the default.
    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: path.into(),
            email_domain: "@college.edu".to_string(),
        }
    }
}
