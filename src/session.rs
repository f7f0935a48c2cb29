use crate::db;
use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

// Storage keys shared with the shell's local storage.
const KEY_USER_ID: &str = "userId";
const KEY_TOKEN: &str = "token";
const KEY_USER_DATA: &str = "userData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Pupil,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "pupil" => Some(Role::Pupil),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Pupil => "pupil",
        }
    }

    /// Staff roles may edit the timetable and reference settings.
    pub fn can_edit_timetable(self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }

    pub fn can_review_journal(self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub signed_in_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserData,
    pub token: String,
}

/// Issues a fresh session and persists it under the shell's storage keys.
pub fn sign_in(conn: &Connection, name: &str, role: Role) -> anyhow::Result<Session> {
    let user = UserData {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        role,
        signed_in_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    let token = Uuid::new_v4().to_string();

    db::storage_set_json(conn, KEY_USER_ID, &json!(user.id))?;
    db::storage_set_json(conn, KEY_TOKEN, &json!(token))?;
    db::storage_set_json(conn, KEY_USER_DATA, &serde_json::to_value(&user)?)?;

    Ok(Session { user, token })
}

/// Restores a persisted session. Any missing, corrupted or inconsistent
/// value falls back to the unauthenticated state rather than erroring.
pub fn restore(conn: &Connection) -> anyhow::Result<Option<Session>> {
    let user_id = db::storage_get_json(conn, KEY_USER_ID)?
        .and_then(|v| v.as_str().map(|s| s.to_string()));
    let token =
        db::storage_get_json(conn, KEY_TOKEN)?.and_then(|v| v.as_str().map(|s| s.to_string()));
    let user = db::storage_get_json(conn, KEY_USER_DATA)?
        .and_then(|v| serde_json::from_value::<UserData>(v).ok());

    let (Some(user_id), Some(token), Some(user)) = (user_id, token, user) else {
        return Ok(None);
    };
    if user.id != user_id {
        return Ok(None);
    }
    Ok(Some(Session { user, token }))
}

pub fn sign_out(conn: &Connection) -> anyhow::Result<()> {
    db::storage_delete(conn, KEY_USER_ID)?;
    db::storage_delete(conn, KEY_TOKEN)?;
    db::storage_delete(conn, KEY_USER_DATA)?;
    Ok(())
}
