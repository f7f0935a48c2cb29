use std::path::PathBuf;

use crate::editor::EditorState;
use crate::journal::JournalStore;
use crate::session::Session;
use crate::timetable::{Timetable, TimetableConfig};
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// All hub state, owned by the request loop and threaded through every
/// handler. The workspace db persists sessions and reference settings;
/// the timetable, editor and journal stores are session-only.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub session: Option<Session>,
    pub config: TimetableConfig,
    pub timetable: Timetable,
    pub editor: EditorState,
    pub journal: JournalStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            db: None,
            session: None,
            config: TimetableConfig::default(),
            timetable: Timetable::new(),
            editor: EditorState::Closed,
            journal: JournalStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
