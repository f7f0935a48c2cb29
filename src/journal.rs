use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// One pupil learning-journal entry under review. Entries live only for
/// the lifetime of the process; the review screens operate on this store
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub pupil: String,
    pub class: String,
    pub subject: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub image_count: i64,
    pub teacher_response: Option<String>,
    pub ai_feedback: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub pupil: String,
    pub class: String,
    pub subject: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub image_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub class: Option<String>,
    pub pupil: Option<String>,
}

#[derive(Debug, Default)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, new: NewEntry) -> &JournalEntry {
        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            pupil: new.pupil,
            class: new.class,
            subject: new.subject,
            mood: new.mood,
            tags: new.tags,
            image_count: new.image_count.max(0),
            teacher_response: None,
            ai_feedback: None,
            created_at: now_iso(),
        };
        self.entries.push(entry);
        // Just pushed.
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries matching the filter, newest first.
    pub fn list(&self, filter: &EntryFilter) -> Vec<&JournalEntry> {
        let mut out: Vec<&JournalEntry> = self
            .entries
            .iter()
            .filter(|e| filter.class.as_deref().map(|c| e.class == c).unwrap_or(true))
            .filter(|e| filter.pupil.as_deref().map(|p| e.pupil == p).unwrap_or(true))
            .collect();
        out.reverse();
        out
    }

    /// Records (or replaces) the teacher's response on an entry.
    pub fn respond(&mut self, id: &str, response: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.teacher_response = Some(response.to_string());
                true
            }
            None => false,
        }
    }

    /// Write-back hook for the external AI collaborator.
    pub fn attach_ai_feedback(&mut self, id: &str, feedback: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.ai_feedback = Some(feedback.to_string());
                true
            }
            None => false,
        }
    }

    /// The downloadable review export. Entry bodies are flattened to the
    /// review-screen contract: response/feedback become presence booleans.
    pub fn export_payload(&self) -> Value {
        let entries: Vec<Value> = self
            .entries
            .iter()
            .map(|e| {
                json!({
                    "title": e.title,
                    "content": e.content,
                    "pupil": e.pupil,
                    "class": e.class,
                    "subject": e.subject,
                    "mood": e.mood,
                    "tags": e.tags,
                    "imageCount": e.image_count,
                    "hasTeacherResponse": e.teacher_response.is_some(),
                    "hasAIFeedback": e.ai_feedback.is_some(),
                    "createdAt": e.created_at,
                })
            })
            .collect();
        json!({
            "exportDate": now_iso(),
            "totalEntries": entries.len(),
            "entries": entries,
        })
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
