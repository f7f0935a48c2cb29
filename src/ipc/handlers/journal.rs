use crate::export;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{current_session, optional_str, parse_string_array, required_str};
use crate::ipc::types::{AppState, Request};
use crate::journal::{EntryFilter, JournalEntry, NewEntry};
use serde_json::json;
use std::path::PathBuf;

fn entry_json(entry: &JournalEntry) -> serde_json::Value {
    json!({
        "id": entry.id,
        "title": entry.title,
        "content": entry.content,
        "pupil": entry.pupil,
        "class": entry.class,
        "subject": entry.subject,
        "mood": entry.mood,
        "tags": entry.tags,
        "imageCount": entry.image_count,
        "teacherResponse": entry.teacher_response,
        "aiFeedback": entry.ai_feedback,
        "createdAt": entry.created_at,
    })
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let pupil = match current_session(state, req) {
        Ok(s) => s.user.name.clone(),
        Err(e) => return e,
    };
    let title = match required_str(req, "title") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let content = match required_str(req, "content") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let class = match required_str(req, "class") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject = match required_str(req, "subject") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let tags = match parse_string_array(req.params.get("tags")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("tags {}", m), None),
    };
    let image_count = req
        .params
        .get("imageCount")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    let mood = optional_str(req, "mood").unwrap_or_default();

    let entry = state.journal.add(NewEntry {
        title,
        content,
        pupil,
        class,
        subject,
        mood,
        tags,
        image_count,
    });
    ok(&req.id, json!({ "entry": entry_json(entry) }))
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let filter = EntryFilter {
        class: optional_str(req, "class"),
        pupil: optional_str(req, "pupil"),
    };
    let entries: Vec<serde_json::Value> =
        state.journal.list(&filter).into_iter().map(entry_json).collect();
    ok(&req.id, json!({ "entries": entries }))
}

fn handle_respond(state: &mut AppState, req: &Request) -> serde_json::Value {
    match current_session(state, req) {
        Ok(session) if session.user.role.can_review_journal() => {}
        Ok(_) => {
            return err(
                &req.id,
                "forbidden",
                "journal responses require a staff role",
                None,
            )
        }
        Err(e) => return e,
    }
    let entry_id = match required_str(req, "entryId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let response = match required_str(req, "response") {
        Ok(v) => v,
        Err(e) => return e,
    };

    if !state.journal.respond(&entry_id, &response) {
        return err(&req.id, "not_found", "journal entry not found", None);
    }
    match state.journal.get(&entry_id) {
        Some(entry) => ok(&req.id, json!({ "entry": entry_json(entry) })),
        None => err(&req.id, "not_found", "journal entry not found", None),
    }
}

fn handle_attach_ai_feedback(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let entry_id = match required_str(req, "entryId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let feedback = match required_str(req, "feedback") {
        Ok(v) => v,
        Err(e) => return e,
    };

    if !state.journal.attach_ai_feedback(&entry_id, &feedback) {
        return err(&req.id, "not_found", "journal entry not found", None);
    }
    ok(&req.id, json!({ "ok": true }))
}

fn handle_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    match current_session(state, req) {
        Ok(session) if session.user.role.can_review_journal() => {}
        Ok(_) => {
            return err(
                &req.id,
                "forbidden",
                "journal export requires a staff role",
                None,
            )
        }
        Err(e) => return e,
    }
    let out_path = match required_str(req, "outPath") {
        Ok(v) => PathBuf::from(v),
        Err(e) => return e,
    };
    let bundle = req
        .params
        .get("bundle")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let payload = state.journal.export_payload();
    let written = if bundle {
        export::write_journal_bundle(&out_path, &payload)
    } else {
        export::write_journal_export(&out_path, &payload)
    };
    match written {
        Ok(summary) => ok(
            &req.id,
            json!({
                "outPath": out_path.to_string_lossy(),
                "totalEntries": summary.entry_count,
                "bundleFormat": summary.bundle_format,
            }),
        ),
        Err(e) => err(&req.id, "export_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "journal.entries.create" => Some(handle_create(state, req)),
        "journal.entries.list" => Some(handle_list(state, req)),
        "journal.entries.respond" => Some(handle_respond(state, req)),
        "journal.entries.attachAiFeedback" => Some(handle_attach_ai_feedback(state, req)),
        "journal.export" => Some(handle_export(state, req)),
        _ => None,
    }
}
