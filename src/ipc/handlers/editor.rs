use crate::editor::{EditorMode, EditorState};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{current_session, required_day, required_str};
use crate::ipc::types::{AppState, Request};
use crate::timetable::{SlotWrite, Weekday};
use serde_json::{json, Value};

fn editor_state_json(editor: &EditorState) -> Value {
    match editor {
        EditorState::Closed => json!({ "open": false, "canSubmit": false }),
        EditorState::Open { mode, form } => {
            let (mode_name, editing) = match mode {
                EditorMode::Creating => ("create", Value::Null),
                EditorMode::Editing { day, time_range } => (
                    "edit",
                    json!({ "day": day.as_str(), "timeRange": time_range }),
                ),
            };
            json!({
                "open": true,
                "mode": mode_name,
                "editing": editing,
                "form": {
                    "day": form.day,
                    "timeRange": form.time_range,
                    "class": form.class,
                    "teacher": form.teacher,
                    "room": form.room,
                },
                "canSubmit": form.is_complete(),
            })
        }
    }
}

fn require_staff(state: &AppState, req: &Request) -> Result<(), serde_json::Value> {
    let session = current_session(state, req)?;
    if session.user.role.can_edit_timetable() {
        Ok(())
    } else {
        Err(err(
            &req.id,
            "forbidden",
            "timetable changes require a staff role",
            None,
        ))
    }
}

fn handle_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    ok(&req.id, editor_state_json(&state.editor))
}

fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    let mode = match required_str(req, "mode") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match mode.as_str() {
        "create" => {
            state.editor.open_create();
        }
        "edit" => {
            let day = match required_day(req, "day") {
                Ok(v) => v,
                Err(e) => return e,
            };
            let time_range = match required_str(req, "timeRange") {
                Ok(v) => v,
                Err(e) => return e,
            };
            let Some(slot) = state.timetable.get(day, &time_range) else {
                return err(&req.id, "not_found", "no slot at that day and time", None);
            };
            let slot = slot.clone();
            state.editor.open_edit(day, &time_range, &slot);
        }
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("mode must be create or edit, got {}", other),
                None,
            )
        }
    }
    ok(&req.id, editor_state_json(&state.editor))
}

fn handle_patch(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    let Some(fields) = req.params.get("fields").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "fields must be an object", None);
    };
    let Some(form) = state.editor.form_mut() else {
        return err(&req.id, "bad_params", "editor is not open", None);
    };
    for (key, value) in fields {
        let Some(text) = value.as_str() else {
            return err(&req.id, "bad_params", format!("{} must be a string", key), None);
        };
        if let Err(msg) = form.set_field(key, text) {
            return err(&req.id, "bad_params", msg, None);
        }
    }
    ok(&req.id, editor_state_json(&state.editor))
}

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    if !state.editor.is_open() {
        return err(&req.id, "bad_params", "editor is not open", None);
    }
    // A disabled submit control cannot fire; mirror that as a quiet
    // non-application instead of an error, leaving the editor open.
    if !state.editor.can_submit() {
        return ok(&req.id, json!({ "applied": false }));
    }

    // Validate the form before consuming the editor, so a rejected submit
    // leaves it open for correction.
    let (form_day, form_range) = match &state.editor {
        EditorState::Open { form, .. } => {
            (form.day.clone(), form.time_range.trim().to_string())
        }
        EditorState::Closed => (String::new(), String::new()),
    };
    let Some(day) = Weekday::parse(&form_day) else {
        return err(
            &req.id,
            "bad_params",
            format!("day must be a weekday (Monday..Friday), got {}", form_day),
            None,
        );
    };
    if !state.config.has_time_slot(&form_range) {
        return err(
            &req.id,
            "bad_params",
            format!("timeRange is not a configured slot: {}", form_range),
            None,
        );
    }

    let Some(submission) = state.editor.submit(day) else {
        return ok(&req.id, json!({ "applied": false }));
    };

    match state
        .timetable
        .create_or_update(submission.day, &submission.time_range, submission.input)
    {
        SlotWrite::Applied { slot_id, replaced } => ok(
            &req.id,
            json!({ "applied": true, "slotId": slot_id, "replaced": replaced }),
        ),
        SlotWrite::Ignored => ok(&req.id, json!({ "applied": false })),
    }
}

fn handle_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    state.editor.cancel();
    ok(&req.id, editor_state_json(&state.editor))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.editor.state" => Some(handle_state(state, req)),
        "timetable.editor.open" => Some(handle_open(state, req)),
        "timetable.editor.patch" => Some(handle_patch(state, req)),
        "timetable.editor.submit" => Some(handle_submit(state, req)),
        "timetable.editor.cancel" => Some(handle_cancel(state, req)),
        _ => None,
    }
}
