use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{current_session, db_conn, parse_string_array};
use crate::ipc::types::{AppState, Request};
use crate::timetable::TimetableConfig;
use rusqlite::Connection;
use serde_json::{json, Map, Value};

const SECTION_TIMETABLE: &str = "setup.timetable";

const MAX_LIST_LEN: usize = 50;
const MAX_LABEL_LEN: usize = 60;

/// Stored section overlaid on the built-in defaults. Unknown or corrupted
/// stored values fall back to the defaults field by field.
pub fn load_timetable_config(conn: &Connection) -> TimetableConfig {
    let stored = db::storage_get_json(conn, SECTION_TIMETABLE)
        .ok()
        .flatten();
    let mut config = TimetableConfig::default();
    let Some(obj) = stored.as_ref().and_then(|v| v.as_object()) else {
        return config;
    };

    for (key, target) in [
        ("timeSlots", &mut config.time_slots),
        ("rooms", &mut config.rooms),
        ("teachers", &mut config.teachers),
        ("classes", &mut config.classes),
    ] {
        if let Ok(list) = parse_string_array(obj.get(key)) {
            if !list.is_empty() {
                *target = list;
            }
        }
    }
    config
}

fn validated_list(
    key: &str,
    value: &Value,
) -> Result<Vec<String>, String> {
    let list = parse_string_array(Some(value)).map_err(|m| format!("{} {}", key, m))?;
    if list.is_empty() {
        return Err(format!("{} must contain at least one entry", key));
    }
    if list.len() > MAX_LIST_LEN {
        return Err(format!("{} must have at most {} entries", key, MAX_LIST_LEN));
    }
    if let Some(long) = list.iter().find(|s| s.len() > MAX_LABEL_LEN) {
        return Err(format!(
            "{} entry too long: {} (max {} chars)",
            key, long, MAX_LABEL_LEN
        ));
    }
    Ok(list)
}

fn merge_timetable_patch(
    config: &mut TimetableConfig,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    for (k, v) in patch {
        match k.as_str() {
            "timeSlots" => config.time_slots = validated_list(k, v)?,
            "rooms" => config.rooms = validated_list(k, v)?,
            "teachers" => config.teachers = validated_list(k, v)?,
            "classes" => config.classes = validated_list(k, v)?,
            _ => return Err(format!("unknown timetable field: {}", k)),
        }
    }
    Ok(())
}

fn handle_settings_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    ok(&req.id, json!({ "timetable": &state.config }))
}

fn handle_settings_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match current_session(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    if !session.user.role.can_edit_timetable() {
        return err(
            &req.id,
            "forbidden",
            "timetable settings require a staff role",
            None,
        );
    }

    let Some(section) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    if section != "timetable" {
        return err(&req.id, "bad_params", "unknown section", None);
    }
    let Some(patch) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut updated = state.config.clone();
    if let Err(msg) = merge_timetable_patch(&mut updated, patch) {
        return err(&req.id, "bad_params", msg, None);
    }

    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let section_json = json!(&updated);
    if let Err(e) = db::storage_set_json(conn, SECTION_TIMETABLE, &section_json) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }

    state.config = updated;
    ok(&req.id, json!({ "ok": true, "timetable": section_json }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "settings.get" => Some(handle_settings_get(state, req)),
        "settings.update" => Some(handle_settings_update(state, req)),
        _ => None,
    }
}
