use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{current_session, optional_str, required_day, required_str};
use crate::ipc::types::{AppState, Request};
use crate::timetable::{RoomFilter, SlotInput, SlotWrite, Timetable, Weekday};
use serde_json::{json, Map, Value};

/// Serializes a timetable as `{ "<Day>": { "<timeRange>": slot } }` with
/// all five days present.
pub fn timetable_json(table: &Timetable) -> Value {
    let mut days = Map::new();
    for day in Weekday::ALL {
        let mut cells = Map::new();
        for (time_range, slot) in table.day(day) {
            cells.insert(
                time_range.clone(),
                json!({
                    "id": slot.id,
                    "class": slot.class,
                    "teacher": slot.teacher,
                    "room": slot.room,
                }),
            );
        }
        days.insert(day.as_str().to_string(), Value::Object(cells));
    }
    Value::Object(days)
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

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let room = optional_str(req, "room").unwrap_or_else(|| "all".to_string());
    let filter = RoomFilter::parse(&room);
    let view = state.timetable.filter_by_room(&filter);
    ok(
        &req.id,
        json!({
            "room": room,
            "days": timetable_json(&view),
            "slotCount": view.slot_count(),
        }),
    )
}

fn handle_slot_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let time_range = match required_str(req, "timeRange") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if !state.config.has_time_slot(&time_range) {
        return err(
            &req.id,
            "bad_params",
            format!("timeRange is not a configured slot: {}", time_range),
            None,
        );
    }
    let Some(slot) = req.params.get("slot").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "slot must be an object", None);
    };
    let field = |key: &str| {
        slot.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };

    let input = SlotInput::new(&field("class"), &field("teacher"), &field("room"));
    match state.timetable.create_or_update(day, &time_range, input) {
        SlotWrite::Applied { slot_id, replaced } => ok(
            &req.id,
            json!({ "applied": true, "slotId": slot_id, "replaced": replaced }),
        ),
        // Incomplete submissions are ignored, not rejected.
        SlotWrite::Ignored => ok(&req.id, json!({ "applied": false })),
    }
}

fn handle_slot_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = require_staff(state, req) {
        return e;
    }
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let time_range = match required_str(req, "timeRange") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let removed = state.timetable.delete(day, &time_range);
    ok(&req.id, json!({ "removed": removed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.get" => Some(handle_get(state, req)),
        "timetable.slots.save" => Some(handle_slot_save(state, req)),
        "timetable.slots.delete" => Some(handle_slot_delete(state, req)),
        _ => None,
    }
}
