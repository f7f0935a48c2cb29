use crate::ipc::error::ok;
use crate::ipc::helpers::{current_session, required_str};
use crate::ipc::types::{AppState, Request};
use crate::stats;
use serde_json::json;

fn handle_room_utilization(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let room = match required_str(req, "room") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let pct = stats::room_utilization(&state.timetable, state.config.time_slots.len(), &room);
    ok(
        &req.id,
        json!({ "room": room, "utilizationPercent": pct }),
    )
}

fn handle_teacher_workload(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let teacher = match required_str(req, "teacher") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let count = stats::teacher_workload(&state.timetable, &teacher);
    ok(&req.id, json!({ "teacher": teacher, "classCount": count }))
}

fn handle_weekly_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    let summary = stats::weekly_summary(&state.timetable);
    ok(
        &req.id,
        json!({
            "totalSlots": summary.total_slots,
            "distinctRooms": summary.distinct_rooms,
            "distinctTeachers": summary.distinct_teachers,
            "perDay": summary.per_day,
        }),
    )
}

fn handle_dashboard_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = current_session(state, req) {
        return e;
    }
    // Basic counts so the shell can show a useful dashboard without a
    // request per tile.
    let summary = stats::weekly_summary(&state.timetable);
    let total_entries = state.journal.len();
    let awaiting_response = state
        .journal
        .list(&Default::default())
        .iter()
        .filter(|e| e.teacher_response.is_none())
        .count();
    ok(
        &req.id,
        json!({
            "timetable": {
                "totalSlots": summary.total_slots,
                "distinctRooms": summary.distinct_rooms,
                "distinctTeachers": summary.distinct_teachers,
            },
            "journal": {
                "totalEntries": total_entries,
                "awaitingResponse": awaiting_response,
            }
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.stats.roomUtilization" => Some(handle_room_utilization(state, req)),
        "timetable.stats.teacherWorkload" => Some(handle_teacher_workload(state, req)),
        "timetable.stats.weeklySummary" => Some(handle_weekly_summary(state, req)),
        "dashboard.summary" => Some(handle_dashboard_summary(state, req)),
        _ => None,
    }
}
