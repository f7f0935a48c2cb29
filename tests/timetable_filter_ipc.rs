mod test_support;

use serde_json::json;
use test_support::{open_workspace_and_sign_in, request_ok, spawn_sidecar, temp_dir};

fn seed_week(
    stdin: &mut std::process::ChildStdin,
    reader: &mut std::io::BufReader<std::process::ChildStdout>,
) {
    let slots = [
        ("Monday", "08:45 - 09:45", "7A", "Mr Ahmed", "DT1"),
        ("Monday", "09:45 - 10:45", "7B", "Mrs Bell", "DT2"),
        ("Tuesday", "11:00 - 12:00", "8A", "Ms Clarke", "DT1"),
        ("Thursday", "13:00 - 14:00", "9A", "Mr Osei", "DT3"),
    ];
    for (i, (day, time_range, class, teacher, room)) in slots.iter().enumerate() {
        let saved = request_ok(
            stdin,
            reader,
            &format!("seed-{i}"),
            "timetable.slots.save",
            json!({
                "day": day,
                "timeRange": time_range,
                "slot": { "class": class, "teacher": teacher, "room": room }
            }),
        );
        assert_eq!(saved["applied"], true);
    }
}

#[test]
fn filter_all_equals_unfiltered_view() {
    let workspace = temp_dir("dthub-filter-all");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Head", "admin");
    seed_week(&mut stdin, &mut reader);

    let unfiltered = request_ok(&mut stdin, &mut reader, "1", "timetable.get", json!({}));
    let all = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "timetable.get",
        json!({ "room": "all" }),
    );
    assert_eq!(all["days"], unfiltered["days"]);
    assert_eq!(all["slotCount"], 4);
}

#[test]
fn room_filter_is_sound_complete_and_keeps_empty_days() {
    let workspace = temp_dir("dthub-filter-room");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Head", "admin");
    seed_week(&mut stdin, &mut reader);

    let view = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "timetable.get",
        json!({ "room": "DT1" }),
    );
    assert_eq!(view["slotCount"], 2);

    let days = view["days"].as_object().expect("days object");
    // Every weekday appears even when it has no matching slots.
    for day in ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"] {
        assert!(days.contains_key(day), "missing day {day}");
    }
    assert!(days["Wednesday"].as_object().unwrap().is_empty());
    assert!(days["Thursday"].as_object().unwrap().is_empty());

    // Soundness: everything in the view is in DT1.
    for cells in days.values() {
        for slot in cells.as_object().unwrap().values() {
            assert_eq!(slot["room"], "DT1");
        }
    }
    // Completeness: both DT1 slots are present.
    assert_eq!(days["Monday"]["08:45 - 09:45"]["class"], "7A");
    assert_eq!(days["Tuesday"]["11:00 - 12:00"]["class"], "8A");
}
