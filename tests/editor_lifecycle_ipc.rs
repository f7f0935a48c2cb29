mod test_support;

use serde_json::json;
use test_support::{open_workspace_and_sign_in, request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn create_flow_submits_once_complete_and_closes() {
    let workspace = temp_dir("dthub-editor-create");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Mrs Bell", "teacher");

    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "timetable.editor.open",
        json!({ "mode": "create" }),
    );
    assert_eq!(opened["open"], true);
    assert_eq!(opened["mode"], "create");
    assert_eq!(opened["canSubmit"], false);

    // Partially filled form: submit is effectively disabled.
    let partial = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "timetable.editor.patch",
        json!({ "fields": { "day": "Friday", "timeRange": "13:00 - 14:00", "class": "9A" } }),
    );
    assert_eq!(partial["canSubmit"], false);

    let blocked = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "timetable.editor.submit",
        json!({}),
    );
    assert_eq!(blocked["applied"], false);
    let still_open = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "timetable.editor.state",
        json!({}),
    );
    assert_eq!(still_open["open"], true);

    let complete = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "timetable.editor.patch",
        json!({ "fields": { "teacher": "Mr Osei", "room": "DT2" } }),
    );
    assert_eq!(complete["canSubmit"], true);

    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "timetable.editor.submit",
        json!({}),
    );
    assert_eq!(submitted["applied"], true);

    let closed = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "timetable.editor.state",
        json!({}),
    );
    assert_eq!(closed["open"], false);

    let table = request_ok(&mut stdin, &mut reader, "8", "timetable.get", json!({}));
    assert_eq!(table["days"]["Friday"]["13:00 - 14:00"]["class"], "9A");
}

#[test]
fn edit_flow_prepopulates_from_target_slot() {
    let workspace = temp_dir("dthub-editor-edit");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Head", "admin");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "timetable.slots.save",
        json!({
            "day": "Monday",
            "timeRange": "08:45 - 09:45",
            "slot": { "class": "7A", "teacher": "Mr Ahmed", "room": "DT1" }
        }),
    );

    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "timetable.editor.open",
        json!({ "mode": "edit", "day": "Monday", "timeRange": "08:45 - 09:45" }),
    );
    assert_eq!(opened["mode"], "edit");
    assert_eq!(opened["editing"]["day"], "Monday");
    assert_eq!(opened["form"]["class"], "7A");
    assert_eq!(opened["form"]["teacher"], "Mr Ahmed");
    assert_eq!(opened["form"]["room"], "DT1");
    assert_eq!(opened["canSubmit"], true);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "timetable.editor.patch",
        json!({ "fields": { "room": "DT3" } }),
    );
    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "timetable.editor.submit",
        json!({}),
    );
    assert_eq!(submitted["applied"], true);
    assert_eq!(submitted["replaced"], true);

    let table = request_ok(&mut stdin, &mut reader, "5", "timetable.get", json!({}));
    assert_eq!(table["days"]["Monday"]["08:45 - 09:45"]["room"], "DT3");

    // Opening over an empty cell is not found.
    request_err(
        &mut stdin,
        &mut reader,
        "6",
        "timetable.editor.open",
        json!({ "mode": "edit", "day": "Tuesday", "timeRange": "08:45 - 09:45" }),
        "not_found",
    );
}

#[test]
fn cancel_discards_the_form() {
    let workspace = temp_dir("dthub-editor-cancel");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Mrs Bell", "teacher");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "timetable.editor.open",
        json!({ "mode": "create" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "timetable.editor.patch",
        json!({ "fields": {
            "day": "Monday", "timeRange": "08:45 - 09:45",
            "class": "7A", "teacher": "Mr Ahmed", "room": "DT1"
        } }),
    );
    let cancelled = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "timetable.editor.cancel",
        json!({}),
    );
    assert_eq!(cancelled["open"], false);

    // Nothing reached the slot store.
    let table = request_ok(&mut stdin, &mut reader, "4", "timetable.get", json!({}));
    assert_eq!(table["slotCount"], 0);

    // Re-opening starts from a blank form.
    let reopened = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "timetable.editor.open",
        json!({ "mode": "create" }),
    );
    assert_eq!(reopened["form"]["class"], "");
}

#[test]
fn patch_rejects_unknown_fields_and_closed_editor() {
    let workspace = temp_dir("dthub-editor-bad");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    open_workspace_and_sign_in(&mut stdin, &mut reader, &workspace, "Head", "admin");

    request_err(
        &mut stdin,
        &mut reader,
        "1",
        "timetable.editor.patch",
        json!({ "fields": { "class": "7A" } }),
        "bad_params",
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "timetable.editor.open",
        json!({ "mode": "create" }),
    );
    request_err(
        &mut stdin,
        &mut reader,
        "3",
        "timetable.editor.patch",
        json!({ "fields": { "period": "2" } }),
        "bad_params",
    );
}
