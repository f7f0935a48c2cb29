#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dthubd"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn dthubd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

pub fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
) -> Value {
    let line = serde_json::to_string(&json!({
        "id": id,
        "method": method,
        "params": params,
    }))
    .expect("serialize request");
    writeln!(stdin, "{}", line).expect("write request");
    stdin.flush().expect("flush request");

    let mut resp_line = String::new();
    reader.read_line(&mut resp_line).expect("read response");
    serde_json::from_str(&resp_line).expect("parse response")
}

/// Sends a request and returns its `result`, asserting success.
pub fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
) -> Value {
    let resp = request(stdin, reader, id, method, params);
    assert_eq!(resp["ok"], true, "expected ok response, got {resp}");
    assert_eq!(resp["id"], id);
    resp["result"].clone()
}

/// Sends a request and asserts it fails with the given error code.
pub fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
    expected_code: &str,
) -> Value {
    let resp = request(stdin, reader, id, method, params);
    assert_eq!(resp["ok"], false, "expected error response, got {resp}");
    assert_eq!(
        resp["error"]["code"], expected_code,
        "unexpected error code in {resp}"
    );
    resp["error"].clone()
}

pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Selects a workspace and signs in, the preamble nearly every scenario
/// needs. Returns nothing; panics on failure.
pub fn open_workspace_and_sign_in(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    workspace: &std::path::Path,
    name: &str,
    role: &str,
) {
    let _ = request_ok(
        stdin,
        reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        stdin,
        reader,
        "auth",
        "session.signIn",
        json!({ "name": name, "role": role }),
    );
}
