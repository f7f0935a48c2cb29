use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Opens (creating if needed) the workspace store. The single `storage`
/// table mirrors the shell's key -> JSON-string local storage, which is
/// the only data the hub persists across reloads.
pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("hub.sqlite3");
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS storage(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

pub fn storage_set_json(
    conn: &Connection,
    key: &str,
    value: &serde_json::Value,
) -> anyhow::Result<()> {
    let text = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO storage(key, value) VALUES(?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, &text),
    )?;
    Ok(())
}

/// Reads a stored JSON value. A missing key and a value that no longer
/// parses as JSON both come back as `None`: corrupted storage is
/// discarded, never surfaced.
pub fn storage_get_json(conn: &Connection, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM storage WHERE key = ?", [key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(raw.and_then(|text| serde_json::from_str(&text).ok()))
}

pub fn storage_delete(conn: &Connection, key: &str) -> anyhow::Result<()> {
    conn.execute("DELETE FROM storage WHERE key = ?", [key])?;
    Ok(())
}
