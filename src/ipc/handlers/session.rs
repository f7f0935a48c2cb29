use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, required_str};
use crate::ipc::types::{AppState, Request};
use crate::session::{self, Role, Session};
use serde_json::json;

fn session_json(session: &Session) -> serde_json::Value {
    json!({
        "authenticated": true,
        "userId": session.user.id,
        "token": session.token,
        "user": {
            "id": session.user.id,
            "name": session.user.name,
            "role": session.user.role.as_str(),
            "signedInAt": session.user.signed_in_at,
        }
    })
}

fn handle_sign_in(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let role_raw = match required_str(req, "role") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(role) = Role::parse(&role_raw) else {
        return err(
            &req.id,
            "bad_params",
            "role must be one of: admin, teacher, pupil",
            None,
        );
    };

    match session::sign_in(conn, &name, role) {
        Ok(new_session) => {
            let body = session_json(&new_session);
            state.session = Some(new_session);
            ok(&req.id, body)
        }
        Err(e) => err(&req.id, "db_update_failed", e.to_string(), None),
    }
}

fn handle_restore(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };

    match session::restore(conn) {
        Ok(Some(restored)) => {
            let body = session_json(&restored);
            state.session = Some(restored);
            ok(&req.id, body)
        }
        Ok(None) => {
            state.session = None;
            ok(&req.id, json!({ "authenticated": false }))
        }
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

fn handle_sign_out(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };

    if let Err(e) = session::sign_out(conn) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }
    state.session = None;
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.signIn" => Some(handle_sign_in(state, req)),
        "session.restore" => Some(handle_restore(state, req)),
        "session.signOut" => Some(handle_sign_out(state, req)),
        _ => None,
    }
}
