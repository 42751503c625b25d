use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_schooladmind");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn schooladmind");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn login_records_session_and_writes_the_token_slot() {
    let workspace = tempfile::tempdir().expect("temp workspace");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.path().to_string_lossy() }),
    );

    let login = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.login",
        json!({
            "user": { "id": "u1", "name": "Admin", "email": "admin@school.test", "role": "school-admin" },
            "token": "tok-123"
        }),
    );
    assert_eq!(login.get("loggedIn").and_then(|v| v.as_bool()), Some(true));

    let token = std::fs::read_to_string(workspace.path().join("token")).expect("token slot");
    assert_eq!(token.trim(), "tok-123");

    let current = request_ok(&mut stdin, &mut reader, "2", "session.current", json!({}));
    assert_eq!(
        current.get("isAuthenticated").and_then(|v| v.as_bool()),
        Some(true)
    );
    assert_eq!(
        current
            .get("user")
            .and_then(|u| u.get("role"))
            .and_then(|v| v.as_str()),
        Some("school-admin")
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn malformed_login_reports_false_instead_of_erroring() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let login = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.login",
        json!({ "user": { "id": "u1" } }),
    );
    assert_eq!(login.get("loggedIn").and_then(|v| v.as_bool()), Some(false));

    let current = request_ok(&mut stdin, &mut reader, "2", "session.current", json!({}));
    assert_eq!(
        current.get("isAuthenticated").and_then(|v| v.as_bool()),
        Some(false)
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn logout_clears_session_and_removes_the_token_slot() {
    let workspace = tempfile::tempdir().expect("temp workspace");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.path().to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.login",
        json!({
            "user": { "id": "u1", "name": "Admin", "email": "admin@school.test", "role": "school-admin" },
            "token": "tok-123"
        }),
    );

    let logout = request_ok(&mut stdin, &mut reader, "2", "session.logout", json!({}));
    assert_eq!(
        logout.get("loggedOut").and_then(|v| v.as_bool()),
        Some(true)
    );
    assert!(!workspace.path().join("token").exists());

    let current = request_ok(&mut stdin, &mut reader, "3", "session.current", json!({}));
    assert_eq!(
        current.get("isAuthenticated").and_then(|v| v.as_bool()),
        Some(false)
    );
    assert!(current.get("user").map(|u| u.is_null()).unwrap_or(true));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn authenticated_session_survives_a_restart_via_the_snapshot() {
    let workspace = tempfile::tempdir().expect("temp workspace");

    {
        let (mut child, mut stdin, mut reader) = spawn_sidecar();
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "ws",
            "workspace.select",
            json!({ "path": workspace.path().to_string_lossy() }),
        );
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "1",
            "session.login",
            json!({
                "user": { "id": "u1", "name": "Admin", "email": "admin@school.test", "role": "school-admin" },
                "token": "tok-123"
            }),
        );
        drop(stdin);
        let _ = child.wait();
    }

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let restored = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.path().to_string_lossy() }),
    );
    assert_eq!(
        restored.get("isAuthenticated").and_then(|v| v.as_bool()),
        Some(true)
    );

    let current = request_ok(&mut stdin, &mut reader, "1", "session.current", json!({}));
    assert_eq!(
        current.get("hasToken").and_then(|v| v.as_bool()),
        Some(true),
        "token slot re-read on workspace select"
    );

    drop(stdin);
    let _ = child.wait();
}
