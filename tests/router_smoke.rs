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

fn request(
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
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = tempfile::tempdir().expect("temp workspace");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request(&mut stdin, &mut reader, "1", "health", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.path().to_string_lossy() }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "3",
        "session.current",
        json!({}),
    );

    let created = request(
        &mut stdin,
        &mut reader,
        "4",
        "students.create",
        json!({
            "name": "Smoke Student",
            "email": "smoke@school.test",
            "classId": "c1",
            "className": "10-A",
            "rollNumber": "17",
            "parentName": "Smoke Parent",
            "gender": "Female",
            "status": "Active",
            "attendanceRate": 93.5,
            "admissionDate": "2026-04-01"
        }),
    );
    let student_id = created
        .get("result")
        .and_then(|v| v.get("id"))
        .and_then(|v| v.as_str())
        .expect("generated student id")
        .to_string();
    assert!(!student_id.is_empty());

    let _ = request(&mut stdin, &mut reader, "5", "students.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "6",
        "students.query",
        json!({ "searchTerm": "smoke" }),
    );
    let _ = request(&mut stdin, &mut reader, "7", "students.ui", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "8",
        "students.uiPatch",
        json!({ "isCreateModalOpen": true, "selectedItems": [student_id] }),
    );
    let _ = request(&mut stdin, &mut reader, "9", "students.stats", json!({}));

    let _ = request(&mut stdin, &mut reader, "10", "teachers.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "11", "teachers.stats", json!({}));
    let _ = request(&mut stdin, &mut reader, "12", "classes.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "13", "fees.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "14", "fees.stats", json!({}));
    let _ = request(&mut stdin, &mut reader, "15", "salaries.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "16", "salaries.stats", json!({}));
    let _ = request(&mut stdin, &mut reader, "17", "events.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "18", "events.stats", json!({}));
    let _ = request(&mut stdin, &mut reader, "19", "admissions.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "20",
        "admissions.stats",
        json!({}),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "21",
        "notifications.list",
        json!({}),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "22",
        "notifications.stats",
        json!({}),
    );
    let _ = request(&mut stdin, &mut reader, "23", "logs.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "24",
        "dashboard.metrics",
        json!({}),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "25",
        "dashboard.refresh",
        json!({}),
    );
    let _ = request(&mut stdin, &mut reader, "26", "dashboard.cached", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "27",
        "students.delete",
        json!({ "id": "nonexistent" }),
    );

    // Sent raw: the request helper treats not_implemented as a failure.
    writeln!(
        stdin,
        "{}",
        json!({ "id": "99", "method": "bogus.method", "params": {} })
    )
    .expect("write unknown-method request");
    stdin.flush().expect("flush unknown-method request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read unknown-method response");
    let unknown: serde_json::Value =
        serde_json::from_str(line.trim()).expect("parse unknown-method response");
    assert_eq!(unknown.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        unknown
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
}
