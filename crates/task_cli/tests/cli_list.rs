use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_config_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskdesk-{nanos}-{file_name}"))
}

fn serve(responses: Vec<(&'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for (status_line, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buffer = [0u8; 8192];
            let _ = stream.read(&mut buffer);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}")
}

fn tasks_body(count: usize) -> String {
    let entries: Vec<String> = (1..=count)
        .map(|id| {
            format!(
                "{{\"id\": {id}, \"title\": \"task {id}\", \"description\": null, \"status\": \"todo\", \"due_date\": \"2025-09-29T13:00:00Z\", \"created_at\": null}}"
            )
        })
        .collect();
    format!("[{}]", entries.join(", "))
}

#[test]
fn list_renders_first_page_of_ten() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let base = serve(vec![("200 OK", tasks_body(15))]);

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKDESK_API_URL", &base)
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-1.json"))
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("task 1"));
    assert!(stdout.contains("task 10"));
    assert!(!stdout.contains("task 11"));
    assert!(stdout.contains("Due date"));
    assert!(stdout.contains("Page 1 of 2"));
}

#[test]
fn list_renders_partial_second_page() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let base = serve(vec![("200 OK", tasks_body(15))]);

    let output = Command::new(exe)
        .args(["list", "--page", "2"])
        .env("TASKDESK_API_URL", &base)
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-2.json"))
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("task 11"));
    assert!(stdout.contains("task 15"));
    assert!(!stdout.contains("task 10 "));
    assert!(stdout.contains("Page 2 of 2"));
}

#[test]
fn list_reports_out_of_range_page() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let base = serve(vec![("200 OK", tasks_body(15))]);

    let output = Command::new(exe)
        .args(["list", "--page", "3"])
        .env("TASKDESK_API_URL", &base)
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-3.json"))
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks on page 3 of 2."));
}

#[test]
fn list_reports_empty_collection() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let base = serve(vec![("200 OK", "[]".to_string())]);

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKDESK_API_URL", &base)
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-empty.json"))
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks found."));
}

#[test]
fn list_json_includes_page_metadata() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let base = serve(vec![("200 OK", tasks_body(15))]);

    let output = Command::new(exe)
        .args(["list", "--json", "--page", "2"])
        .env("TASKDESK_API_URL", &base)
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-json.json"))
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["page"], 2);
    assert_eq!(parsed["total_pages"], 2);
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["tasks"][0]["id"], 11);
}

#[test]
fn list_reports_unreachable_backend() {
    let exe = env!("CARGO_BIN_EXE_taskdesk");
    let output = Command::new(exe)
        .args(["list"])
        .env("TASKDESK_API_URL", "http://127.0.0.1:1")
        .env("TASKDESK_CONFIG_PATH", temp_config_path("list-down.json"))
        .output()
        .expect("failed to run list command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: http_error"));
}
