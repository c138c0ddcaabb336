use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use test_support::{cmd_bin, read_fixture_json, tempdir};

/// Answer one search request with `body`, handing back the raw request text.
fn serve_once(body: String) -> (String, thread::JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();

  let handle = thread::spawn(move || {
    let (mut stream, _) = listener.accept().unwrap();
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
      match stream.read(&mut buf) {
        Ok(0) | Err(_) => break,
        Ok(n) => request.extend_from_slice(&buf[..n]),
      }
    }

    let resp = format!(
      "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
      body.len()
    );
    let _ = stream.write_all(resp.as_bytes());
    String::from_utf8_lossy(&request).to_string()
  });

  (format!("http://{addr}/rest/api/2/search"), handle)
}

#[test]
fn credentials_are_read_from_dotenv_in_working_dir() {
  let pages: Vec<Value> = read_fixture_json("search_pages.json");
  let (url, handle) = serve_once(pages[0].to_string());

  let td = tempdir();
  std::fs::write(
    td.path().join(".env"),
    format!("JIRA_URL={url}\nJIRA_EMAIL=jane@example.com\nJIRA_TOKEN=s3cret\n"),
  )
  .unwrap();

  let out = cmd_bin("jira-task-report")
    .current_dir(td.path())
    .args(["--assignee", "Jane Doe", "--created-after", "2025-03-01", "--today", "2025-03-12"])
    .args(["--format", "summaries"])
    .output()
    .unwrap();
  let request = handle.join().unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  assert_eq!(
    String::from_utf8(out.stdout).unwrap(),
    "- Rotate database credentials\n- Fix flaky backup job\n"
  );
  assert!(request.starts_with("GET /rest/api/2/search?"));
  assert!(request.contains("Basic amFuZUBleGFtcGxlLmNvbTpzM2NyZXQ="));
}

#[test]
fn without_dotenv_credentials_are_still_required() {
  let td = tempdir();

  cmd_bin("jira-task-report")
    .current_dir(td.path())
    .args(["--assignee", "Jane Doe", "--created-after", "2025-03-01", "--today", "2025-03-12"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("JIRA_URL"));
}
