//! CLI integration tests against JSON data files.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_griddle"));
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_people(dir: &Path) -> String {
    let path = dir.join("people.json");
    std::fs::write(
        &path,
        r#"[
  {"name": "Alice", "email": "a@x.com", "role": "admin"},
  {"name": "Bob", "email": "b@x.com", "role": "user"},
  {"name": "Carol", "email": "c@y.org", "role": "user"}
]"#,
    )
    .unwrap();
    path.display().to_string()
}

/// Parse `--json` output into (headers, rows).
fn parse_payload(stdout: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let payload: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("stdout should be a JSON payload");
    let headers = payload["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let rows = payload["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| {
            row.as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect()
        })
        .collect();
    (headers, rows)
}

#[test]
fn renders_a_plain_text_table() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&["render", &file, "-c", "name", "-c", "email"]);

    assert!(stdout.contains("name"));
    assert!(stdout.contains("Alice"));
    assert!(stdout.contains("b@x.com"));
}

#[test]
fn json_payload_aligns_rows_with_headers() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&["render", &file, "-c", "name", "-c", "email", "--json"]);
    let (headers, rows) = parse_payload(&stdout);

    assert_eq!(headers, vec!["name", "email"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Alice", "a@x.com"]);
}

#[test]
fn column_labels_can_differ_from_fields() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&[
        "render", &file, "-c", "Name=name", "-c", "E-mail=email", "--json",
    ]);
    let (headers, _) = parse_payload(&stdout);

    assert_eq!(headers, vec!["Name", "E-mail"]);
}

#[test]
fn search_narrows_by_declared_fields() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&[
        "render",
        &file,
        "-c",
        "name",
        "-c",
        "email",
        "--search",
        "a@x",
        "--search-by",
        "email",
        "--json",
    ]);
    let (_, rows) = parse_payload(&stdout);

    assert_eq!(rows, vec![vec!["Alice", "a@x.com"]]);
}

#[test]
fn search_without_search_fields_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&[
        "render", &file, "-c", "name", "--search", "Alice", "--json",
    ]);
    let (_, rows) = parse_payload(&stdout);

    assert_eq!(rows.len(), 3, "unsearchable views ignore the term");
}

#[test]
fn strict_search_fails_without_search_fields() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let output = run_cli(&[
        "render",
        &file,
        "-c",
        "name",
        "--search",
        "Alice",
        "--strict-search",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("search"),
        "expected a search configuration error, got: {}",
        stderr
    );
}

#[test]
fn exact_filters_and_combine() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&[
        "render", &file, "-c", "name", "--filter", "role=user", "--json",
    ]);
    let (_, rows) = parse_payload(&stdout);

    assert_eq!(rows, vec![vec!["Bob"], vec!["Carol"]]);
}

#[test]
fn sorting_and_pagination_window_the_result() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&[
        "render",
        &file,
        "-c",
        "name",
        "--sort",
        "name",
        "--desc",
        "--page",
        "1",
        "--page-size",
        "2",
        "--json",
    ]);
    let (_, rows) = parse_payload(&stdout);

    assert_eq!(rows, vec![vec!["Carol"], vec!["Bob"]]);
}

#[test]
fn renders_json_lines_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("people.jsonl");
    std::fs::write(
        &path,
        "{\"name\": \"Alice\"}\n{\"name\": \"Bob\"}\n",
    )
    .unwrap();

    let stdout = run_cli_success(&[
        "render",
        &path.display().to_string(),
        "-c",
        "name",
        "--json",
    ]);
    let (_, rows) = parse_payload(&stdout);

    assert_eq!(rows.len(), 2);
}

#[test]
fn fields_lists_the_inferred_schema() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let stdout = run_cli_success(&["fields", &file]);
    let fields: Vec<&str> = stdout.lines().collect();

    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"role"));
}

#[test]
fn missing_file_fails_with_context() {
    let output = run_cli(&["render", "/nonexistent/people.json", "-c", "name"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load"),
        "expected load failure, got: {}",
        stderr
    );
}

#[test]
fn unknown_search_field_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_people(dir.path());

    let output = run_cli(&[
        "render",
        &file,
        "-c",
        "name",
        "--search",
        "x",
        "--search-by",
        "phone",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown field"),
        "expected unknown-field error, got: {}",
        stderr
    );
}
