use pretty_assertions::assert_eq;
use schedtrace::model::TraceContext;
use schedtrace::parser::{load_trace_file, parse_document};
use schedtrace::utils::error::ParseError;
use std::io::Write;

const SAMPLE: &str = r#"{
    "events": [
        {"time": 0, "event_type": "arrival", "task_name": "T1", "arrival_time": 0},
        {"time": 0, "event_type": "scheduled", "task_name": "T1", "cpu_num": 0},
        {"time": 4, "event_type": "end_instance", "task_name": "T1", "cpu_num": 0}
    ]
}"#;

#[test]
fn load_trace_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let events = load_trace_file(file.path()).unwrap();
    assert_eq!(events.len(), 3);

    let ctx = TraceContext::from_raw_events(events).unwrap();
    assert_eq!(ctx.end_time(), 4);
    assert_eq!(ctx.tasks().len(), 1);
}

#[test]
fn missing_file_is_io_error() {
    let result = load_trace_file("/nonexistent/trace.json");
    assert!(matches!(result, Err(ParseError::IoError(_))));
}

#[test]
fn invalid_json_is_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let result = load_trace_file(file.path());
    assert!(matches!(result, Err(ParseError::JsonError(_))));
}

#[test]
fn document_and_string_parses_agree() {
    let from_str = parse_document(SAMPLE).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let from_file = load_trace_file(file.path()).unwrap();

    assert_eq!(from_str.len(), from_file.len());
    for (a, b) in from_str.iter().zip(&from_file) {
        assert_eq!(a.event_type, b.event_type);
        assert_eq!(a.task_name, b.task_name);
    }
}
