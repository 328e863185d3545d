use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Reads the JSON payload of the event that triggered the run.
pub fn read_event_payload(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    let payload = serde_json::from_str(&raw)
        .with_context(|| format!("event payload {} is not valid JSON", path.display()))?;
    Ok(payload)
}

/// Logs the event payload at debug level and returns it. A missing or
/// unreadable payload is logged and yields `None`; it never fails the run.
pub fn dump_event_payload(path: Option<&Path>) -> Option<Value> {
    let Some(path) = path else {
        tracing::debug!("No event payload path provided");
        return None;
    };

    match read_event_payload(path) {
        Ok(payload) => {
            let pretty = serde_json::to_string_pretty(&payload).unwrap_or_default();
            tracing::debug!("Event payload:\n{}", pretty);
            Some(payload)
        }
        Err(e) => {
            tracing::warn!("Could not load event payload: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_read_event_payload() {
        let path = std::env::temp_dir().join(format!("event-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"ref":"refs/heads/master","after":"abc123"}"#).unwrap();

        let payload = read_event_payload(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(payload, json!({ "ref": "refs/heads/master", "after": "abc123" }));
    }

    #[test]
    fn test_read_event_payload_missing_file() {
        let path = std::env::temp_dir().join("definitely-missing-event-payload.json");
        let err = read_event_payload(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read event payload"));
    }

    #[test]
    fn test_dump_event_payload_without_path() {
        assert_eq!(dump_event_payload(None), None);
    }

    #[test]
    fn test_dump_event_payload_missing_file_is_skipped() {
        let path = std::env::temp_dir().join("definitely-missing-event-payload.json");
        assert_eq!(dump_event_payload(Some(path.as_path())), None);
    }

    #[test]
    fn test_dump_event_payload_bad_json_is_skipped() {
        let path = std::env::temp_dir().join(format!("event-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let dumped = dump_event_payload(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dumped, None);
    }

    #[test]
    fn test_dump_event_payload_returns_payload() {
        let path = std::env::temp_dir().join(format!("event-dump-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"after":"abc123"}"#).unwrap();

        let dumped = dump_event_payload(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dumped, Some(json!({ "after": "abc123" })));
    }
}
