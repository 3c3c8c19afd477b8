use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One visited external booking link. Entries are keyed by `time`; two
/// entries may share a link.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub link: String,
    pub time: String,
}

/// Removes the entry recorded at `time`, leaving entries that share the
/// same link but differ in time untouched.
pub fn remove_entry(entries: &mut Vec<HistoryEntry>, time: &str) {
    entries.retain(|entry| entry.time != time);
}

/// Human-readable timestamp. The backend stamps entries; anything that is
/// not RFC 3339 is shown as-is.
pub fn display_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(link: &str, time: &str) -> HistoryEntry {
        HistoryEntry {
            link: link.into(),
            time: time.into(),
        }
    }

    #[test]
    fn remove_is_keyed_by_time_not_link() {
        let mut entries = vec![
            entry("https://example.com/a", "2024-05-01T10:00:00Z"),
            entry("https://example.com/a", "2024-05-01T11:00:00Z"),
            entry("https://example.com/b", "2024-05-01T12:00:00Z"),
        ];
        remove_entry(&mut entries, "2024-05-01T10:00:00Z");
        assert_eq!(
            entries,
            vec![
                entry("https://example.com/a", "2024-05-01T11:00:00Z"),
                entry("https://example.com/b", "2024-05-01T12:00:00Z"),
            ]
        );
    }

    #[test]
    fn display_time_falls_back_to_raw() {
        assert_eq!(
            display_time("2024-05-01T10:30:00Z"),
            "2024-05-01 10:30".to_string()
        );
        assert_eq!(display_time("last tuesday"), "last tuesday".to_string());
    }
}
