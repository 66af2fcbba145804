use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,
}

/// Bounded log of committed commands, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
    limit: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_LIMIT)
    }
}

impl ActivityLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Rebuild a log from stored entries, re-applying the limit.
    pub fn from_entries(mut entries: Vec<ActivityEntry>, limit: usize) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn record(&mut self, entry: ActivityEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Entries whose timestamp falls on `day` in the calendar of `tz`.
    pub fn on_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<&ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp.with_timezone(tz).date_naive() == day)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(at: DateTime<Utc>, action: &str) -> ActivityEntry {
        ActivityEntry {
            timestamp: at,
            action: action.to_string(),
            plant_name: None,
        }
    }

    #[test]
    fn keeps_newest_first_within_limit() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut log = ActivityLog::new(3);
        for i in 0..5 {
            log.record(entry(start + Duration::minutes(i), &format!("a{i}")));
        }
        let actions: Vec<&str> = log.entries().iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, ["a4", "a3", "a2"]);
    }

    #[test]
    fn filters_by_calendar_day() {
        let day = Utc.with_ymd_and_hms(2024, 6, 2, 10, 0, 0).unwrap();
        let mut log = ActivityLog::default();
        log.record(entry(day - Duration::days(1), "yesterday"));
        log.record(entry(day, "today"));
        let today = log.on_day(day.date_naive(), &Utc);
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].action, "today");
    }
}
