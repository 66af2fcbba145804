//! Care progress metrics and the markdown progress report.

use crate::activity::ActivityEntry;
use crate::plant::Plant;
use crate::schedule;
use crate::store::PlantStore;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;
use std::fmt;

/// Most activity entries listed under "Today" in the report.
const REPORT_ACTIVITY_LINES: usize = 10;

// ---------------------------------------------------------------------------
// ProgressMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressMetrics {
    pub total_plants: usize,
    pub plants_watered: usize,
    pub plants_needing_water: usize,
    /// Share of plants not needing water, as a rounded percentage.
    pub completion_rate: u32,
    pub last_updated: DateTime<FixedOffset>,
}

impl ProgressMetrics {
    pub fn compute(plants: &[Plant], now: &DateTime<FixedOffset>) -> Self {
        let total = plants.len();
        let needing = plants
            .iter()
            .filter(|p| schedule::needs_water(p, now))
            .count();
        let watered = total - needing;
        Self {
            total_plants: total,
            plants_watered: watered,
            plants_needing_water: needing,
            completion_rate: completion_rate(watered, total),
            last_updated: *now,
        }
    }

    /// "2/3 plants watered (67%)"
    pub fn summary(&self) -> String {
        format!(
            "{}/{} plants watered ({}%)",
            self.plants_watered, self.total_plants, self.completion_rate
        )
    }
}

fn completion_rate(watered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((watered as f64 / total as f64) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// One plant in a report bucket. `days` is the bucket's own measure: days
/// since watering, days until due, or days overdue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub id: String,
    pub name: String,
    pub species: String,
    pub days: i64,
}

impl ReportLine {
    fn new(plant: &Plant, days: i64) -> Self {
        Self {
            id: plant.id.clone(),
            name: plant.name.clone(),
            species: plant.species.clone(),
            days,
        }
    }
}

/// Plants still inside their watering interval, with days since watering.
pub fn well_watered<Tz: TimeZone>(plants: &[Plant], now: &DateTime<Tz>) -> Vec<ReportLine> {
    plants
        .iter()
        .filter(|p| !schedule::needs_water(p, now))
        .map(|p| ReportLine::new(p, schedule::days_since_watered(p, now)))
        .collect()
}

/// Plants due within `window_days` (but not today), with days until due.
pub fn needing_soon<Tz: TimeZone>(
    plants: &[Plant],
    now: &DateTime<Tz>,
    window_days: u32,
) -> Vec<ReportLine> {
    plants
        .iter()
        .filter(|p| schedule::is_upcoming(p, now, window_days))
        .map(|p| ReportLine::new(p, schedule::days_until_next_watering(p, now)))
        .collect()
}

/// Plants needing water, with days overdue.
pub fn overdue<Tz: TimeZone>(plants: &[Plant], now: &DateTime<Tz>) -> Vec<ReportLine> {
    plants
        .iter()
        .filter(|p| schedule::needs_water(p, now))
        .map(|p| ReportLine::new(p, schedule::days_overdue(p, now)))
        .collect()
}

// ---------------------------------------------------------------------------
// ProgressReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub metrics: ProgressMetrics,
    pub well_watered: Vec<ReportLine>,
    pub needing_soon: Vec<ReportLine>,
    pub overdue: Vec<ReportLine>,
    pub favorites: usize,
    pub today_activity: Vec<ActivityEntry>,
}

impl ProgressReport {
    pub fn build(store: &PlantStore, attention_window_days: u32) -> Self {
        let now = store.now();
        let plants = store.plants();
        let today_activity = store
            .activity()
            .on_day(now.date_naive(), now.offset())
            .into_iter()
            .take(REPORT_ACTIVITY_LINES)
            .cloned()
            .collect();
        Self {
            metrics: ProgressMetrics::compute(plants, &now),
            well_watered: well_watered(plants, &now),
            needing_soon: needing_soon(plants, &now, attention_window_days),
            overdue: overdue(plants, &now),
            favorites: store.favorites().len(),
            today_activity,
        }
    }

    pub fn render_markdown(&self) -> String {
        self.to_string()
    }
}

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn write_bucket(
    f: &mut fmt::Formatter<'_>,
    lines: &[ReportLine],
    describe: impl Fn(i64) -> String,
) -> fmt::Result {
    if lines.is_empty() {
        return writeln!(f, "- None");
    }
    for line in lines {
        writeln!(f, "- **{}** ({}) - {}", line.name, line.species, describe(line.days))?;
    }
    Ok(())
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let now = m.last_updated;

        writeln!(f, "# Plant Care Tracker - Progress Report")?;
        writeln!(f)?;
        writeln!(f, "**Last Updated:** {}", now.format("%Y-%m-%d %H:%M"))?;
        writeln!(f)?;
        writeln!(f, "## Overall Progress")?;
        writeln!(f)?;
        writeln!(f, "- **Total Plants:** {}", m.total_plants)?;
        writeln!(f, "- **Plants Watered:** {}", m.plants_watered)?;
        writeln!(f, "- **Plants Needing Water:** {}", m.plants_needing_water)?;
        writeln!(f, "- **Completion Rate:** {}%", m.completion_rate)?;
        writeln!(f, "- **Favorite Plants:** {}", self.favorites)?;
        writeln!(f)?;

        writeln!(f, "## Plant Status")?;
        writeln!(f)?;
        writeln!(f, "### Well-Watered Plants")?;
        writeln!(f)?;
        write_bucket(f, &self.well_watered, |d| format!("last watered {d} days ago"))?;
        writeln!(f)?;
        writeln!(f, "### Plants Needing Attention")?;
        writeln!(f)?;
        write_bucket(f, &self.needing_soon, |d| format!("water in {d} days"))?;
        writeln!(f)?;
        writeln!(f, "### Overdue Plants")?;
        writeln!(f)?;
        write_bucket(f, &self.overdue, |d| format!("{d} days overdue"))?;
        writeln!(f)?;

        writeln!(f, "## Goals")?;
        writeln!(f)?;
        writeln!(f, "- {} Add first plant to the tracker", checkbox(m.total_plants > 0))?;
        writeln!(
            f,
            "- {} Maintain consistent watering schedule",
            checkbox(m.total_plants > 0 && m.completion_rate == 100)
        )?;
        writeln!(f, "- {} Mark favorite plants", checkbox(self.favorites > 0))?;
        writeln!(
            f,
            "- {} Keep all plants healthy",
            checkbox(m.plants_needing_water == 0)
        )?;
        writeln!(f)?;

        writeln!(f, "## Achievements")?;
        writeln!(f)?;
        let mut achievements = Vec::new();
        if m.total_plants > 0 {
            achievements.push("Started tracking plants");
        }
        if m.total_plants >= 5 {
            achievements.push("Plant collector - 5+ plants");
        }
        if self.favorites > 0 {
            achievements.push("Marked favorite plants");
        }
        if m.total_plants > 0 && m.completion_rate == 100 {
            achievements.push("Perfect care - all plants watered");
        }
        if achievements.is_empty() {
            writeln!(f, "- No achievements yet - start tracking plants!")?;
        }
        for a in achievements {
            writeln!(f, "- {a}")?;
        }
        writeln!(f)?;

        writeln!(f, "## Recent Activity")?;
        writeln!(f)?;
        writeln!(f, "### Today")?;
        writeln!(f)?;
        if self.today_activity.is_empty() {
            writeln!(f, "- No activity recorded")?;
        }
        for entry in &self.today_activity {
            let at = entry.timestamp.with_timezone(now.offset());
            match entry.plant_name {
                Some(ref name) => {
                    writeln!(f, "- {} - {} ({})", at.format("%H:%M"), entry.action, name)?
                }
                None => writeln!(f, "- {} - {}", at.format("%H:%M"), entry.action)?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::snapshot::MemorySnapshotStore;
    use crate::store::StoreOptions;
    use chrono::{Duration, Utc};

    fn seeded_store() -> PlantStore {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap());
        PlantStore::open(
            Box::new(MemorySnapshotStore::new()),
            Box::new(clock),
            StoreOptions::default(),
        )
    }

    #[test]
    fn metrics_for_seed() {
        let store = seeded_store();
        let m = ProgressMetrics::compute(store.plants(), &store.now());
        assert_eq!(m.total_plants, 3);
        assert_eq!(m.plants_needing_water, 1);
        assert_eq!(m.plants_watered, 2);
        assert_eq!(m.completion_rate, 67);
        assert_eq!(m.summary(), "2/3 plants watered (67%)");
    }

    #[test]
    fn empty_collection_has_zero_rate() {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap());
        let m = ProgressMetrics::compute(&[], &clock.now());
        assert_eq!(m.completion_rate, 0);
    }

    #[test]
    fn buckets_report_their_day_counts() {
        let store = seeded_store();
        let now = store.now();
        let plants = store.plants();

        let overdue = overdue(plants, &now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].name, "Monstera Deliciosa");
        assert_eq!(overdue[0].days, 0);

        let healthy: Vec<i64> = well_watered(plants, &now).iter().map(|l| l.days).collect();
        assert_eq!(healthy, [5, 2]);

        // Peace Lily is due in 5 days, Snake Plant in 9.
        assert!(needing_soon(plants, &now, 2).is_empty());
        let soon = needing_soon(plants, &(now + Duration::days(3)), 2);
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].name, "Peace Lily");
        assert_eq!(soon[0].days, 2);
    }

    #[test]
    fn markdown_lists_buckets_and_activity() {
        let mut store = seeded_store();
        store.water("1").unwrap();
        store.toggle_favorite("2").unwrap();

        let report = ProgressReport::build(&store, 2);
        let md = report.render_markdown();
        assert!(md.starts_with("# Plant Care Tracker - Progress Report"));
        assert!(md.contains("- **Completion Rate:** 100%"));
        assert!(md.contains("- [x] Mark favorite plants"));
        assert!(md.contains("Perfect care - all plants watered"));
        assert!(md.contains("10:00 - Watered plant (Monstera Deliciosa)"));
        assert_eq!(report.today_activity.len(), 2);
    }
}
