//! Pure watering-schedule calculations.
//!
//! Every function takes the reference instant explicitly. "Since" calculations
//! truncate both instants to midnight in `now`'s time zone so a plant never
//! flips status partway through a day; the next-due instant keeps the original
//! watering time of day.

use crate::plant::Plant;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole calendar days between the last watering and `now`.
///
/// Negative when `last_watered` lies on a later calendar day than `now`.
pub fn days_since_watered<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> i64 {
    let today = now.date_naive();
    let watered = plant
        .last_watered
        .with_timezone(&now.timezone())
        .date_naive();
    today.signed_duration_since(watered).num_days()
}

/// The instant the next watering is due: `last_watered` plus the frequency.
///
/// Days are exact 24-hour spans added in UTC, so the UTC time of day is kept;
/// across a DST change the local wall-clock time shifts by an hour. Saturates
/// at [`DateTime::<Utc>::MAX_UTC`] when the sum is out of range.
pub fn next_watering_date(plant: &Plant) -> DateTime<Utc> {
    plant
        .last_watered
        .checked_add_signed(Duration::days(i64::from(plant.watering_frequency)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn needs_water<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> bool {
    days_since_watered(plant, now) >= i64::from(plant.watering_frequency)
}

pub fn days_until_next_watering<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> i64 {
    (i64::from(plant.watering_frequency) - days_since_watered(plant, now)).max(0)
}

/// Due on a later calendar day than `now`, at most `window_days` days ahead.
///
/// Never true for a plant that needs water.
pub fn is_upcoming<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>, window_days: u32) -> bool {
    let until = i64::from(plant.watering_frequency) - days_since_watered(plant, now);
    until > 0 && until <= i64::from(window_days)
}

/// Days past due; zero for plants that are not yet due.
pub fn days_overdue<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> i64 {
    (days_since_watered(plant, now) - i64::from(plant.watering_frequency)).max(0)
}

// ---------------------------------------------------------------------------
// WateringStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum WateringStatus {
    NeedsWaterNow,
    WaterToday,
    WaterTomorrow,
    WaterInDays(i64),
}

impl fmt::Display for WateringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WateringStatus::NeedsWaterNow => f.write_str("Needs water now!"),
            WateringStatus::WaterToday => f.write_str("Water today"),
            WateringStatus::WaterTomorrow => f.write_str("Water tomorrow"),
            WateringStatus::WaterInDays(n) => write!(f, "Water in {n} days"),
        }
    }
}

pub fn watering_status<Tz: TimeZone>(plant: &Plant, now: &DateTime<Tz>) -> WateringStatus {
    if needs_water(plant, now) {
        return WateringStatus::NeedsWaterNow;
    }
    match days_until_next_watering(plant, now) {
        0 => WateringStatus::WaterToday,
        1 => WateringStatus::WaterTomorrow,
        n => WateringStatus::WaterInDays(n),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
