pub mod auth;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod plant;
pub mod report;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use plant_core::{
    clock::SystemClock,
    config::Config,
    identity::{IdentityProvider, LocalIdentity},
    schedule,
    snapshot::FileSnapshotStore,
    Plant, PlantStore,
};
use serde::Serialize;
use std::path::Path;

pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).context("failed to load .plants/config.yaml")
}

pub fn open_identity(root: &Path, config: &Config) -> LocalIdentity {
    LocalIdentity::new(
        config.auth.users.clone(),
        Box::new(FileSnapshotStore::for_root(root)),
    )
}

/// Open the plant store for `root`, refusing when login is required and
/// nobody is signed in.
pub fn open_store(root: &Path) -> anyhow::Result<PlantStore> {
    let config = load_config(root)?;
    if config.auth.required {
        let identity = open_identity(root, &config);
        let user = identity.require_user()?;
        tracing::debug!(user = %user.email, "authenticated");
    }
    Ok(PlantStore::open(
        Box::new(FileSnapshotStore::for_root(root)),
        Box::new(SystemClock),
        config.store_options(),
    ))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (local midnight).
pub fn parse_when(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("invalid date '{s}'"))?;
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .with_context(|| format!("'{s}' does not exist in the local time zone"))?;
    Ok(local.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Plant presentation
// ---------------------------------------------------------------------------

/// A plant together with its derived schedule facts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView<'a> {
    #[serde(flatten)]
    pub plant: &'a Plant,
    pub days_since_watered: i64,
    pub next_watering: DateTime<Utc>,
    pub needs_water: bool,
    pub days_until_next_watering: i64,
    pub status: String,
}

impl<'a> PlantView<'a> {
    pub fn new(plant: &'a Plant, now: &DateTime<FixedOffset>) -> Self {
        Self {
            plant,
            days_since_watered: schedule::days_since_watered(plant, now),
            next_watering: schedule::next_watering_date(plant),
            needs_water: schedule::needs_water(plant, now),
            days_until_next_watering: schedule::days_until_next_watering(plant, now),
            status: schedule::watering_status(plant, now).to_string(),
        }
    }
}

pub const PLANT_HEADERS: [&str; 7] = [
    "ID",
    "NAME",
    "SPECIES",
    "LAST WATERED",
    "EVERY",
    "STATUS",
    "FAV",
];

pub fn plant_row(plant: &Plant, now: &DateTime<FixedOffset>) -> Vec<String> {
    vec![
        plant.id.clone(),
        plant.name.clone(),
        plant.species.clone(),
        plant
            .last_watered
            .with_timezone(now.offset())
            .format("%Y-%m-%d")
            .to_string(),
        format!("{}d", plant.watering_frequency),
        schedule::watering_status(plant, now).to_string(),
        if plant.favorite { "*" } else { "" }.to_string(),
    ]
}
