//! The plant collection and its derived views.
//!
//! [`PlantStore`] is the single owner of the plant list. Every committed
//! command writes a fresh snapshot through the [`SnapshotStore`]; snapshot
//! failures are logged and the in-memory list stays authoritative.

use crate::activity::{ActivityEntry, ActivityLog, DEFAULT_ACTIVITY_LIMIT};
use crate::clock::Clock;
use crate::error::{PlantError, Result};
use crate::plant::{Plant, PlantInput, PlantPatch};
use crate::schedule;
use crate::seed;
use crate::snapshot::{SnapshotStore, ACTIVITY_KEY, PLANTS_KEY};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 3;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub upcoming_window_days: u32,
    pub activity_limit: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

/// Where the initial collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Snapshot,
    Seed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    Added { id: String },
    Updated { id: String },
    Watered { id: String },
    FavoriteToggled { id: String, favorite: bool },
    Removed { id: String },
}

impl StoreEvent {
    pub fn plant_id(&self) -> &str {
        match self {
            StoreEvent::Added { id }
            | StoreEvent::Updated { id }
            | StoreEvent::Watered { id }
            | StoreEvent::FavoriteToggled { id, .. }
            | StoreEvent::Removed { id } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlantCounts {
    pub total: usize,
    pub needing_water: usize,
    pub favorites: usize,
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

// ---------------------------------------------------------------------------
// Snapshot encoding
// ---------------------------------------------------------------------------

pub fn encode_plants(plants: &[Plant]) -> Result<String> {
    Ok(serde_json::to_string(plants)?)
}

/// Parse a stored collection. Rejects records that break the plant
/// invariants, including duplicate ids.
pub fn decode_plants(data: &str) -> Result<Vec<Plant>> {
    let plants: Vec<Plant> = serde_json::from_str(data)?;
    let mut seen = HashSet::new();
    for plant in &plants {
        plant.validate()?;
        if !seen.insert(plant.id.as_str()) {
            return Err(PlantError::Persistence(format!(
                "duplicate plant id in snapshot: {}",
                plant.id
            )));
        }
    }
    Ok(plants)
}

// ---------------------------------------------------------------------------
// PlantStore
// ---------------------------------------------------------------------------

pub struct PlantStore {
    plants: Vec<Plant>,
    activity: ActivityLog,
    snapshots: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    options: StoreOptions,
    source: LoadSource,
    observers: Vec<Observer>,
}

impl PlantStore {
    /// Restore the collection from `snapshots`, seeding the demonstration
    /// plants when there is no usable snapshot.
    pub fn open(
        snapshots: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        options: StoreOptions,
    ) -> Self {
        let restored = load_plants(snapshots.as_ref());
        let activity = load_activity(snapshots.as_ref(), options.activity_limit);
        let mut store = Self {
            plants: Vec::new(),
            activity,
            snapshots,
            clock,
            options,
            source: LoadSource::Snapshot,
            observers: Vec::new(),
        };
        match restored {
            Some(plants) => store.plants = plants,
            None => {
                store.plants = seed::sample_plants(store.now_utc());
                store.source = LoadSource::Seed;
                tracing::info!(count = store.plants.len(), "seeded demonstration plants");
                store.persist_plants();
            }
        }
        store
    }

    pub fn loaded_from(&self) -> LoadSource {
        self.source
    }

    /// The reference instant for every derived view.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    /// Register a callback invoked after every committed mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn add(&mut self, input: PlantInput) -> Result<Plant> {
        input.validate()?;
        let plant = input.into_plant(uuid::Uuid::new_v4().to_string(), self.now_utc());
        tracing::debug!(id = %plant.id, name = %plant.name, "adding plant");
        self.plants.push(plant.clone());
        self.commit(
            StoreEvent::Added {
                id: plant.id.clone(),
            },
            "Added plant",
            &plant.name,
        );
        Ok(plant)
    }

    pub fn update(&mut self, id: &str, patch: PlantPatch) -> Result<Plant> {
        let plant = self.apply_patch(id, &patch)?;
        self.commit(
            StoreEvent::Updated {
                id: plant.id.clone(),
            },
            "Updated plant",
            &plant.name,
        );
        Ok(plant)
    }

    /// Idempotent: returns `false` and writes nothing when `id` is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.plants.iter().position(|p| p.id == id) else {
            tracing::debug!(id, "remove: no such plant");
            return false;
        };
        let plant = self.plants.remove(pos);
        self.commit(
            StoreEvent::Removed { id: plant.id },
            "Deleted plant",
            &plant.name,
        );
        true
    }

    pub fn water(&mut self, id: &str) -> Result<Plant> {
        let patch = PlantPatch::watered_at(self.now_utc());
        let plant = self.apply_patch(id, &patch)?;
        self.commit(
            StoreEvent::Watered {
                id: plant.id.clone(),
            },
            "Watered plant",
            &plant.name,
        );
        Ok(plant)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<Plant> {
        let current = self.find(id)?;
        let patch = PlantPatch {
            favorite: Some(!current.favorite),
            ..Default::default()
        };
        let plant = self.apply_patch(id, &patch)?;
        let action = if plant.favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        self.commit(
            StoreEvent::FavoriteToggled {
                id: plant.id.clone(),
                favorite: plant.favorite,
            },
            action,
            &plant.name,
        );
        Ok(plant)
    }

    fn find(&self, id: &str) -> Result<&Plant> {
        self.get(id)
            .ok_or_else(|| PlantError::NotFound(id.to_string()))
    }

    /// Merge and validate `patch` into the plant with `id`. The list is left
    /// untouched when validation fails.
    fn apply_patch(&mut self, id: &str, patch: &PlantPatch) -> Result<Plant> {
        let pos = self
            .plants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlantError::NotFound(id.to_string()))?;
        let merged = patch.apply_to(&self.plants[pos]);
        merged.validate()?;
        self.plants[pos] = merged.clone();
        Ok(merged)
    }

    fn commit(&mut self, event: StoreEvent, action: &str, plant_name: &str) {
        self.activity.record(ActivityEntry {
            timestamp: self.now_utc(),
            action: action.to_string(),
            plant_name: Some(plant_name.to_string()),
        });
        self.persist_plants();
        self.persist_activity();
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn persist_plants(&self) {
        let result =
            encode_plants(&self.plants).and_then(|data| self.snapshots.save(PLANTS_KEY, &data));
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to save plants; keeping changes in memory");
        }
    }

    fn persist_activity(&self) {
        let result = serde_json::to_string(self.activity.entries())
            .map_err(PlantError::from)
            .and_then(|data| self.snapshots.save(ACTIVITY_KEY, &data));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save activity log");
        }
    }

    // -----------------------------------------------------------------------
    // Read views
    // -----------------------------------------------------------------------

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn needing_water(&self) -> Vec<&Plant> {
        let now = self.now();
        self.plants
            .iter()
            .filter(|p| schedule::needs_water(p, &now))
            .collect()
    }

    /// Plants due on a later calendar day, at most `window_days` days ahead.
    pub fn upcoming(&self, window_days: u32) -> Vec<&Plant> {
        let now = self.now();
        self.plants
            .iter()
            .filter(|p| schedule::is_upcoming(p, &now, window_days))
            .collect()
    }

    pub fn upcoming_waterings(&self) -> Vec<&Plant> {
        self.upcoming(self.options.upcoming_window_days)
    }

    pub fn healthy(&self) -> Vec<&Plant> {
        let now = self.now();
        self.plants
            .iter()
            .filter(|p| !schedule::needs_water(p, &now))
            .collect()
    }

    pub fn favorites(&self) -> Vec<&Plant> {
        self.plants.iter().filter(|p| p.favorite).collect()
    }

    pub fn total_plants(&self) -> usize {
        self.plants.len()
    }

    pub fn needing_water_count(&self) -> usize {
        self.needing_water().len()
    }

    pub fn counts(&self) -> PlantCounts {
        PlantCounts {
            total: self.total_plants(),
            needing_water: self.needing_water_count(),
            favorites: self.favorites().len(),
        }
    }
}

fn load_plants(snapshots: &dyn SnapshotStore) -> Option<Vec<Plant>> {
    match snapshots.load(PLANTS_KEY) {
        Ok(Some(data)) => match decode_plants(&data) {
            Ok(plants) => Some(plants),
            Err(e) => {
                tracing::warn!(error = %e, "stored plants are unreadable; using sample data");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load plants; using sample data");
            None
        }
    }
}

fn load_activity(snapshots: &dyn SnapshotStore, limit: usize) -> ActivityLog {
    let entries = match snapshots.load(ACTIVITY_KEY) {
        Ok(Some(data)) => serde_json::from_str::<Vec<ActivityEntry>>(&data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored activity log is unreadable; starting fresh");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load activity log");
            Vec::new()
        }
    };
    ActivityLog::from_entries(entries, limit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
