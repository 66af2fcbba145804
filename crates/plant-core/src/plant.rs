use crate::error::{PlantError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// A tracked plant and its watering schedule.
///
/// Field names serialize in camelCase so snapshots stay compatible with the
/// browser-side tracker's storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub species: String,
    pub last_watered: DateTime<Utc>,
    /// Whole days between required waterings, always `>= 1`.
    pub watering_frequency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl Plant {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PlantError::Validation("id must not be empty".to_string()));
        }
        validate_fields(&self.name, &self.species, self.watering_frequency)
    }
}

fn validate_fields(name: &str, species: &str, watering_frequency: u32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PlantError::Validation("name must not be empty".to_string()));
    }
    if species.trim().is_empty() {
        return Err(PlantError::Validation(
            "species must not be empty".to_string(),
        ));
    }
    if watering_frequency < 1 {
        return Err(PlantError::Validation(format!(
            "watering frequency must be at least 1 day, got {watering_frequency}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PlantInput
// ---------------------------------------------------------------------------

/// Everything needed to create a plant except its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantInput {
    pub name: String,
    pub species: String,
    /// Defaults to the creation instant when absent.
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    pub watering_frequency: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl PlantInput {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        watering_frequency: u32,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            watering_frequency,
            ..Default::default()
        }
    }

    pub fn last_watered(mut self, at: DateTime<Utc>) -> Self {
        self.last_watered = Some(at);
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.species, self.watering_frequency)
    }

    /// Build the record, filling in `id` and defaulting `last_watered` to `now`.
    pub fn into_plant(self, id: String, now: DateTime<Utc>) -> Plant {
        Plant {
            id,
            name: self.name,
            species: self.species,
            last_watered: self.last_watered.unwrap_or(now),
            watering_frequency: self.watering_frequency,
            image_url: self.image_url,
            notes: self.notes,
            favorite: self.favorite,
        }
    }
}

// ---------------------------------------------------------------------------
// PlantPatch
// ---------------------------------------------------------------------------

/// Partial update merged into an existing plant. `None` leaves a field alone;
/// for `image_url` and `notes`, `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub last_watered: Option<DateTime<Utc>>,
    pub watering_frequency: Option<u32>,
    pub image_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub favorite: Option<bool>,
}

impl PlantPatch {
    pub fn watered_at(at: DateTime<Utc>) -> Self {
        Self {
            last_watered: Some(at),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy of `plant` with this patch applied. The id never changes.
    pub fn apply_to(&self, plant: &Plant) -> Plant {
        let mut merged = plant.clone();
        if let Some(ref name) = self.name {
            merged.name = name.clone();
        }
        if let Some(ref species) = self.species {
            merged.species = species.clone();
        }
        if let Some(at) = self.last_watered {
            merged.last_watered = at;
        }
        if let Some(freq) = self.watering_frequency {
            merged.watering_frequency = freq;
        }
        if let Some(ref url) = self.image_url {
            merged.image_url = url.clone();
        }
        if let Some(ref notes) = self.notes {
            merged.notes = notes.clone();
        }
        if let Some(favorite) = self.favorite {
            merged.favorite = favorite;
        }
        merged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
