//! Plant watering tracker core.
//!
//! [`store::PlantStore`] owns the plant collection and derives the
//! "needs water", "upcoming" and "healthy" views from it on every read using
//! the pure functions in [`schedule`]. Snapshots go through a
//! [`snapshot::SnapshotStore`], so the storage medium stays outside the core.

pub mod activity;
pub mod clock;
pub mod config;
pub mod error;
pub mod identity;
pub mod io;
pub mod paths;
pub mod plant;
pub mod progress;
pub mod schedule;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use error::{PlantError, Result};
pub use plant::{Plant, PlantInput, PlantPatch};
pub use schedule::WateringStatus;
pub use store::PlantStore;
