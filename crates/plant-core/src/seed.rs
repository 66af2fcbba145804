use crate::plant::Plant;
use chrono::{DateTime, Duration, Utc};

/// Demonstration collection used when no snapshot exists yet.
///
/// The offsets are chosen so that, on the day of seeding, one plant is due,
/// one is comfortably healthy, and one falls due later in the week.
pub fn sample_plants(now: DateTime<Utc>) -> Vec<Plant> {
    vec![
        Plant {
            id: "1".to_string(),
            name: "Monstera Deliciosa".to_string(),
            species: "Monstera deliciosa".to_string(),
            last_watered: now - Duration::days(7),
            watering_frequency: 7,
            image_url: Some(
                "https://images.unsplash.com/photo-1614594975525-e45190c55d0b?w=400".to_string(),
            ),
            notes: Some("Loves indirect sunlight".to_string()),
            favorite: false,
        },
        Plant {
            id: "2".to_string(),
            name: "Snake Plant".to_string(),
            species: "Sansevieria trifasciata".to_string(),
            last_watered: now - Duration::days(5),
            watering_frequency: 14,
            image_url: Some(
                "https://images.unsplash.com/photo-1587334207863-9174b90f1e6e?w=400".to_string(),
            ),
            notes: Some("Very low maintenance".to_string()),
            favorite: false,
        },
        Plant {
            id: "3".to_string(),
            name: "Peace Lily".to_string(),
            species: "Spathiphyllum".to_string(),
            last_watered: now - Duration::days(2),
            watering_frequency: 7,
            image_url: Some(
                "https://images.unsplash.com/photo-1593691509543-c55fb32d8de5?w=400".to_string(),
            ),
            notes: Some("Keep soil moist".to_string()),
            favorite: false,
        },
    ]
}
