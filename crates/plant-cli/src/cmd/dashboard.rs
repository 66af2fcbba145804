use super::{open_store, plant_row, PlantView, PLANT_HEADERS};
use crate::output::{print_json, print_table};
use chrono::{DateTime, FixedOffset};
use plant_core::{progress::ProgressMetrics, Plant};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let now = store.now();
    let counts = store.counts();
    let metrics = ProgressMetrics::compute(store.plants(), &now);
    let needing = store.needing_water();
    let upcoming = store.upcoming_waterings();
    let favorites = store.favorites();

    if json {
        return print_json(&serde_json::json!({
            "counts": counts,
            "metrics": metrics,
            "needing_water": views(&needing, &now),
            "upcoming": views(&upcoming, &now),
            "favorites": views(&favorites, &now),
        }));
    }

    println!(
        "Plants: {}  Needing water: {}  Favorites: {}",
        counts.total, counts.needing_water, counts.favorites
    );
    println!("{}", metrics.summary());

    let sections = [
        ("Needs water", &needing),
        ("Upcoming", &upcoming),
        ("Favorites", &favorites),
    ];
    for (title, plants) in sections {
        println!();
        println!("{title}:");
        if plants.is_empty() {
            println!("  (none)");
            continue;
        }
        print_table(
            &PLANT_HEADERS,
            plants.iter().map(|p| plant_row(p, &now)).collect(),
        );
    }
    Ok(())
}

fn views<'a>(plants: &[&'a Plant], now: &DateTime<FixedOffset>) -> Vec<PlantView<'a>> {
    plants.iter().map(|p| PlantView::new(p, now)).collect()
}
