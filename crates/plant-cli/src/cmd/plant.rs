use super::{open_store, parse_when, plant_row, PlantView, PLANT_HEADERS};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use plant_core::{schedule, Plant, PlantInput, PlantPatch};
use std::path::Path;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only plants that need water now
    #[arg(long, conflicts_with_all = ["upcoming", "healthy", "favorites"])]
    pub needing: bool,
    /// Only plants due within the upcoming window
    #[arg(long, conflicts_with_all = ["healthy", "favorites"])]
    pub upcoming: bool,
    /// Upcoming window in days (default from config)
    #[arg(long, requires = "upcoming")]
    pub days: Option<u32>,
    /// Only plants that do not need water
    #[arg(long, conflicts_with = "favorites")]
    pub healthy: bool,
    /// Only favorite plants
    #[arg(long)]
    pub favorites: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(short = 'n', long)]
    pub name: String,
    /// Species
    #[arg(short = 's', long)]
    pub species: String,
    /// Days between waterings
    #[arg(short = 'f', long)]
    pub frequency: u32,
    /// Last watering, YYYY-MM-DD or RFC 3339 (default: now)
    #[arg(long)]
    pub last_watered: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(short = 'n', long)]
    pub name: Option<String>,
    #[arg(short = 's', long)]
    pub species: Option<String>,
    /// Days between waterings
    #[arg(short = 'f', long)]
    pub frequency: Option<u32>,
    /// Last watering, YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub last_watered: Option<String>,
    #[arg(long, conflicts_with = "clear_image")]
    pub image_url: Option<String>,
    /// Remove the image URL
    #[arg(long)]
    pub clear_image: bool,
    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,
    /// Remove the notes
    #[arg(long)]
    pub clear_notes: bool,
}

pub fn list(root: &Path, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let plants: Vec<&Plant> = if args.needing {
        store.needing_water()
    } else if args.upcoming {
        match args.days {
            Some(days) => store.upcoming(days),
            None => store.upcoming_waterings(),
        }
    } else if args.healthy {
        store.healthy()
    } else if args.favorites {
        store.favorites()
    } else {
        store.plants().iter().collect()
    };

    let now = store.now();
    if json {
        let views: Vec<PlantView> = plants.iter().map(|p| PlantView::new(p, &now)).collect();
        return print_json(&views);
    }
    if plants.is_empty() {
        println!("No plants.");
        return Ok(());
    }
    print_table(
        &PLANT_HEADERS,
        plants.iter().map(|p| plant_row(p, &now)).collect(),
    );
    Ok(())
}

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let plant = store
        .get(id)
        .with_context(|| format!("plant '{id}' not found"))?;
    let now = store.now();
    let view = PlantView::new(plant, &now);

    if json {
        return print_json(&view);
    }
    println!("{} ({})", plant.name, plant.species);
    println!("  id:            {}", plant.id);
    println!(
        "  last watered:  {} ({} days ago)",
        plant.last_watered.with_timezone(now.offset()).format("%Y-%m-%d %H:%M"),
        view.days_since_watered
    );
    println!("  every:         {} days", plant.watering_frequency);
    println!(
        "  next watering: {}",
        view.next_watering.with_timezone(now.offset()).format("%Y-%m-%d %H:%M")
    );
    println!("  status:        {}", view.status);
    if plant.favorite {
        println!("  favorite:      yes");
    }
    if let Some(ref url) = plant.image_url {
        println!("  image:         {url}");
    }
    if let Some(ref notes) = plant.notes {
        println!("  notes:         {notes}");
    }
    Ok(())
}

pub fn add(root: &Path, args: AddArgs, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let mut input = PlantInput::new(args.name, args.species, args.frequency);
    if let Some(ref when) = args.last_watered {
        input = input.last_watered(parse_when(when)?);
    }
    input.image_url = args.image_url;
    input.notes = args.notes;

    let plant = store.add(input).context("failed to add plant")?;
    if json {
        print_json(&PlantView::new(&plant, &store.now()))?;
    } else {
        println!("Added plant [{}]: {}", plant.id, plant.name);
    }
    Ok(())
}

pub fn update(root: &Path, args: UpdateArgs, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let patch = PlantPatch {
        name: args.name,
        species: args.species,
        last_watered: args.last_watered.as_deref().map(parse_when).transpose()?,
        watering_frequency: args.frequency,
        image_url: if args.clear_image {
            Some(None)
        } else {
            args.image_url.map(Some)
        },
        notes: if args.clear_notes {
            Some(None)
        } else {
            args.notes.map(Some)
        },
        favorite: None,
    };
    if patch.is_empty() {
        println!("No changes given");
        return Ok(());
    }

    let plant = store
        .update(&args.id, patch)
        .with_context(|| format!("failed to update plant '{}'", args.id))?;
    if json {
        print_json(&PlantView::new(&plant, &store.now()))?;
    } else {
        println!("Updated plant [{}]", plant.id);
    }
    Ok(())
}

pub fn remove(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let removed = store.remove(id);
    if json {
        print_json(&serde_json::json!({ "id": id, "removed": removed }))?;
    } else if removed {
        println!("Removed plant [{id}]");
    } else {
        println!("No plant with id [{id}]");
    }
    Ok(())
}

pub fn water(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let plant = store
        .water(id)
        .with_context(|| format!("failed to water plant '{id}'"))?;
    let now = store.now();
    if json {
        print_json(&PlantView::new(&plant, &now))?;
    } else {
        println!(
            "Watered {}: next watering in {} days",
            plant.name,
            schedule::days_until_next_watering(&plant, &now)
        );
    }
    Ok(())
}

pub fn favorite(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let plant = store
        .toggle_favorite(id)
        .with_context(|| format!("failed to toggle favorite on '{id}'"))?;
    if json {
        print_json(&serde_json::json!({ "id": plant.id, "favorite": plant.favorite }))?;
    } else if plant.favorite {
        println!("Added {} to favorites", plant.name);
    } else {
        println!("Removed {} from favorites", plant.name);
    }
    Ok(())
}
