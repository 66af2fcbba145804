use anyhow::Context;
use plant_core::{
    clock::SystemClock, config::Config, io, paths, snapshot::FileSnapshotStore,
    store::LoadSource, PlantStore,
};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing plant tracker in: {}", root.display());

    for dir in [paths::plants_dir(root), paths::data_dir(root)] {
        io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to read config.yaml")?
    } else {
        let cfg = Config::default();
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    let store = PlantStore::open(
        Box::new(FileSnapshotStore::for_root(root)),
        Box::new(SystemClock),
        config.store_options(),
    );
    match store.loaded_from() {
        LoadSource::Seed => println!("  seeded:  {} sample plants", store.total_plants()),
        LoadSource::Snapshot => println!("  exists:  {} plants", store.total_plants()),
    }
    Ok(())
}
