use super::{load_config, open_store};
use crate::output::{print_json, print_table};
use anyhow::Context;
use plant_core::{io, progress::ProgressReport};
use std::path::{Path, PathBuf};

pub fn report(root: &Path, output: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let store = open_store(root)?;
    let report = ProgressReport::build(&store, config.attention_window_days);

    if json {
        return print_json(&report);
    }
    let markdown = report.render_markdown();
    match output {
        Some(path) => {
            io::atomic_write(&path, markdown.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote progress report to {}", path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

pub fn activity(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let entries = store.activity().entries();
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }
    let offset = *store.now().offset();
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.timestamp
                    .with_timezone(&offset)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                e.action.clone(),
                e.plant_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["WHEN", "ACTION", "PLANT"], rows);
    Ok(())
}
