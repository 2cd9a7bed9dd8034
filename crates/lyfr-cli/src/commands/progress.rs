//! `lyfr progress` — show or change completion state.

use anyhow::{bail, Result};
use lyfr::reader::ProgressTracker;

use crate::config::AppConfig;
use crate::ProgressAction;

pub fn run(config: &AppConfig, action: Option<ProgressAction>) -> Result<()> {
    let registry = config.registry()?;
    let mut tracker = ProgressTracker::load(
        registry.slugs().to_vec(),
        Box::new(config.progress_store()?),
    );

    match action.unwrap_or(ProgressAction::Show) {
        ProgressAction::Show => {
            println!(
                "{} of {} complete ({}%)",
                tracker.completed_count(),
                tracker.total_count(),
                tracker.percent()
            );
            for slug in tracker.completed_slugs() {
                println!("  [x] {slug}");
            }
        }
        ProgressAction::Toggle { slug } => {
            if registry.entry(&slug).is_none() {
                match registry.suggest(&slug) {
                    Some(suggestion) => {
                        bail!("unknown chapter: {slug} (did you mean {suggestion}?)")
                    }
                    None => bail!("unknown chapter: {slug}"),
                }
            }
            let completed = tracker.toggle(&slug);
            let state = if completed { "complete" } else { "not complete" };
            println!("{slug}: {state} ({}%)", tracker.percent());
        }
        ProgressAction::Reset => {
            tracker.reset();
            println!("progress cleared");
        }
    }
    Ok(())
}
