//! `lyfr toc` — print the navigation tree with completion marks.

use anyhow::Result;
use lyfr::reader::ProgressTracker;

use crate::config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let registry = config.registry()?;
    let tracker = ProgressTracker::load(
        registry.slugs().to_vec(),
        Box::new(config.progress_store()?),
    );

    println!("{}", registry.book_title());
    for section in registry.sections() {
        println!("\n{}", section.title);
        for entry in &section.entries {
            let mark = if tracker.is_completed(&entry.slug) { "x" } else { " " };
            println!("  [{mark}] {}  ({})", entry.title, entry.slug);
            for anchor in &entry.anchors {
                println!("        - {}  (#{})", anchor.title, anchor.id);
            }
        }
    }
    println!(
        "\n{} of {} complete ({}%)",
        tracker.completed_count(),
        tracker.total_count(),
        tracker.percent()
    );
    Ok(())
}
