//! `lyfr read` — print a chapter to stdout.

use anyhow::{bail, Result};

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, slug: &str) -> Result<()> {
    let store = config.content_store()?;

    let chapter = match store.load(slug).await {
        Ok(chapter) => chapter,
        Err(err) if err.is_not_found() => match store.registry().suggest(slug) {
            Some(suggestion) => bail!("chapter not found: {slug} (did you mean {suggestion}?)"),
            None => bail!("chapter not found: {slug}"),
        },
        Err(err) => return Err(err.into()),
    };

    println!("{} — {} min read", chapter.title, chapter.minutes);
    if !chapter.outline.is_empty() {
        println!();
        for heading in &chapter.outline {
            let indent = "  ".repeat(heading.level as usize - 2);
            println!("{indent}- {} (#{})", heading.text, heading.id);
        }
    }
    println!();

    let raw = store.read_raw(slug).await?;
    println!("{raw}");
    Ok(())
}
