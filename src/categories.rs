use anyhow::Result;

use glossary_core::store::ContentStore;

use crate::client::HttpContentStore;
use crate::config::Config;

pub async fn list_categories(config: &Config) -> Result<()> {
    let store = HttpContentStore::new(&config.store)?;
    let categories = store.list_categories().await?;

    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    println!("{:<4} {:<24} {:<20} ID", "", "NAME", "SLUG");
    for c in &categories {
        println!("{:<4} {:<24} {:<20} {}", c.icon, c.name, c.slug, c.id);
    }

    Ok(())
}
