//! Resolve a query against an ingredient file.
//!
//! Usage: `cargo run --example resolve_ingredient -- ./data/ingredients.json "tomatoe"`
//!
//! Queries without an exact match need `GROQ_API_KEY` in the environment.

use larder_core::{LarderApi, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map(|s| s.as_str()).unwrap_or("./data/ingredients.json");
    let query = args.get(2).map(|s| s.as_str()).unwrap_or("tomato");

    println!("Opening ingredient store at {}", path);
    let api = LarderApi::builder(path).auto_create(true).build()?;

    println!("Resolving '{}'...", query);
    let result = api.search_ingredient(query).await?;

    println!("Interpreted as: {}", result.interpreted);
    for suggestion in &result.suggestions {
        let record = suggestion.record();
        let marker = if suggestion.is_synthesized() { " (generated)" } else { "" };
        println!("  - {}{}", record.name, marker);
        for point in record.description_points() {
            println!("      • {}", point);
        }
    }

    Ok(())
}
