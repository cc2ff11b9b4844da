use crate::config::Config;
use crate::models::PlaceResult;
use crate::state::SharedState;

pub async fn cmd_search(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config)?;
    let results = state.search_service.resolve(query).await?;

    if results.is_empty() {
        eprintln!("No places found for '{query}'");
    } else if let Some(issue) = results
        .iter()
        .filter_map(PlaceResult::from_value)
        .find(PlaceResult::is_format_issue)
    {
        eprintln!("Warning: {}", issue.description);
    }

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
