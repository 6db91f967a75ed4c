use entermedia_client::prelude::*;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let pattern = std::env::args().nth(1).unwrap_or_else(|| "*".to_string());
    let client = EnterMediaClient::new(ClientConfig::from_env()?)?;

    if !client.login().await? {
        eprintln!("EnterMedia rejected the configured credentials");
        std::process::exit(1);
    }

    let query = SearchQuery::new()
        .hits_per_page(10)
        .term(SearchTerm::matches("name", pattern.as_str()));
    let results = client.assets().search_results(&query).await?;
    info!("{:?} total hits", results.total_hits);

    for hit in &results.hits {
        println!(
            "{}\t{}",
            hit["id"].as_str().unwrap_or("?"),
            hit["name"].as_str().unwrap_or("")
        );
    }

    Ok(())
}
