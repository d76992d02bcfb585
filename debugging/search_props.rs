//! Search TMDB and print the normalized records as pretty JSON.
//! Usage:
//!   cargo run --bin search_props -- movies <query>
//!   cargo run --bin search_props -- people <query>
//!   cargo run --bin search_props -- tv <query>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::Result;
use cinebot::info::InfoSearch;
use cinebot::tmdb::{TmdbApi, TmdbClient};
use dotenvy::dotenv;
use serde::Serialize;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchKind {
    Movies,
    People,
    Tv,
}

impl FromStr for SearchKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "movies" => Ok(SearchKind::Movies),
            "people" => Ok(SearchKind::People),
            "tv" => Ok(SearchKind::Tv),
            _ => Err(anyhow::anyhow!(
                "search kind must be 'movies', 'people' or 'tv'"
            )),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// `Ok(None)` means the catalog had no results for the query.
fn render<T: Serialize>(records: Result<Vec<T>>) -> Result<Option<String>> {
    let records = records?;
    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string_pretty(&records)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --bin search_props -- <movies|people|tv> <query>");
        std::process::exit(1);
    }
    let kind = SearchKind::from_str(&args[1])?;
    let query = args[2..].join(" ");

    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_env()?);
    let search = InfoSearch::from_env(tmdb);

    let rendered = match kind {
        SearchKind::Movies => render(search.search_movies(&query).await),
        SearchKind::People => render(search.search_persons(&query).await),
        SearchKind::Tv => render(search.search_tv(&query).await),
    };

    match rendered {
        Ok(Some(json)) => println!("{json}"),
        Ok(None) => println!("Aucun résultat pour cette recherche : {query}"),
        Err(e) => {
            tracing::error!("search failed: {e:#}");
            println!("Une erreur interne s'est produite lors de la recherche.");
            std::process::exit(1);
        }
    }

    Ok(())
}
