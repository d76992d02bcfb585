use serde::Serialize;

use super::{date::full_french_date, flatrate_providers, last_trailer_key, top_billed_cast};
use crate::tmdb::{MovieDetails, SearchHit};

const UNKNOWN_RELEASE_DATE: &str = "Date de sortie inconnue";
const NO_DIRECTOR: &str = "Pas de réalisateur";

/// Display-ready record for one film. Every field is populated; absent source
/// data lands on a sentinel, never on an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieInfo {
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub vote_average: f32,
    pub vote_count: i64,
    pub release_date: String,
    pub director: String,
    pub top_cast: Vec<(String, String)>,
    pub trailer_key: Option<String>,
    pub streaming_providers: Vec<String>,
    pub recommendations: Vec<SearchHit>,
}

impl MovieInfo {
    pub fn new(hit: SearchHit, details: MovieDetails, region: &str) -> Self {
        let release_date = hit
            .release_date
            .as_deref()
            .and_then(full_french_date)
            .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string());

        // First crew entry tagged Director wins; the crew list keeps the
        // catalog's order.
        let director = details
            .credits
            .crew
            .iter()
            .find(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| NO_DIRECTOR.to_string());

        Self {
            title: hit.title,
            poster_path: hit.poster_path,
            overview: hit.overview,
            vote_average: hit.vote_average,
            vote_count: hit.vote_count,
            release_date,
            director,
            top_cast: top_billed_cast(&details.credits.cast),
            trailer_key: last_trailer_key(&details.videos),
            streaming_providers: flatrate_providers(&details.watch_providers, region),
            recommendations: details.recommendations.results,
        }
    }
}
