use serde::Serialize;

use super::{date::full_french_date, flatrate_providers, last_trailer_key, top_billed_cast};
use crate::tmdb::{SearchHit, TvDetails};

const UNKNOWN_FIRST_AIR_DATE: &str = "Date de diffusion inconnue";

/// Display-ready record for one series. Same shape as a movie record, with
/// creators and a season count in place of a director.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvInfo {
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub vote_average: f32,
    pub vote_count: i64,
    pub release_date: String,
    pub creators: Vec<String>,
    pub number_of_seasons: usize,
    pub top_cast: Vec<(String, String)>,
    pub trailer_key: Option<String>,
    pub streaming_providers: Vec<String>,
    pub recommendations: Vec<SearchHit>,
}

impl TvInfo {
    pub fn new(hit: SearchHit, details: TvDetails, region: &str) -> Self {
        let release_date = hit
            .release_date
            .as_deref()
            .and_then(full_french_date)
            .unwrap_or_else(|| UNKNOWN_FIRST_AIR_DATE.to_string());

        // Specials are published as season 0 and do not count.
        let number_of_seasons = details
            .seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .count();

        Self {
            title: hit.title,
            poster_path: hit.poster_path,
            overview: hit.overview,
            vote_average: hit.vote_average,
            vote_count: hit.vote_count,
            release_date,
            creators: details.created_by.iter().map(|c| c.name.clone()).collect(),
            number_of_seasons,
            top_cast: top_billed_cast(&details.credits.cast),
            trailer_key: last_trailer_key(&details.videos),
            streaming_providers: flatrate_providers(&details.watch_providers, region),
            recommendations: details.recommendations.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::{Creator, ProviderEntry, RegionOffers, Season, WatchProviders};

    fn hit() -> SearchHit {
        SearchHit {
            id: 1396,
            title: "Breaking Bad".to_string(),
            poster_path: Some("/bb.jpg".to_string()),
            release_date: Some("2008-01-20".to_string()),
            vote_average: 8.9,
            vote_count: 12000,
            overview: "A chemistry teacher turns to crime.".to_string(),
        }
    }

    #[test]
    fn counts_only_regular_seasons() {
        let details = TvDetails {
            created_by: vec![Creator {
                name: "Vince Gilligan".to_string(),
            }],
            seasons: vec![
                Season { season_number: 0 },
                Season { season_number: 1 },
                Season { season_number: 2 },
                Season { season_number: 3 },
            ],
            ..Default::default()
        };
        let info = TvInfo::new(hit(), details, "FR");
        assert_eq!(info.number_of_seasons, 3);
        assert_eq!(info.creators, vec!["Vince Gilligan".to_string()]);
        assert_eq!(info.release_date, "Dimanche 20 janvier 2008");
    }

    #[test]
    fn missing_first_air_date_maps_to_sentinel() {
        let mut h = hit();
        h.release_date = None;
        let info = TvInfo::new(h, TvDetails::default(), "FR");
        assert_eq!(info.release_date, UNKNOWN_FIRST_AIR_DATE);
        assert!(info.creators.is_empty());
        assert_eq!(info.number_of_seasons, 0);
    }

    #[test]
    fn providers_come_from_the_configured_region() {
        let mut watch_providers = WatchProviders::default();
        watch_providers.results.insert(
            "FR".to_string(),
            RegionOffers {
                flatrate: vec![ProviderEntry {
                    provider_name: "Netflix".to_string(),
                }],
            },
        );
        watch_providers.results.insert(
            "US".to_string(),
            RegionOffers {
                flatrate: vec![ProviderEntry {
                    provider_name: "AMC+".to_string(),
                }],
            },
        );
        let details = TvDetails {
            watch_providers,
            ..Default::default()
        };
        let info = TvInfo::new(hit(), details, "FR");
        assert_eq!(info.streaming_providers, vec!["Netflix".to_string()]);
    }
}
