use anyhow::Result;
use std::env;
use std::sync::Arc;
use tracing::info;

use super::{MovieInfo, PersonInfo, TvInfo};
use crate::tmdb::TmdbApi;

const DEFAULT_WATCH_REGION: &str = "FR";

/// Runs a catalog search and folds every hit through the matching normalizer.
///
/// Each call is a single stateless request/response cycle: one search, then
/// one detail bundle per hit, fetched sequentially in the catalog's relevance
/// order. `Ok(vec![])` means the catalog had nothing for the query; `Err`
/// means the catalog itself could not be reached or answered garbage —
/// callers decide whether to collapse the two for display.
pub struct InfoSearch {
    tmdb: Arc<dyn TmdbApi>,
    watch_region: String,
}

impl InfoSearch {
    pub fn new(tmdb: Arc<dyn TmdbApi>, watch_region: impl Into<String>) -> Self {
        Self {
            tmdb,
            watch_region: watch_region.into(),
        }
    }

    pub fn from_env(tmdb: Arc<dyn TmdbApi>) -> Self {
        let region =
            env::var("TMDB_WATCH_REGION").unwrap_or_else(|_| DEFAULT_WATCH_REGION.to_string());
        Self::new(tmdb, region)
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<MovieInfo>> {
        let hits = self.tmdb.search_movies(query).await?;
        info!(query = %query, hits = hits.len(), "movie search");
        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            let details = self.tmdb.movie_details(hit.id).await?;
            records.push(MovieInfo::new(hit, details, &self.watch_region));
        }
        Ok(records)
    }

    pub async fn search_persons(&self, query: &str) -> Result<Vec<PersonInfo>> {
        let hits = self.tmdb.search_people(query).await?;
        info!(query = %query, hits = hits.len(), "person search");
        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            let details = self.tmdb.person_details(hit.id).await?;
            records.push(PersonInfo::new(hit, details));
        }
        Ok(records)
    }

    pub async fn search_tv(&self, query: &str) -> Result<Vec<TvInfo>> {
        let hits = self.tmdb.search_tv(query).await?;
        info!(query = %query, hits = hits.len(), "series search");
        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            let details = self.tmdb.tv_details(hit.id).await?;
            records.push(TvInfo::new(hit, details, &self.watch_region));
        }
        Ok(records)
    }
}
