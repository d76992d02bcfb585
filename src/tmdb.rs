use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use tracing::debug;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "fr";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    language: String,
}

/// One operation per catalog lookup; the orchestrator holds this behind a
/// trait object so tests can substitute a fake catalog.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<SearchHit>>;
    async fn search_people(&self, query: &str) -> Result<Vec<SearchHit>>;
    async fn search_tv(&self, query: &str) -> Result<Vec<SearchHit>>;
    async fn movie_details(&self, id: i64) -> Result<MovieDetails>;
    async fn tv_details(&self, id: i64) -> Result<TvDetails>;
    async fn person_details(&self, id: i64) -> Result<PersonDetails>;
}

/// One lightweight entry of a search page. The catalog names the same fields
/// differently per entity kind (`name`/`profile_path`/`first_air_date` for
/// people and series); the aliases fold them into a single shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    #[serde(alias = "name", default)]
    pub title: String,
    #[serde(alias = "profile_path", default)]
    pub poster_path: Option<String>,
    #[serde(alias = "first_air_date", default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub overview: String,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Supplementary movie payloads, either appended to one response or assembled
/// from the individual endpoints. Every section defaults to empty so a missing
/// append never fails the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: Videos,
    #[serde(rename = "watch/providers", default)]
    pub watch_providers: WatchProviders,
    #[serde(default)]
    pub recommendations: RecommendationPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvDetails {
    #[serde(default)]
    pub created_by: Vec<Creator>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: Videos,
    #[serde(rename = "watch/providers", default)]
    pub watch_providers: WatchProviders,
    #[serde(default)]
    pub recommendations: RecommendationPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonDetails {
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub combined_credits: CombinedCredits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Creator {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season_number: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, RegionOffers>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionOffers {
    #[serde(default)]
    pub flatrate: Vec<ProviderEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderEntry {
    pub provider_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationPage {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One acting or crew entry from a person's combined credits. Movies carry a
/// `title`, series a `name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CombinedCredit {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: i64,
}

impl CombinedCredit {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CombinedCredits {
    #[serde(default)]
    pub cast: Vec<CombinedCredit>,
    #[serde(default)]
    pub crew: Vec<CombinedCredit>,
}

impl TmdbClient {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let language =
            env::var("TMDB_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        Ok(Self::new(api_key, language))
    }

    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            language: language.into(),
        }
    }

    async fn search(&self, kind: &str, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!(
            "{TMDB_BASE}/search/{kind}?api_key={}&query={}&language={}",
            self.api_key,
            urlencoding::encode(query),
            self.language
        );
        let page: SearchPage = self.get_json(&url).await?;
        Ok(page.results)
    }

    // Fewer round trips: one request with every supplementary section appended.
    async fn fetch_movie_appended(&self, id: i64) -> Result<MovieDetails> {
        let url = format!(
            "{TMDB_BASE}/movie/{id}?append_to_response=credits,videos,watch/providers,recommendations&language={}&api_key={}",
            self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_tv_appended(&self, id: i64) -> Result<TvDetails> {
        let url = format!(
            "{TMDB_BASE}/tv/{id}?append_to_response=credits,videos,watch/providers,recommendations&language={}&api_key={}",
            self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_person_appended(&self, id: i64) -> Result<PersonDetails> {
        let url = format!(
            "{TMDB_BASE}/person/{id}?append_to_response=combined_credits&language={}&api_key={}",
            self.language, self.api_key
        );
        self.get_json(&url).await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", url, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!(query = %query, "searching TMDB movies");
        self.search("movie", query).await
    }

    async fn search_people(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!(query = %query, "searching TMDB people");
        self.search("person", query).await
    }

    async fn search_tv(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!(query = %query, "searching TMDB series");
        self.search("tv", query).await
    }

    async fn movie_details(&self, id: i64) -> Result<MovieDetails> {
        debug!(id, "fetching movie details");
        match self.fetch_movie_appended(id).await {
            Ok(details) => return Ok(details),
            Err(e) => debug!(id, "appended movie request failed, using individual endpoints: {e:#}"),
        }
        // Individual endpoints, one at a time (lookups for a single entity
        // are never overlapped).
        let credits = self
            .get_json(&format!(
                "{TMDB_BASE}/movie/{id}/credits?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        let videos = self
            .get_json(&format!(
                "{TMDB_BASE}/movie/{id}/videos?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        let watch_providers = self
            .get_json(&format!(
                "{TMDB_BASE}/movie/{id}/watch/providers?api_key={}",
                self.api_key
            ))
            .await?;
        let recommendations = self
            .get_json(&format!(
                "{TMDB_BASE}/movie/{id}/recommendations?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        Ok(MovieDetails {
            credits,
            videos,
            watch_providers,
            recommendations,
        })
    }

    async fn tv_details(&self, id: i64) -> Result<TvDetails> {
        debug!(id, "fetching series details");
        match self.fetch_tv_appended(id).await {
            Ok(details) => return Ok(details),
            Err(e) => debug!(id, "appended series request failed, using individual endpoints: {e:#}"),
        }
        let mut details: TvDetails = self
            .get_json(&format!(
                "{TMDB_BASE}/tv/{id}?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        details.credits = self
            .get_json(&format!(
                "{TMDB_BASE}/tv/{id}/credits?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        details.videos = self
            .get_json(&format!(
                "{TMDB_BASE}/tv/{id}/videos?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        details.watch_providers = self
            .get_json(&format!(
                "{TMDB_BASE}/tv/{id}/watch/providers?api_key={}",
                self.api_key
            ))
            .await?;
        details.recommendations = self
            .get_json(&format!(
                "{TMDB_BASE}/tv/{id}/recommendations?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        Ok(details)
    }

    async fn person_details(&self, id: i64) -> Result<PersonDetails> {
        debug!(id, "fetching person details");
        match self.fetch_person_appended(id).await {
            Ok(details) => return Ok(details),
            Err(e) => debug!(id, "appended person request failed, using individual endpoints: {e:#}"),
        }
        let mut details: PersonDetails = self
            .get_json(&format!(
                "{TMDB_BASE}/person/{id}?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        details.combined_credits = self
            .get_json(&format!(
                "{TMDB_BASE}/person/{id}/combined_credits?api_key={}&language={}",
                self.api_key, self.language
            ))
            .await?;
        Ok(details)
    }
}
