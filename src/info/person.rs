use serde::Serialize;
use std::collections::HashSet;

use super::date::full_french_date;
use crate::tmdb::{CombinedCredit, PersonDetails, SearchHit};

const UNKNOWN_BIRTHDAY: &str = "Date de naissance inconnue";
const UNKNOWN_BIRTHPLACE: &str = "Lieu de naissance inconnu";
const NO_BIOGRAPHY: &str = "Pas de biographie";

const TOP_CREDITS: usize = 5;

/// Display-ready record for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonInfo {
    pub name: String,
    pub profile_path: Option<String>,
    pub department: Option<String>,
    pub birthday: String,
    pub place_of_birth: String,
    pub biography: String,
    pub known_for: Vec<RankedCredit>,
    pub created_works: Vec<RankedCredit>,
}

/// One credit kept after ranking by `vote_average × vote_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCredit {
    pub id: i64,
    pub title: String,
    pub vote_average: f32,
    pub vote_count: i64,
}

impl PersonInfo {
    pub fn new(hit: SearchHit, details: PersonDetails) -> Self {
        let birthday = details
            .birthday
            .as_deref()
            .and_then(full_french_date)
            .unwrap_or_else(|| UNKNOWN_BIRTHDAY.to_string());
        let place_of_birth = details
            .place_of_birth
            .clone()
            .unwrap_or_else(|| UNKNOWN_BIRTHPLACE.to_string());
        // The catalog sends "" rather than omitting an unwritten biography.
        let biography = details
            .biography
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| NO_BIOGRAPHY.to_string());

        let known_for = top_credits(&details.combined_credits.cast, false);
        let created_works = top_credits(&details.combined_credits.crew, true);

        Self {
            name: hit.title,
            profile_path: hit.poster_path,
            department: details.known_for_department,
            birthday,
            place_of_birth,
            biography,
            known_for,
            created_works,
        }
    }
}

fn credit_score(credit: &CombinedCredit) -> f64 {
    credit.vote_average as f64 * credit.vote_count as f64
}

/// Rank by score descending; the sort is stable so ties keep the catalog
/// order. Crew credits are additionally deduplicated by work id, keeping the
/// highest-scored occurrence.
fn top_credits(credits: &[CombinedCredit], dedupe_by_id: bool) -> Vec<RankedCredit> {
    let mut ranked: Vec<&CombinedCredit> = credits.iter().collect();
    ranked.sort_by(|a, b| credit_score(b).total_cmp(&credit_score(a)));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|c| !dedupe_by_id || seen.insert(c.id))
        .take(TOP_CREDITS)
        .map(|c| RankedCredit {
            id: c.id,
            title: c.display_title().to_string(),
            vote_average: c.vote_average,
            vote_count: c.vote_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(id: i64, title: &str, vote_average: f32, vote_count: i64) -> CombinedCredit {
        CombinedCredit {
            id,
            title: Some(title.to_string()),
            name: None,
            vote_average,
            vote_count,
        }
    }

    fn hit() -> SearchHit {
        SearchHit {
            id: 1100,
            title: "Keanu Reeves".to_string(),
            poster_path: Some("/k.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn known_for_is_ranked_by_score_and_capped_at_five() {
        let cast = vec![
            credit(1, "Low", 5.0, 10),
            credit(2, "Top", 8.0, 10000),
            credit(3, "Mid", 7.0, 500),
            credit(4, "High", 8.5, 9000),
            credit(5, "Tiny", 2.0, 3),
            credit(6, "Sixth", 6.0, 400),
        ];
        let ranked = top_credits(&cast, false);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].title, "Top");
        assert_eq!(ranked[1].title, "High");
        assert_eq!(ranked[2].title, "Mid");
        assert_eq!(ranked[3].title, "Sixth");
        assert_eq!(ranked[4].title, "Low");
    }

    #[test]
    fn score_ties_keep_catalog_order() {
        let cast = vec![
            credit(1, "First", 4.0, 100),
            credit(2, "Second", 8.0, 50),
            credit(3, "Third", 2.0, 200),
        ];
        // All three score 400; catalog order must survive the sort.
        let ranked = top_credits(&cast, false);
        assert_eq!(
            ranked.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn created_works_dedupe_keeps_highest_scored_occurrence() {
        let crew = vec![
            credit(7, "Writer pass", 6.0, 100),
            credit(7, "Director pass", 9.0, 5000),
            credit(8, "Other", 7.0, 300),
        ];
        let ranked = top_credits(&crew, true);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, 7);
        assert_eq!(ranked[0].vote_count, 5000);
        assert_eq!(ranked[1].id, 8);
    }

    #[test]
    fn absent_fields_map_to_sentinels() {
        let info = PersonInfo::new(hit(), PersonDetails::default());
        assert_eq!(info.name, "Keanu Reeves");
        assert_eq!(info.birthday, UNKNOWN_BIRTHDAY);
        assert_eq!(info.place_of_birth, UNKNOWN_BIRTHPLACE);
        assert_eq!(info.biography, NO_BIOGRAPHY);
        assert!(info.known_for.is_empty());
        assert!(info.created_works.is_empty());
    }

    #[test]
    fn blank_biography_counts_as_absent() {
        let details = PersonDetails {
            biography: Some("   ".to_string()),
            ..Default::default()
        };
        let info = PersonInfo::new(hit(), details);
        assert_eq!(info.biography, NO_BIOGRAPHY);
    }

    #[test]
    fn birthday_renders_in_full_french() {
        let details = PersonDetails {
            birthday: Some("1964-09-02".to_string()),
            place_of_birth: Some("Beyrouth, Liban".to_string()),
            ..Default::default()
        };
        let info = PersonInfo::new(hit(), details);
        assert_eq!(info.birthday, "Mercredi 2 septembre 1964");
        assert_eq!(info.place_of_birth, "Beyrouth, Liban");
    }
}
