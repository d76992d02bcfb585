//! Display-ready records assembled from the raw catalog payloads, plus the
//! search orchestrator that produces them.

mod date;
mod movie;
mod person;
mod search;
mod tv;

pub use movie::MovieInfo;
pub use person::{PersonInfo, RankedCredit};
pub use search::InfoSearch;
pub use tv::TvInfo;

use crate::tmdb::{CastMember, Videos, WatchProviders};
use std::collections::HashSet;

/// Actor/character pairs for the top-billed cast. Short lists pass through in
/// catalog order; longer ones are picked by billing slot 0..4, where the
/// `order` field is catalog-assigned and may be sparse or out of array order.
/// A slot with no member is skipped, so the result can hold fewer than four.
pub(crate) fn top_billed_cast(cast: &[CastMember]) -> Vec<(String, String)> {
    let pair = |member: &CastMember| {
        (
            member.name.clone(),
            member.character.clone().unwrap_or_default(),
        )
    };
    if cast.len() <= 4 {
        return cast.iter().map(pair).collect();
    }
    (0..4)
        .filter_map(|slot| cast.iter().find(|m| m.order == Some(slot)))
        .map(pair)
        .collect()
}

/// The last trailer in the list wins, unlike director selection which takes
/// the first crew match.
pub(crate) fn last_trailer_key(videos: &Videos) -> Option<String> {
    videos
        .results
        .iter()
        .rev()
        .find(|v| v.video_type == "Trailer")
        .map(|v| v.key.clone())
}

/// Subscription-included provider names for one region, first occurrence wins.
pub(crate) fn flatrate_providers(providers: &WatchProviders, region: &str) -> Vec<String> {
    let names = providers
        .results
        .get(region)
        .map(|offers| {
            offers
                .flatrate
                .iter()
                .map(|p| p.provider_name.clone())
                .collect()
        })
        .unwrap_or_default();
    dedupe_preserve_order(names)
}

pub(crate) fn dedupe_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}
