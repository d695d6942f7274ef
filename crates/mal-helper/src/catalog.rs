//! Per-kind catalog settings.
//!
//! Anime and manga share one client implementation; everything that differs
//! between them lives in a `CatalogSpec`.

use crate::normalize::ExtraFieldRule;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Fields requested by keyword, ranking and seasonal listings
pub const SEARCH_FIELDS: &[&str] = &["id", "title", "genres", "synopsis"];

pub const ANIME_INFO_FIELDS: &[&str] = &[
    "title",
    "alternative_titles",
    "start_date",
    "end_date",
    "synopsis",
    "mean",
    "rank",
    "popularity",
    "num_list_users",
    "num_scoring_users",
    "nsfw",
    "media_type",
    "status",
    "genres",
    "num_episodes",
    "source",
    "rating",
    "studios",
];

pub const MANGA_INFO_FIELDS: &[&str] = &[
    "title",
    "alternative_titles",
    "start_date",
    "end_date",
    "synopsis",
    "mean",
    "rank",
    "popularity",
    "num_list_users",
    "num_scoring_users",
    "nsfw",
    "media_type",
    "status",
    "num_volumes",
    "num_chapters",
    "authors",
    "genres",
];

pub const ANIME_RANKING_TYPES: &[&str] = &[
    "all",
    "airing",
    "upcoming",
    "tv",
    "ova",
    "movie",
    "special",
    "bypopularity",
    "favorite",
];

pub const MANGA_RANKING_TYPES: &[&str] = &[
    "all",
    "manga",
    "novels",
    "oneshots",
    "doujin",
    "manhwa",
    "manhua",
    "bypopularity",
    "favorite",
];

pub const SEASONS: &[&str] = &["winter", "spring", "summer", "fall"];

pub const SEASONAL_SORTS: &[&str] = &["anime_score", "anime_num_list_users"];

/// Media kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Anime,
    Manga,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Anime => "anime",
            CatalogKind::Manga => "manga",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one catalog kind needs to build requests and shape results
#[derive(Debug, Clone)]
pub struct CatalogSpec {
    pub kind: CatalogKind,
    /// API address for this kind, e.g. `https://api.myanimelist.net/v2/anime`
    pub api_base: String,
    /// Website address for this kind, e.g. `https://myanimelist.net/anime`
    pub web_base: String,
    pub info_fields: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub ranking_types: &'static [&'static str],
    pub extra_rule: ExtraFieldRule,
    pub has_seasons: bool,
}

impl CatalogSpec {
    /// Build the settings for `kind` under the given API and website roots.
    pub fn for_kind(kind: CatalogKind, api_url: &str, web_url: &str) -> Self {
        let api_base = format!("{}/{}", api_url.trim_end_matches('/'), kind);
        let web_base = format!("{}/{}", web_url.trim_end_matches('/'), kind);

        match kind {
            CatalogKind::Anime => Self {
                kind,
                api_base,
                web_base,
                info_fields: ANIME_INFO_FIELDS,
                search_fields: SEARCH_FIELDS,
                ranking_types: ANIME_RANKING_TYPES,
                extra_rule: ExtraFieldRule::JoinByName("studios"),
                has_seasons: true,
            },
            CatalogKind::Manga => Self {
                kind,
                api_base,
                web_base,
                info_fields: MANGA_INFO_FIELDS,
                search_fields: SEARCH_FIELDS,
                ranking_types: MANGA_RANKING_TYPES,
                extra_rule: ExtraFieldRule::JoinAuthorIds("authors"),
                has_seasons: false,
            },
        }
    }
}

/// Season a calendar month falls in, by quarter.
pub fn season_for_month(month: u32) -> &'static str {
    match month {
        1..=3 => "winter",
        4..=6 => "spring",
        7..=9 => "summer",
        _ => "fall",
    }
}

/// Fill in a missing year and season from `today`.
pub fn resolve_season(year: Option<i32>, season: Option<&str>, today: NaiveDate) -> (i32, String) {
    let year = year.unwrap_or_else(|| today.year());
    let season = season
        .map(str::to_string)
        .unwrap_or_else(|| season_for_month(today.month()).to_string());
    (year, season)
}
