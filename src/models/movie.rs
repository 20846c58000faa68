use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::Weekday;

/// Scalar fields of a catalog movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub duration: i32,
    pub language: String,
    pub subtitles: Option<String>,
    pub director: String,
    pub actors: Vec<String>,
    pub min_age: Option<i32>,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: String,
    pub movie_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_days: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub city: String,
    pub address: String,
}

/// A movie together with every screening that belongs to it, as served by
/// the listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieWithScreenings {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub screenings: Vec<Screening>,
}

/// Request body for creating or replacing a movie.
///
/// Optional scalars that are absent from the body deserialize to `None` and
/// overwrite whatever was stored, so callers must send complete payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    pub duration: i32,
    pub language: String,
    pub subtitles: Option<String>,
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    pub min_age: Option<i32>,
    pub poster: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub week_days: Vec<String>,
    pub start_time: String,
    pub city: String,
    pub address: String,
}

/// A validated [`MovieInput`], ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub duration: i32,
    pub language: String,
    pub subtitles: Option<String>,
    pub director: String,
    pub actors: Vec<String>,
    pub min_age: Option<i32>,
    pub poster: Option<String>,
    pub screening: ScreeningDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_days: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub city: String,
    pub address: String,
}
