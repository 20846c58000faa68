use chrono::{DateTime, NaiveDate, NaiveTime};

use super::ApiError;
use crate::domain::Weekday;
use crate::models::{MovieDraft, MovieInput, ScreeningDraft};

/// Checks a movie body and converts it into a [`MovieDraft`].
///
/// Only type-level checks happen here: text fields are stored as given.
pub fn validate_movie_input(input: MovieInput) -> Result<MovieDraft, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::validation("Title cannot be empty"));
    }

    let duration = validate_duration(input.duration)?;

    if let Some(min_age) = input.min_age
        && min_age < 0
    {
        return Err(ApiError::validation(format!(
            "Invalid minimum age: {min_age}. Age cannot be negative"
        )));
    }

    let start_date = parse_date("startDate", &input.start_date)?;
    let end_date = parse_date("endDate", &input.end_date)?;
    if end_date < start_date {
        return Err(ApiError::validation(format!(
            "endDate ({end_date}) cannot be before startDate ({start_date})"
        )));
    }

    let screening = ScreeningDraft {
        start_date,
        end_date,
        week_days: parse_week_days(&input.week_days)?,
        start_time: parse_time("startTime", &input.start_time)?,
        city: input.city,
        address: input.address,
    };

    Ok(MovieDraft {
        title: input.title,
        duration,
        language: input.language,
        subtitles: input.subtitles,
        director: input.director,
        actors: input.actors,
        min_age: input.min_age,
        poster: input.poster,
        screening,
    })
}

pub fn validate_duration(duration: i32) -> Result<i32, ApiError> {
    if duration <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid duration: {duration}. Duration must be a positive number of minutes"
        )));
    }
    Ok(duration)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, whose date part is kept.
fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| {
            ApiError::validation(format!("Invalid {field}: '{value}'. Expected YYYY-MM-DD"))
        })
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ApiError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ApiError::validation(format!("Invalid {field}: '{value}'. Expected HH:MM")))
}

/// Weekdays are a set: duplicates collapse and the result is in week order.
fn parse_week_days(values: &[String]) -> Result<Vec<Weekday>, ApiError> {
    let mut days = values
        .iter()
        .map(|v| v.parse::<Weekday>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    days.sort_unstable();
    days.dedup();
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MovieInput {
        MovieInput {
            title: "Dune".to_string(),
            duration: 155,
            language: "English".to_string(),
            subtitles: Some("Français".to_string()),
            director: "Villeneuve".to_string(),
            actors: vec!["Zendaya".to_string()],
            min_age: Some(12),
            poster: None,
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-31".to_string(),
            week_days: vec!["Friday".to_string(), "sat".to_string(), "friday".to_string()],
            start_time: "20:30".to_string(),
            city: "Paris".to_string(),
            address: "1 rue du Cinéma".to_string(),
        }
    }

    #[test]
    fn test_valid_input_becomes_draft() {
        let draft = validate_movie_input(input()).unwrap();
        assert_eq!(draft.duration, 155);
        assert_eq!(
            draft.screening.week_days,
            vec![Weekday::Friday, Weekday::Saturday]
        );
        assert_eq!(
            draft.screening.start_time,
            NaiveTime::from_hms_opt(20, 30, 0).unwrap()
        );
        assert_eq!(draft.subtitles.as_deref(), Some("Français"));
    }

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(-90).is_err());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut body = input();
        body.end_date = "2024-02-28".to_string();
        assert!(validate_movie_input(body).is_err());

        let mut body = input();
        body.end_date = body.start_date.clone();
        assert!(validate_movie_input(body).is_ok());
    }

    #[test]
    fn test_date_and_time_formats() {
        assert_eq!(
            parse_date("startDate", "2024-03-01T00:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("startDate", "01/03/2024").is_err());
        assert!(parse_time("startTime", "20:30:15").is_ok());
        assert!(parse_time("startTime", "8pm").is_err());
    }

    #[test]
    fn test_unknown_weekday_rejected() {
        let mut body = input();
        body.week_days = vec!["someday".to_string()];
        assert!(validate_movie_input(body).is_err());
    }

    #[test]
    fn test_blank_title_and_negative_age_rejected() {
        let mut body = input();
        body.title = "   ".to_string();
        assert!(validate_movie_input(body).is_err());

        let mut body = input();
        body.min_age = Some(-1);
        assert!(validate_movie_input(body).is_err());
    }
}
