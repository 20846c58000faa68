//! List movies command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::MovieWithScreenings;

pub async fn cmd_list_movies(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let movies = store.list_movies().await?;

    if movies.is_empty() {
        println!("No movies in the catalog.");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");

    for entry in &movies {
        print_movie(entry);
    }

    Ok(())
}

pub(super) fn print_movie(entry: &MovieWithScreenings) {
    let movie = &entry.movie;

    let age = movie
        .min_age
        .map_or_else(String::new, |age| format!(" | {age}+"));
    let subtitles = movie
        .subtitles
        .as_deref()
        .map_or_else(String::new, |s| format!(" (subtitles: {s})"));

    println!("• {} [{} min]{}", movie.title, movie.duration, age);
    println!("  ID: {} | Director: {}", movie.id, movie.director);
    println!("  Language: {}{}", movie.language, subtitles);
    if !movie.actors.is_empty() {
        println!("  Cast: {}", movie.actors.join(", "));
    }

    for screening in &entry.screenings {
        let days = screening
            .week_days
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  ▸ {} – {} at {} ({}) | {}, {}",
            screening.start_date,
            screening.end_date,
            screening.start_time.format("%H:%M"),
            days,
            screening.city,
            screening.address
        );
    }
    println!();
}
