//! CLI module - Command-line interface for Marquee
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Marquee - Movie theater listings
/// Public movie search plus an authenticated admin API
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// List all movies and their screenings
    #[command(alias = "ls", alias = "l")]
    List,

    /// Filter the catalog the same way the search page does
    #[command(alias = "s")]
    Search {
        /// Matches title, director or any actor
        #[arg(long, short)]
        query: Option<String>,
        /// City picked from the suggestion list; wins over `--city-input`
        #[arg(long)]
        city: Option<String>,
        /// Free-typed city, used when `--city` is not given
        #[arg(long)]
        city_input: Option<String>,
        /// Language picked from the suggestion list; wins over `--language-input`
        #[arg(long)]
        language: Option<String>,
        /// Free-typed language, used when `--language` is not given
        #[arg(long)]
        language_input: Option<String>,
        /// Minimum duration in minutes; leading integer, otherwise ignored
        #[arg(long)]
        min_duration: Option<String>,
        /// Maximum duration in minutes; leading integer, otherwise ignored
        #[arg(long)]
        max_duration: Option<String>,
    },

    /// Delete a movie together with all of its screenings
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Movie ID (see `marquee list`)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_accepts_typed_and_selected_values() {
        let cli = Cli::try_parse_from([
            "marquee",
            "search",
            "--city-input",
            "ly",
            "--language",
            "French",
            "--language-input",
            "eng",
        ])
        .unwrap();

        let Some(Commands::Search {
            city,
            city_input,
            language,
            language_input,
            ..
        }) = cli.command
        else {
            panic!("expected search command");
        };
        assert_eq!(city, None);
        assert_eq!(city_input.as_deref(), Some("ly"));
        assert_eq!(language.as_deref(), Some("French"));
        assert_eq!(language_input.as_deref(), Some("eng"));
    }
}
