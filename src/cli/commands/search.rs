use crate::catalog::{SearchForm, filter_movies};
use crate::config::Config;
use crate::db::Store;

use super::list::print_movie;

pub async fn cmd_search_movies(config: &Config, form: SearchForm) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let movies = store.list_movies().await?;

    let criteria = form.resolve();
    let results = filter_movies(&movies, &criteria);

    if results.is_empty() {
        println!("No movies match these criteria.");
        return Ok(());
    }

    println!("Search Results ({} of {}):", results.len(), movies.len());
    println!("{:-<60}", "");

    for entry in &results {
        print_movie(entry);
    }

    Ok(())
}
