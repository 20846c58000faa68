use crate::config::Config;
use crate::db::Store;

pub async fn cmd_remove_movie(config: &Config, id: &str, skip_confirm: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(entry) = store.get_movie(id).await? else {
        println!("Movie with ID {id} not found.");
        println!("Use 'marquee list' to see movie IDs.");
        return Ok(());
    };

    let screenings = store.count_screenings(id).await?;

    if !skip_confirm {
        println!(
            "Remove '{}' and its {screenings} screening(s)?",
            entry.movie.title
        );
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.delete_movie(id).await? {
        println!(
            "✓ Removed: {} ({screenings} screening(s))",
            entry.movie.title
        );
    } else {
        println!("Failed to remove movie.");
    }

    Ok(())
}
