mod list;
mod remove;
mod search;

pub use list::cmd_list_movies;
pub use remove::cmd_remove_movie;
pub use search::cmd_search_movies;
