pub mod prelude;

pub mod movies;
pub mod screenings;
pub mod users;
